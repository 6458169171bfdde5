use uuid::Uuid;

use empires_core::ApplicationError;
use empires_game::models::village::Village;

#[async_trait::async_trait]
pub trait VillageRepository: Send + Sync {
    async fn get_by_id(&self, village_id: Uuid) -> Result<Village, ApplicationError>;

    /// Like `get_by_id`, but the village stays locked until the transaction
    /// ends, so concurrent commands on it run one after the other.
    async fn get_for_update(&self, village_id: Uuid) -> Result<Village, ApplicationError>;

    async fn list_by_player_id(&self, player_id: Uuid) -> Result<Vec<Village>, ApplicationError>;

    async fn list_ids(&self) -> Result<Vec<Uuid>, ApplicationError>;

    /// Inserts or updates the village together with all of its buildings.
    async fn save(&self, village: &Village) -> Result<(), ApplicationError>;
}
