use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use empires_core::ApplicationError;
use empires_game::models::village::Village;

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::FoundVillage},
    repository::VillageRepository,
    uow::UnitOfWork,
};

pub struct FoundVillageCommandHandler {}

impl Default for FoundVillageCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FoundVillageCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<FoundVillage> for FoundVillageCommandHandler {
    #[instrument(skip_all, fields(village_id = %command.village_id, player_id = %command.player_id))]
    async fn handle(
        &self,
        command: FoundVillage,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<(), ApplicationError> {
        let village_repo: Arc<dyn VillageRepository + '_> = uow.villages();

        let village = Village::new(
            command.village_id,
            command.name,
            command.player_id,
            &config.rules,
            Utc::now(),
        );
        village_repo.save(&village).await?;

        info!(village_name = %village.name, "Village founded");
        Ok(())
    }
}
