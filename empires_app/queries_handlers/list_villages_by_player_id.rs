use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use empires_core::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::ListVillagesByPlayerId},
    uow::UnitOfWork,
};

pub struct ListVillagesByPlayerIdHandler {}

impl ListVillagesByPlayerIdHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<ListVillagesByPlayerId> for ListVillagesByPlayerIdHandler {
    async fn handle(
        &self,
        query: ListVillagesByPlayerId,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<<ListVillagesByPlayerId as Query>::Output, ApplicationError> {
        let repo = uow.villages();
        let mut villages = repo.list_by_player_id(query.player_id).await?;

        let now = Utc::now();
        for village in villages.iter_mut() {
            village.advance(now, &config.rules);
        }
        Ok(villages)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use uuid::Uuid;

    use empires_core::Result;
    use empires_game::test_utils::{VillageFactoryOptions, village_factory};

    use super::*;
    use crate::{test_utils::tests::MockUnitOfWork, uow::UnitOfWork};

    #[tokio::test]
    async fn test_list_villages_by_player_id() -> Result<()> {
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let config = Arc::new(Config::default());
        let player_id = Uuid::new_v4();

        for name in ["Alpha", "Beta"] {
            let village = village_factory(VillageFactoryOptions {
                player_id: Some(player_id),
                name: Some(name.to_string()),
                ..Default::default()
            });
            mock_uow.villages().save(&village).await?;
        }
        mock_uow
            .villages()
            .save(&village_factory(Default::default()))
            .await?;

        let villages = ListVillagesByPlayerIdHandler::new()
            .handle(ListVillagesByPlayerId { player_id }, &mock_uow, &config)
            .await?;

        assert_eq!(villages.len(), 2);
        assert!(villages.iter().all(|v| v.player_id == player_id));
        Ok(())
    }
}
