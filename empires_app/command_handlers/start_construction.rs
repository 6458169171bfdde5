use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use empires_core::ApplicationError;

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::StartConstruction},
    uow::UnitOfWork,
};

pub struct StartConstructionCommandHandler {}

impl Default for StartConstructionCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl StartConstructionCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<StartConstruction> for StartConstructionCommandHandler {
    #[instrument(skip_all, fields(
        village_id = %command.village_id,
        slot_id = command.slot_id,
        building = %command.building,
    ))]
    async fn handle(
        &self,
        command: StartConstruction,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<(), ApplicationError> {
        let village_repo = uow.villages();
        let mut village = village_repo.get_for_update(command.village_id).await?;
        village.ensure_owned_by(command.player_id)?;

        let building = village.upgrade(
            command.slot_id,
            command.building,
            Utc::now(),
            &config.rules,
        )?;
        village_repo.save(&village).await?;

        info!(
            target_level = building.level + 1,
            completes_at = ?building.completes_at(),
            "Construction started"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use uuid::Uuid;

    use empires_core::{GameError, Result};
    use empires_game::test_utils::{VillageFactoryOptions, village_factory};
    use empires_types::{buildings::BuildingName, common::ResourceGroup};

    use super::*;
    use crate::{test_utils::tests::MockUnitOfWork, uow::UnitOfWork};

    #[tokio::test]
    async fn test_start_construction_handler_success() -> Result<()> {
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let config = Arc::new(Config::default());
        let player_id = Uuid::new_v4();
        let village = village_factory(VillageFactoryOptions {
            player_id: Some(player_id),
            stock: Some(ResourceGroup::new(100, 100, 100, 100)),
            ..Default::default()
        });
        let village_id = village.id;
        mock_uow.villages().save(&village).await?;

        let handler = StartConstructionCommandHandler::new();
        let command = StartConstruction {
            player_id,
            village_id,
            slot_id: 1,
            building: BuildingName::Woodcutter,
        };
        handler.handle(command, &mock_uow, &config).await?;

        let saved = mock_uow.villages().get_by_id(village_id).await?;
        let active = saved.active_construction().unwrap();
        assert_eq!(active.slot_id, 1);
        assert_eq!(active.level, 0, "Level changes only on completion");

        // 100 - (40, 100, 50, 60), plus whatever accrued in the meantime
        let stock = saved.resources().stock();
        assert!(stock.wood() >= 60 && stock.wood() < 65);
        assert!(stock.clay() < 5);
        assert!(stock.iron() >= 50 && stock.iron() < 55);
        assert!(stock.crop() >= 40 && stock.crop() < 45);
        Ok(())
    }

    #[tokio::test]
    async fn test_start_construction_rejects_other_players() -> Result<()> {
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let config = Arc::new(Config::default());
        let village = village_factory(Default::default());
        let village_id = village.id;
        mock_uow.villages().save(&village).await?;

        let handler = StartConstructionCommandHandler::new();
        let command = StartConstruction {
            player_id: Uuid::new_v4(),
            village_id,
            slot_id: 1,
            building: BuildingName::Woodcutter,
        };
        let result = handler.handle(command, &mock_uow, &config).await;

        assert!(matches!(
            result,
            Err(ApplicationError::Game(GameError::VillageNotOwned { .. }))
        ));
        let saved = mock_uow.villages().get_by_id(village_id).await?;
        assert!(saved.active_construction().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_start_construction_without_resources() -> Result<()> {
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let config = Arc::new(Config::default());
        let player_id = Uuid::new_v4();
        let village = village_factory(VillageFactoryOptions {
            player_id: Some(player_id),
            stock: Some(ResourceGroup::new(30, 30, 30, 30)),
            ..Default::default()
        });
        let village_id = village.id;
        mock_uow.villages().save(&village).await?;

        let handler = StartConstructionCommandHandler::new();
        let command = StartConstruction {
            player_id,
            village_id,
            slot_id: 20,
            building: BuildingName::Warehouse,
        };
        let result = handler.handle(command, &mock_uow, &config).await;

        assert!(matches!(
            result,
            Err(ApplicationError::Game(GameError::NotEnoughResources))
        ));
        Ok(())
    }
}
