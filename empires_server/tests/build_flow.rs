mod test_utils;

#[cfg(test)]
pub mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use empires_app::{
        command_handlers::{
            CancelConstructionCommandHandler, FoundVillageCommandHandler,
            StartConstructionCommandHandler,
        },
        cqrs::commands::{CancelConstruction, FoundVillage, StartConstruction},
    };
    use empires_core::{ApplicationError, GameError, Result};
    use empires_game::rules::EconomyRules;
    use empires_types::buildings::BuildingName;

    use crate::test_utils::tests::setup_app;

    #[tokio::test]
    async fn test_build_cancel_and_complete_flow() -> Result<()> {
        let (app, worker, uow_provider) = setup_app();
        let village_id = Uuid::new_v4();
        let player_id = Uuid::new_v4();

        app.execute(
            FoundVillage {
                village_id,
                player_id,
                name: "Flow".to_string(),
            },
            FoundVillageCommandHandler::new(),
        )
        .await?;

        app.execute(
            StartConstruction {
                player_id,
                village_id,
                slot_id: 1,
                building: BuildingName::Woodcutter,
            },
            StartConstructionCommandHandler::new(),
        )
        .await?;

        let village = uow_provider.stored_village(village_id).unwrap();
        let active = village.active_construction().unwrap();
        assert_eq!(active.slot_id, 1);
        let wood = village.resources().stock().wood();
        assert!((710..713).contains(&wood), "Woodcutter costs 40 wood, got {wood}");

        // One construction at a time, and a rejected command changes nothing
        let result = app
            .execute(
                StartConstruction {
                    player_id,
                    village_id,
                    slot_id: 5,
                    building: BuildingName::ClayPit,
                },
                StartConstructionCommandHandler::new(),
            )
            .await;
        assert!(matches!(
            result,
            Err(ApplicationError::Game(GameError::ConstructionInProgress))
        ));
        assert_eq!(uow_provider.stored_village(village_id).unwrap(), village);

        app.execute(
            CancelConstruction {
                player_id,
                village_id,
            },
            CancelConstructionCommandHandler::new(),
        )
        .await?;

        let village = uow_provider.stored_village(village_id).unwrap();
        assert!(village.active_construction().is_none());
        let wood = village.resources().stock().wood();
        assert!((742..745).contains(&wood), "80% of 40 wood is refunded, got {wood}");

        // Start an upgrade an hour ago, so the sweep finds it due
        let mut village = village;
        village.upgrade(
            1,
            BuildingName::Woodcutter,
            Utc::now() - Duration::hours(1),
            &EconomyRules::default(),
        )?;
        uow_provider.insert_village(village);

        assert_eq!(worker.sweep().await?, 1);

        let village = uow_provider.stored_village(village_id).unwrap();
        assert!(village.active_construction().is_none());
        assert_eq!(village.building_at_slot(1).unwrap().level, 1);
        assert_eq!(village.resources().production().wood(), 145);
        Ok(())
    }

    #[tokio::test]
    async fn test_barracks_needs_rally_point_and_main_building() -> Result<()> {
        let (app, _, uow_provider) = setup_app();
        let village_id = Uuid::new_v4();
        let player_id = Uuid::new_v4();

        app.execute(
            FoundVillage {
                village_id,
                player_id,
                name: "Garrison".to_string(),
            },
            FoundVillageCommandHandler::new(),
        )
        .await?;

        let result = app
            .execute(
                StartConstruction {
                    player_id,
                    village_id,
                    slot_id: 20,
                    building: BuildingName::Barracks,
                },
                StartConstructionCommandHandler::new(),
            )
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Game(
                GameError::BuildingRequirementsNotMet { .. }
            ))
        ));
        let village = uow_provider.stored_village(village_id).unwrap();
        assert!(village.building_at_slot(20).is_none());
        assert_eq!(
            village.resources().stock().wood(),
            750,
            "Nothing is spent when requirements are not met"
        );
        Ok(())
    }
}
