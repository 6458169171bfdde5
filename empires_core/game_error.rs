use thiserror::Error;
use uuid::Uuid;

use empires_types::buildings::BuildingName;

/// Errors for domain logic (game rules).
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Not enough resources")]
    NotEnoughResources,

    #[error("Building requirements not met: requires {building:?} at level {level}")]
    BuildingRequirementsNotMet { building: BuildingName, level: u8 },

    #[error("Building has already reached max level")]
    BuildingMaxLevelReached,

    #[error("Another construction is already in progress")]
    ConstructionInProgress,

    #[error("No construction in progress")]
    NoActiveConstruction,

    #[error("Construction can no longer be cancelled")]
    CancellationWindowExpired,

    #[error("Unknown building type {0}")]
    UnknownBuilding(u8),

    #[error("Slot {0} does not exist")]
    InvalidSlot(u8),

    #[error("Building {building:?} can't be placed on slot {slot_id}")]
    InvalidFieldKind { building: BuildingName, slot_id: u8 },

    #[error("Slot {slot_id} is already occupied")]
    SlotOccupied { slot_id: u8 },

    #[error("Village {village_id} not owned by player {player_id:?}")]
    VillageNotOwned { village_id: Uuid, player_id: Uuid },
}
