use uuid::Uuid;

use empires_types::buildings::BuildingName;

use crate::cqrs::Command;

/// Creates a new village for a player, with its starting fields and stock.
#[derive(Debug, Clone)]
pub struct FoundVillage {
    pub village_id: Uuid,
    pub player_id: Uuid,
    pub name: String,
}

impl Command for FoundVillage {}

/// Upgrades the building on `slot_id`, or places `building` on an empty slot.
#[derive(Debug, Clone)]
pub struct StartConstruction {
    pub player_id: Uuid,
    pub village_id: Uuid,
    pub slot_id: u8,
    pub building: BuildingName,
}

impl Command for StartConstruction {}

#[derive(Debug, Clone)]
pub struct CancelConstruction {
    pub player_id: Uuid,
    pub village_id: Uuid,
}

impl Command for CancelConstruction {}

/// Brings a village up to date: accrual and due completions.
#[derive(Debug, Clone)]
pub struct AdvanceVillage {
    pub village_id: Uuid,
}

impl Command for AdvanceVillage {}
