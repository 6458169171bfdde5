use serde::Serialize;
use uuid::Uuid;

use empires_game::models::village::Village;
use empires_types::common::Cost;

use crate::cqrs::Query;

/// Fetch a village by id, reconciled to the current time.
pub struct GetVillageById {
    pub id: Uuid,
}

impl Query for GetVillageById {
    type Output = Village;
}

/// List all villages for a player.
pub struct ListVillagesByPlayerId {
    pub player_id: Uuid,
}

impl Query for ListVillagesByPlayerId {
    type Output = Vec<Village>;
}

/// Ids of every village, used by the economy sweep.
pub struct ListVillageIds;

impl Query for ListVillageIds {
    type Output = Vec<Uuid>;
}

/// Price of a building type at a given level, with the build time already
/// discounted by the Main Building level.
pub struct GetBuildingCost {
    pub code: u8,
    pub level: u8,
    pub main_building_level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildingCost {
    pub code: u8,
    pub level: u8,
    pub cost: Cost,
    pub build_secs: u32,
}

impl Query for GetBuildingCost {
    type Output = BuildingCost;
}
