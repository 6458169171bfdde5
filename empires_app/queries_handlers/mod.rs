mod get_building_cost;
mod get_village_by_id;
mod list_village_ids;
mod list_villages_by_player_id;

pub use get_building_cost::GetBuildingCostHandler;
pub use get_village_by_id::GetVillageByIdHandler;
pub use list_village_ids::ListVillageIdsHandler;
pub use list_villages_by_player_id::ListVillagesByPlayerIdHandler;
