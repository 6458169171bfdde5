use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use empires_game::models::{
    buildings::BuildingInstance, construction::time_remaining, village::Village,
};
use empires_types::{buildings::BuildingName, common::ResourceGroup};

#[derive(Debug, Clone, Serialize)]
pub struct ResourcesView {
    pub stock: ResourceGroup,
    /// Units per hour.
    pub production: ResourceGroup,
    pub warehouse_capacity: u32,
    pub granary_capacity: u32,
    pub last_update: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildingView {
    pub slot_id: u8,
    pub building: BuildingName,
    pub code: u8,
    pub level: u8,
    pub completes_at: Option<DateTime<Utc>>,
    /// Seconds until the running upgrade completes.
    pub time_remaining: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VillageView {
    pub id: Uuid,
    pub player_id: Uuid,
    pub name: String,
    pub population: u32,
    pub resources: ResourcesView,
    pub construction: Option<BuildingView>,
    pub buildings: Vec<BuildingView>,
}

impl BuildingView {
    fn new(building: &BuildingInstance, now: DateTime<Utc>) -> Self {
        let completes_at = building.completes_at();
        Self {
            slot_id: building.slot_id,
            building: building.name,
            code: building.name.code(),
            level: building.level,
            completes_at,
            time_remaining: completes_at.map(|at| time_remaining(at, now)),
        }
    }
}

impl VillageView {
    pub fn new(village: &Village, now: DateTime<Utc>) -> Self {
        let resources = village.resources();

        Self {
            id: village.id,
            player_id: village.player_id,
            name: village.name.clone(),
            population: village.population,
            resources: ResourcesView {
                stock: resources.stock(),
                production: resources.production(),
                warehouse_capacity: resources.warehouse_capacity(),
                granary_capacity: resources.granary_capacity(),
                last_update: resources.last_update(),
            },
            construction: village
                .active_construction()
                .map(|b| BuildingView::new(b, now)),
            buildings: village
                .buildings()
                .iter()
                .map(|b| BuildingView::new(b, now))
                .collect(),
        }
    }
}
