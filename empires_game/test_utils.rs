use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use empires_types::{buildings::BuildingName, common::ResourceGroup};

use crate::{
    models::{
        buildings::BuildingInstance,
        resources::VillageResources,
        village::{STARTING_STOCK, Village, starting_buildings},
    },
    rules::EconomyRules,
};

#[derive(Default, Clone)]
pub struct BuildingFactoryOptions {
    pub village_id: Option<Uuid>,
    pub name: Option<BuildingName>,
    pub slot_id: Option<u8>,
    pub level: Option<u8>,
}

#[derive(Default, Clone)]
pub struct VillageFactoryOptions {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub player_id: Option<Uuid>,
    pub stock: Option<ResourceGroup>,
    /// `(building, slot, level)` placed over the starting layout.
    pub buildings: Option<Vec<(BuildingName, u8, u8)>>,
    pub rules: Option<EconomyRules>,
    pub now: Option<DateTime<Utc>>,
}

pub fn building_factory(options: BuildingFactoryOptions) -> BuildingInstance {
    BuildingInstance::new(
        options.village_id.unwrap_or_else(Uuid::new_v4),
        options.name.unwrap_or(BuildingName::MainBuilding),
        options.slot_id.unwrap_or(19),
    )
    .with_level(options.level.unwrap_or(1))
}

pub fn village_factory(options: VillageFactoryOptions) -> Village {
    let id = options.id.unwrap_or_else(Uuid::new_v4);
    let default_name = format!("Village {}", rand::thread_rng().gen_range(1..10_000));
    let rules = options.rules.unwrap_or_default();

    let mut buildings = starting_buildings(id);
    for (name, slot_id, level) in options.buildings.unwrap_or_default() {
        buildings.retain(|b| b.slot_id != slot_id);
        buildings.push(building_factory(BuildingFactoryOptions {
            village_id: Some(id),
            name: Some(name),
            slot_id: Some(slot_id),
            level: Some(level),
        }));
    }

    let mut resources = VillageResources::new(
        id,
        ResourceGroup::default(),
        options.now.unwrap_or_else(Utc::now),
    );
    resources.recompute_rates(&buildings, &rules);
    resources.store(&options.stock.unwrap_or(STARTING_STOCK));

    Village::from_persistence(
        id,
        options.player_id.unwrap_or_else(Uuid::new_v4),
        options.name.unwrap_or(default_name),
        resources,
        buildings,
    )
}
