use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use empires_core::GameError;
use empires_types::{
    buildings::{BuildingName, FieldKind, MAIN_BUILDING_SLOT_ID},
    common::ResourceGroup,
};

use crate::{
    catalog::get_building_data,
    models::{
        buildings::{BuildingInstance, check_prerequisites},
        construction::{ConstructionQueue, QueueState},
        resources::VillageResources,
    },
    rules::EconomyRules,
};

pub const STARTING_STOCK: ResourceGroup = ResourceGroup::new(750, 750, 750, 750);

/// What grows on resource fields 1 to 18 of a new village.
const RESOURCE_FIELDS_LAYOUT: [BuildingName; 18] = [
    BuildingName::Woodcutter,
    BuildingName::Woodcutter,
    BuildingName::Woodcutter,
    BuildingName::Woodcutter,
    BuildingName::ClayPit,
    BuildingName::ClayPit,
    BuildingName::ClayPit,
    BuildingName::ClayPit,
    BuildingName::IronMine,
    BuildingName::IronMine,
    BuildingName::IronMine,
    BuildingName::IronMine,
    BuildingName::Cropland,
    BuildingName::Cropland,
    BuildingName::Cropland,
    BuildingName::Cropland,
    BuildingName::Cropland,
    BuildingName::Cropland,
];

/// Buildings of a freshly founded village: level 0 resource fields and a
/// level 1 Main Building.
pub fn starting_buildings(village_id: Uuid) -> Vec<BuildingInstance> {
    let mut buildings: Vec<BuildingInstance> = RESOURCE_FIELDS_LAYOUT
        .into_iter()
        .enumerate()
        .map(|(idx, name)| BuildingInstance::new(village_id, name, idx as u8 + 1))
        .collect();

    buildings.push(
        BuildingInstance::new(village_id, BuildingName::MainBuilding, MAIN_BUILDING_SLOT_ID)
            .with_level(1),
    );
    buildings
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Village {
    pub id: Uuid,
    pub player_id: Uuid,
    pub name: String,
    pub population: u32,
    resources: VillageResources,
    queue: ConstructionQueue,
}

impl Village {
    pub fn new(
        id: Uuid,
        name: String,
        player_id: Uuid,
        rules: &EconomyRules,
        now: DateTime<Utc>,
    ) -> Self {
        let mut village = Self {
            id,
            player_id,
            name,
            population: 0,
            resources: VillageResources::new(id, ResourceGroup::default(), now),
            queue: ConstructionQueue::new(id, starting_buildings(id)),
        };

        village.update_state(rules);
        village.resources.store(&STARTING_STOCK);
        village
    }

    /// Rebuilds a village from stored records. Rates and caps are taken as stored.
    pub fn from_persistence(
        id: Uuid,
        player_id: Uuid,
        name: String,
        resources: VillageResources,
        buildings: Vec<BuildingInstance>,
    ) -> Self {
        let queue = ConstructionQueue::new(id, buildings);
        let population = queue.buildings().iter().map(|b| b.population()).sum();

        Self {
            id,
            player_id,
            name,
            population,
            resources,
            queue,
        }
    }

    pub fn ensure_owned_by(&self, player_id: Uuid) -> Result<(), GameError> {
        if self.player_id != player_id {
            return Err(GameError::VillageNotOwned {
                village_id: self.id,
                player_id,
            });
        }
        Ok(())
    }

    pub fn resources(&self) -> &VillageResources {
        &self.resources
    }

    pub fn buildings(&self) -> &[BuildingInstance] {
        self.queue.buildings()
    }

    pub fn building_at_slot(&self, slot_id: u8) -> Option<&BuildingInstance> {
        self.queue.building_at_slot(slot_id)
    }

    pub fn active_construction(&self) -> Option<&BuildingInstance> {
        self.queue.active()
    }

    pub fn queue_state(&self) -> QueueState {
        self.queue.state()
    }

    pub fn main_building_level(&self) -> u8 {
        self.queue.main_building_level()
    }

    /// Brings the village up to `now`: accrues resources and finishes a due
    /// construction. Production after the completion instant uses the new rates.
    pub fn advance(&mut self, now: DateTime<Utc>, rules: &EconomyRules) -> Option<BuildingInstance> {
        let mut completed = None;

        if let Some(completes_at) = self.queue.active().and_then(|b| b.completes_at()) {
            if completes_at <= now {
                self.resources.reconcile(completes_at);
                completed = self.queue.complete_due(completes_at);
                self.update_state(rules);
            }
        }

        self.resources.reconcile(now);
        completed
    }

    /// Starts upgrading the building on `slot_id`, or placing `name` there if
    /// the slot is empty.
    pub fn upgrade(
        &mut self,
        slot_id: u8,
        name: BuildingName,
        now: DateTime<Utc>,
        rules: &EconomyRules,
    ) -> Result<BuildingInstance, GameError> {
        self.advance(now, rules);
        let building = self
            .queue
            .start(name, slot_id, &mut self.resources, now)?
            .clone();
        Ok(building)
    }

    pub fn cancel_construction(
        &mut self,
        now: DateTime<Utc>,
        rules: &EconomyRules,
    ) -> Result<BuildingInstance, GameError> {
        self.advance(now, rules);
        self.queue.cancel(&mut self.resources, now)
    }

    /// Building types the player may start on `slot_id` right now, ignoring cost.
    pub fn available_buildings_for_slot(&self, slot_id: u8) -> Vec<BuildingName> {
        if let Some(existing) = self.building_at_slot(slot_id) {
            if existing.is_max_level() {
                return vec![];
            }
            return vec![existing.name];
        }

        if FieldKind::for_slot(slot_id) != Some(FieldKind::VillageSlot) {
            return vec![];
        }

        BuildingName::ALL
            .into_iter()
            .filter(|name| get_building_data(*name).field_kind == FieldKind::VillageSlot)
            .filter(|name| !self.buildings().iter().any(|b| b.name == *name))
            .filter(|name| check_prerequisites(*name, self.buildings()))
            .collect()
    }

    /// Recomputes rates, caps and population from the current buildings.
    fn update_state(&mut self, rules: &EconomyRules) {
        self.resources.recompute_rates(self.queue.buildings(), rules);
        self.population = self.queue.buildings().iter().map(|b| b.population()).sum();
    }
}
