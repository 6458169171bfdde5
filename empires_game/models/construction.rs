use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use empires_core::GameError;
use empires_types::buildings::{BuildingName, BuildingRequirement, FieldKind};

use crate::{
    catalog::get_building_data,
    models::{
        buildings::{
            BuildingInstance, Construction, calculate_construction_time, get_cost,
            unmet_requirement,
        },
        resources::VillageResources,
    },
};

/// A construction can be cancelled during its first 5 minutes.
pub const CANCELLATION_WINDOW_SECS: i64 = 300;
/// Share of the paid cost given back on cancellation.
pub const CANCELLATION_REFUND_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    Idle,
    Building {
        slot_id: u8,
        completes_at: DateTime<Utc>,
    },
}

/// The buildings of a village and the single construction running on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionQueue {
    village_id: Uuid,
    buildings: Vec<BuildingInstance>,
}

impl ConstructionQueue {
    pub fn new(village_id: Uuid, mut buildings: Vec<BuildingInstance>) -> Self {
        buildings.sort_by_key(|b| b.slot_id);
        Self {
            village_id,
            buildings,
        }
    }

    pub fn buildings(&self) -> &[BuildingInstance] {
        &self.buildings
    }

    pub fn building_at_slot(&self, slot_id: u8) -> Option<&BuildingInstance> {
        self.buildings.iter().find(|b| b.slot_id == slot_id)
    }

    /// Level of the best building of the given type, 0 if there's none.
    pub fn highest_level(&self, name: BuildingName) -> u8 {
        self.buildings
            .iter()
            .filter(|b| b.name == name)
            .map(|b| b.level)
            .max()
            .unwrap_or(0)
    }

    pub fn main_building_level(&self) -> u8 {
        self.highest_level(BuildingName::MainBuilding)
    }

    /// The building currently under construction, if any.
    pub fn active(&self) -> Option<&BuildingInstance> {
        self.buildings.iter().find(|b| b.is_under_construction())
    }

    pub fn state(&self) -> QueueState {
        let active = self
            .active()
            .and_then(|b| b.completes_at().map(|at| (b.slot_id, at)));

        match active {
            Some((slot_id, completes_at)) => QueueState::Building {
                slot_id,
                completes_at,
            },
            None => QueueState::Idle,
        }
    }

    /// Starts upgrading (or placing) `name` on `slot_id`, paying from `ledger`.
    /// On error nothing changes, neither here nor in the ledger.
    pub fn start(
        &mut self,
        name: BuildingName,
        slot_id: u8,
        ledger: &mut VillageResources,
        now: DateTime<Utc>,
    ) -> Result<&BuildingInstance, GameError> {
        let field_kind = FieldKind::for_slot(slot_id).ok_or(GameError::InvalidSlot(slot_id))?;
        let definition = get_building_data(name);
        if definition.field_kind != field_kind {
            return Err(GameError::InvalidFieldKind {
                building: name,
                slot_id,
            });
        }

        let current_level = match self.building_at_slot(slot_id) {
            Some(existing) if existing.name != name => {
                return Err(GameError::SlotOccupied { slot_id });
            }
            Some(existing) => existing.level,
            None => 0,
        };
        let target_level = current_level + 1;

        if let Some(BuildingRequirement(building, level)) = unmet_requirement(name, &self.buildings)
        {
            return Err(GameError::BuildingRequirementsNotMet { building, level });
        }

        if target_level > definition.max_level {
            return Err(GameError::BuildingMaxLevelReached);
        }

        if self.active().is_some() {
            return Err(GameError::ConstructionInProgress);
        }

        let cost = get_cost(name, target_level);
        let build_secs = calculate_construction_time(cost.time, self.main_building_level());

        if !ledger.try_spend(&cost.resources) {
            return Err(GameError::NotEnoughResources);
        }

        let idx = match self.buildings.iter().position(|b| b.slot_id == slot_id) {
            Some(idx) => idx,
            None => {
                self.buildings
                    .push(BuildingInstance::new(self.village_id, name, slot_id));
                self.buildings.sort_by_key(|b| b.slot_id);
                self.buildings
                    .iter()
                    .position(|b| b.slot_id == slot_id)
                    .ok_or(GameError::InvalidSlot(slot_id))?
            }
        };

        self.buildings[idx].construction = Some(Construction {
            completes_at: now + Duration::seconds(build_secs as i64),
            build_secs,
            cost,
        });
        Ok(&self.buildings[idx])
    }

    /// Finishes the active construction if it's due at `now`.
    /// Returns the upgraded building.
    pub fn complete_due(&mut self, now: DateTime<Utc>) -> Option<BuildingInstance> {
        let building = self
            .buildings
            .iter_mut()
            .find(|b| b.completes_at().is_some_and(|at| at <= now))?;

        building.level = (building.level + 1).min(building.definition().max_level);
        building.construction = None;
        Some(building.clone())
    }

    /// Aborts the active construction and refunds 80% of what was paid.
    pub fn cancel(
        &mut self,
        ledger: &mut VillageResources,
        now: DateTime<Utc>,
    ) -> Result<BuildingInstance, GameError> {
        let building = self
            .buildings
            .iter_mut()
            .find(|b| b.is_under_construction())
            .ok_or(GameError::NoActiveConstruction)?;
        let Some(construction) = building.construction.clone() else {
            return Err(GameError::NoActiveConstruction);
        };

        if now - construction.started_at() >= Duration::seconds(CANCELLATION_WINDOW_SECS) {
            return Err(GameError::CancellationWindowExpired);
        }

        ledger.refund(&construction.cost.resources, CANCELLATION_REFUND_RATIO);
        building.construction = None;
        Ok(building.clone())
    }
}

/// Whole seconds left until `completes_at`, never negative.
pub fn time_remaining(completes_at: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    (completes_at - now).num_seconds().clamp(0, u32::MAX as i64) as u32
}
