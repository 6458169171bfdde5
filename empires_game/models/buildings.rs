use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use empires_types::{
    buildings::{BuildingName, BuildingRequirement},
    common::Cost,
};

use crate::{
    catalog::{BuildingDefinition, BuildingRole, DEFAULT_BASE_COST, get_building_data},
    rules::ProductionFormula,
};

/// Each level costs this much more than the previous one.
pub const COST_GROWTH_FACTOR: f64 = 1.28;
/// Capacity of a village without any storage building.
pub const BASE_STORAGE_CAPACITY: u32 = 800;
pub const STORAGE_CAPACITY_PER_LEVEL: u32 = 1200;

const LINEAR_BASE_PRODUCTION: u32 = 30;
const LINEAR_PRODUCTION_PER_LEVEL: u32 = 25;
const EXPONENTIAL_BASE_PRODUCTION: f64 = 2.0;
const EXPONENTIAL_GROWTH: f64 = 1.5;

// Main Building discount, in thousandths.
const MAIN_BUILDING_DISCOUNT_PER_LEVEL: u32 = 25;
const MAX_MAIN_BUILDING_DISCOUNT: u32 = 500;

/// Returns the cost to bring a building to `target_level`.
/// Level 0 is priced as level 1.
pub fn get_cost(name: BuildingName, target_level: u8) -> Cost {
    scale_cost(&get_building_data(name).base_cost, target_level)
}

/// Same as [`get_cost`] for a raw building type. Unknown types are priced with
/// [`DEFAULT_BASE_COST`] instead of failing.
pub fn cost_for_code(code: u8, target_level: u8) -> Cost {
    match BuildingName::from_code(code) {
        Some(name) => get_cost(name, target_level),
        None => scale_cost(&DEFAULT_BASE_COST, target_level),
    }
}

fn scale_cost(base: &Cost, target_level: u8) -> Cost {
    let exponent = target_level.max(1) as f64 - 1.0;
    let multiplier = COST_GROWTH_FACTOR.powf(exponent);

    Cost {
        resources: base.resources * multiplier,
        time: (base.time as f64 * multiplier).floor() as u32,
    }
}

/// Hourly output of a resource field. Other buildings produce nothing.
pub fn get_production(name: BuildingName, level: u8, formula: ProductionFormula) -> u32 {
    match get_building_data(name).role {
        BuildingRole::ResourceProducer(_) => match formula {
            ProductionFormula::Linear => {
                LINEAR_BASE_PRODUCTION + level as u32 * LINEAR_PRODUCTION_PER_LEVEL
            }
            ProductionFormula::Exponential => {
                if level == 0 {
                    return 0;
                }
                let growth = EXPONENTIAL_GROWTH.powf(level as f64 - 1.0);
                (EXPONENTIAL_BASE_PRODUCTION * level as f64 * growth).floor() as u32
            }
        },
        _ => 0,
    }
}

/// Storage provided by a Warehouse or Granary, 0 for anything else.
pub fn get_storage_capacity(name: BuildingName, level: u8) -> u32 {
    match get_building_data(name).role {
        BuildingRole::Storage(_) => {
            BASE_STORAGE_CAPACITY + level as u32 * STORAGE_CAPACITY_PER_LEVEL
        }
        _ => 0,
    }
}

/// Inhabitants housed by a building at the given level.
pub fn get_population(name: BuildingName, level: u8) -> u32 {
    match get_building_data(name).role {
        BuildingRole::PopulationProvider(population) | BuildingRole::Special(population) => {
            population.at_level(level)
        }
        _ => 0,
    }
}

/// Applies the Main Building discount (2.5% per level, at most 50%) to a build time.
pub fn calculate_construction_time(base_secs: u32, main_building_level: u8) -> u32 {
    let discount = (MAIN_BUILDING_DISCOUNT_PER_LEVEL * main_building_level as u32)
        .min(MAX_MAIN_BUILDING_DISCOUNT);
    ((base_secs as u64 * (1000 - discount) as u64) / 1000) as u32
}

/// True when every requirement of `name` is met by `owned`.
pub fn check_prerequisites(name: BuildingName, owned: &[BuildingInstance]) -> bool {
    unmet_requirement(name, owned).is_none()
}

/// Returns the first requirement of `name` that `owned` doesn't satisfy.
pub fn unmet_requirement(
    name: BuildingName,
    owned: &[BuildingInstance],
) -> Option<BuildingRequirement> {
    get_building_data(name)
        .requirements
        .iter()
        .find(|req| !owned.iter().any(|b| b.name == req.0 && b.level >= req.1))
        .copied()
}

/// An upgrade being built right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Construction {
    pub completes_at: DateTime<Utc>,
    /// Build time after the Main Building discount.
    pub build_secs: u32,
    /// What was actually paid, used for refunds.
    pub cost: Cost,
}

impl Construction {
    pub fn started_at(&self) -> DateTime<Utc> {
        self.completes_at - Duration::seconds(self.build_secs as i64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingInstance {
    pub id: Uuid,
    pub village_id: Uuid,
    pub name: BuildingName,
    pub slot_id: u8,
    pub level: u8,
    pub construction: Option<Construction>,
}

impl BuildingInstance {
    /// A level 0 building, as found on fresh resource fields or right before the
    /// first construction on an empty slot.
    pub fn new(village_id: Uuid, name: BuildingName, slot_id: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            village_id,
            name,
            slot_id,
            level: 0,
            construction: None,
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level.min(self.definition().max_level);
        self
    }

    pub fn definition(&self) -> &'static BuildingDefinition {
        get_building_data(self.name)
    }

    pub fn is_under_construction(&self) -> bool {
        self.construction.is_some()
    }

    pub fn completes_at(&self) -> Option<DateTime<Utc>> {
        self.construction.as_ref().map(|c| c.completes_at)
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= self.definition().max_level
    }

    pub fn next_level_cost(&self) -> Cost {
        get_cost(self.name, self.level + 1)
    }

    pub fn production(&self, formula: ProductionFormula) -> u32 {
        get_production(self.name, self.level, formula)
    }

    pub fn population(&self) -> u32 {
        get_population(self.name, self.level)
    }
}
