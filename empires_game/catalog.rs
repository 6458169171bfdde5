//! Static building catalog.
//!
//! Every building type the game knows about is described once here and never
//! mutated at runtime. Lookups go through [`get_building_data`].

use empires_types::{
    buildings::{BuildingCategory, BuildingName, BuildingRequirement, FieldKind},
    common::{Cost, ResourceKind},
};

/// Which resources a storage building holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Wood, clay and iron.
    Warehouse,
    /// Crop.
    Granary,
}

/// How many inhabitants a building houses at a given level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Population {
    PerLevel(u32),
    Flat(u32),
}

impl Population {
    pub fn at_level(&self, level: u8) -> u32 {
        if level == 0 {
            return 0;
        }
        match self {
            Population::PerLevel(per_level) => per_level * level as u32,
            Population::Flat(value) => *value,
        }
    }
}

/// What a building does for the village economy once leveled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingRole {
    ResourceProducer(ResourceKind),
    Storage(StorageKind),
    PopulationProvider(Population),
    /// Houses population and shortens every construction in the village.
    Special(Population),
}

#[derive(Debug, Clone)]
pub struct BuildingDefinition {
    pub name: BuildingName,
    pub category: BuildingCategory,
    pub field_kind: FieldKind,
    pub max_level: u8,
    pub requirements: &'static [BuildingRequirement],
    pub role: BuildingRole,
    /// Resources and seconds at level 1.
    pub base_cost: Cost,
}

/// Base cost used for building types missing from the catalog.
pub const DEFAULT_BASE_COST: Cost = Cost::new(100, 100, 100, 100, 600);

pub fn get_building_data(name: BuildingName) -> &'static BuildingDefinition {
    match name {
        BuildingName::Woodcutter => &WOODCUTTER,
        BuildingName::ClayPit => &CLAY_PIT,
        BuildingName::IronMine => &IRON_MINE,
        BuildingName::Cropland => &CROPLAND,
        BuildingName::Warehouse => &WAREHOUSE,
        BuildingName::Granary => &GRANARY,
        BuildingName::MainBuilding => &MAIN_BUILDING,
        BuildingName::RallyPoint => &RALLY_POINT,
        BuildingName::Marketplace => &MARKETPLACE,
        BuildingName::Embassy => &EMBASSY,
        BuildingName::Barracks => &BARRACKS,
        BuildingName::Stable => &STABLE,
        BuildingName::Smithy => &SMITHY,
        BuildingName::Residence => &RESIDENCE,
        BuildingName::Palace => &PALACE,
        BuildingName::Treasury => &TREASURY,
    }
}

/// Looks up a definition by numeric building type.
pub fn get_building_data_by_code(code: u8) -> Option<&'static BuildingDefinition> {
    BuildingName::from_code(code).map(get_building_data)
}

/// All definitions, in building type order.
pub fn all_buildings() -> impl Iterator<Item = &'static BuildingDefinition> {
    BuildingName::ALL.into_iter().map(get_building_data)
}

// ==================== BEGIN BUILDINGS STATIC DATA ====================

static WOODCUTTER: BuildingDefinition = BuildingDefinition {
    name: BuildingName::Woodcutter,
    category: BuildingCategory::Resource,
    field_kind: FieldKind::ResourceField,
    max_level: 20,
    requirements: &[],
    role: BuildingRole::ResourceProducer(ResourceKind::Wood),
    base_cost: Cost::new(40, 100, 50, 60, 300),
};

static CLAY_PIT: BuildingDefinition = BuildingDefinition {
    name: BuildingName::ClayPit,
    category: BuildingCategory::Resource,
    field_kind: FieldKind::ResourceField,
    max_level: 20,
    requirements: &[],
    role: BuildingRole::ResourceProducer(ResourceKind::Clay),
    base_cost: Cost::new(80, 40, 80, 50, 300),
};

static IRON_MINE: BuildingDefinition = BuildingDefinition {
    name: BuildingName::IronMine,
    category: BuildingCategory::Resource,
    field_kind: FieldKind::ResourceField,
    max_level: 20,
    requirements: &[],
    role: BuildingRole::ResourceProducer(ResourceKind::Iron),
    base_cost: Cost::new(100, 80, 30, 60, 300),
};

static CROPLAND: BuildingDefinition = BuildingDefinition {
    name: BuildingName::Cropland,
    category: BuildingCategory::Resource,
    field_kind: FieldKind::ResourceField,
    max_level: 20,
    requirements: &[],
    role: BuildingRole::ResourceProducer(ResourceKind::Crop),
    base_cost: Cost::new(70, 90, 70, 20, 300),
};

static WAREHOUSE: BuildingDefinition = BuildingDefinition {
    name: BuildingName::Warehouse,
    category: BuildingCategory::Infrastructure,
    field_kind: FieldKind::VillageSlot,
    max_level: 20,
    requirements: &[],
    role: BuildingRole::Storage(StorageKind::Warehouse),
    base_cost: Cost::new(130, 160, 90, 40, 450),
};

static GRANARY: BuildingDefinition = BuildingDefinition {
    name: BuildingName::Granary,
    category: BuildingCategory::Infrastructure,
    field_kind: FieldKind::VillageSlot,
    max_level: 20,
    requirements: &[],
    role: BuildingRole::Storage(StorageKind::Granary),
    base_cost: Cost::new(80, 100, 70, 20, 450),
};

static MAIN_BUILDING: BuildingDefinition = BuildingDefinition {
    name: BuildingName::MainBuilding,
    category: BuildingCategory::Infrastructure,
    field_kind: FieldKind::VillageSlot,
    max_level: 20,
    requirements: &[],
    role: BuildingRole::Special(Population::PerLevel(2)),
    base_cost: Cost::new(70, 40, 60, 20, 400),
};

static RALLY_POINT: BuildingDefinition = BuildingDefinition {
    name: BuildingName::RallyPoint,
    category: BuildingCategory::Military,
    field_kind: FieldKind::VillageSlot,
    max_level: 1,
    requirements: &[],
    role: BuildingRole::PopulationProvider(Population::Flat(1)),
    base_cost: Cost::new(110, 160, 90, 70, 500),
};

static MARKETPLACE: BuildingDefinition = BuildingDefinition {
    name: BuildingName::Marketplace,
    category: BuildingCategory::Infrastructure,
    field_kind: FieldKind::VillageSlot,
    max_level: 20,
    requirements: &[
        BuildingRequirement(BuildingName::MainBuilding, 3),
        BuildingRequirement(BuildingName::Warehouse, 1),
        BuildingRequirement(BuildingName::Granary, 1),
    ],
    role: BuildingRole::PopulationProvider(Population::PerLevel(4)),
    base_cost: Cost::new(80, 70, 120, 70, 600),
};

static EMBASSY: BuildingDefinition = BuildingDefinition {
    name: BuildingName::Embassy,
    category: BuildingCategory::Infrastructure,
    field_kind: FieldKind::VillageSlot,
    max_level: 20,
    requirements: &[BuildingRequirement(BuildingName::MainBuilding, 1)],
    role: BuildingRole::PopulationProvider(Population::PerLevel(1)),
    base_cost: Cost::new(180, 130, 150, 80, 900),
};

static BARRACKS: BuildingDefinition = BuildingDefinition {
    name: BuildingName::Barracks,
    category: BuildingCategory::Military,
    field_kind: FieldKind::VillageSlot,
    max_level: 20,
    requirements: &[
        BuildingRequirement(BuildingName::RallyPoint, 1),
        BuildingRequirement(BuildingName::MainBuilding, 3),
    ],
    role: BuildingRole::PopulationProvider(Population::PerLevel(4)),
    base_cost: Cost::new(210, 140, 260, 120, 900),
};

static STABLE: BuildingDefinition = BuildingDefinition {
    name: BuildingName::Stable,
    category: BuildingCategory::Military,
    field_kind: FieldKind::VillageSlot,
    max_level: 20,
    requirements: &[
        BuildingRequirement(BuildingName::Barracks, 5),
        BuildingRequirement(BuildingName::Smithy, 3),
    ],
    role: BuildingRole::PopulationProvider(Population::PerLevel(5)),
    base_cost: Cost::new(260, 140, 220, 100, 1200),
};

static SMITHY: BuildingDefinition = BuildingDefinition {
    name: BuildingName::Smithy,
    category: BuildingCategory::Military,
    field_kind: FieldKind::VillageSlot,
    max_level: 20,
    requirements: &[
        BuildingRequirement(BuildingName::MainBuilding, 3),
        BuildingRequirement(BuildingName::Barracks, 1),
    ],
    role: BuildingRole::PopulationProvider(Population::PerLevel(4)),
    base_cost: Cost::new(170, 200, 380, 130, 900),
};

static RESIDENCE: BuildingDefinition = BuildingDefinition {
    name: BuildingName::Residence,
    category: BuildingCategory::Special,
    field_kind: FieldKind::VillageSlot,
    max_level: 20,
    requirements: &[BuildingRequirement(BuildingName::MainBuilding, 5)],
    role: BuildingRole::PopulationProvider(Population::PerLevel(1)),
    base_cost: Cost::new(580, 460, 350, 180, 2100),
};

static PALACE: BuildingDefinition = BuildingDefinition {
    name: BuildingName::Palace,
    category: BuildingCategory::Special,
    field_kind: FieldKind::VillageSlot,
    max_level: 20,
    requirements: &[
        BuildingRequirement(BuildingName::Embassy, 1),
        BuildingRequirement(BuildingName::MainBuilding, 5),
    ],
    role: BuildingRole::PopulationProvider(Population::PerLevel(1)),
    base_cost: Cost::new(550, 800, 750, 250, 3000),
};

static TREASURY: BuildingDefinition = BuildingDefinition {
    name: BuildingName::Treasury,
    category: BuildingCategory::Special,
    field_kind: FieldKind::VillageSlot,
    max_level: 10,
    requirements: &[BuildingRequirement(BuildingName::MainBuilding, 10)],
    role: BuildingRole::PopulationProvider(Population::PerLevel(1)),
    base_cost: Cost::new(2880, 2740, 2580, 990, 5400),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_keyed_by_name() {
        for def in all_buildings() {
            assert_eq!(
                get_building_data(def.name).name,
                def.name,
                "Definition for {} is registered under another name",
                def.name
            );
        }
        assert_eq!(all_buildings().count(), 16);
    }

    #[test]
    fn test_lookup_by_code() {
        let barracks = get_building_data_by_code(19).unwrap();
        assert_eq!(barracks.name, BuildingName::Barracks);
        assert_eq!(barracks.requirements.len(), 2);

        assert!(get_building_data_by_code(99).is_none());
    }

    #[test]
    fn test_resource_buildings_live_on_resource_fields() {
        for def in all_buildings() {
            let is_resource = def.category == BuildingCategory::Resource;
            assert_eq!(
                def.field_kind == FieldKind::ResourceField,
                is_resource,
                "{} has an unexpected field kind",
                def.name
            );
            assert_eq!(
                matches!(def.role, BuildingRole::ResourceProducer(_)),
                is_resource
            );
        }
    }

    #[test]
    fn test_max_levels() {
        assert_eq!(get_building_data(BuildingName::RallyPoint).max_level, 1);
        assert_eq!(get_building_data(BuildingName::Treasury).max_level, 10);
        assert_eq!(get_building_data(BuildingName::Woodcutter).max_level, 20);
    }

    #[test]
    fn test_population_at_level() {
        assert_eq!(Population::PerLevel(4).at_level(3), 12);
        assert_eq!(Population::Flat(1).at_level(1), 1);
        assert_eq!(Population::Flat(1).at_level(0), 0);
        assert_eq!(Population::PerLevel(2).at_level(0), 0);
    }
}
