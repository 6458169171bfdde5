use serde::{Deserialize, Serialize};
use std::fmt;

pub const RESOURCE_FIELDS_LAST_SLOT: u8 = 18;
pub const MAIN_BUILDING_SLOT_ID: u8 = 19;
pub const MAX_VILLAGE_SLOT_ID: u8 = 40;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize)]
pub enum BuildingCategory {
    Resource,
    Military,
    Infrastructure,
    Special,
}

/// The kind of slot a building may occupy.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize)]
pub enum FieldKind {
    ResourceField,
    VillageSlot,
}

impl FieldKind {
    /// Slots 1-18 are resource fields, 19-40 are village building sites.
    pub fn for_slot(slot_id: u8) -> Option<FieldKind> {
        match slot_id {
            1..=RESOURCE_FIELDS_LAST_SLOT => Some(FieldKind::ResourceField),
            MAIN_BUILDING_SLOT_ID..=MAX_VILLAGE_SLOT_ID => Some(FieldKind::VillageSlot),
            _ => None,
        }
    }
}

/// A building that must be owned at least at the given level.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct BuildingRequirement(pub BuildingName, pub u8);

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum BuildingName {
    Woodcutter,
    ClayPit,
    IronMine,
    Cropland,
    Warehouse,
    Granary,
    MainBuilding,
    RallyPoint,
    Marketplace,
    Embassy,
    Barracks,
    Stable,
    Smithy,
    Residence,
    Palace,
    Treasury,
}

impl BuildingName {
    pub const ALL: [BuildingName; 16] = [
        BuildingName::Woodcutter,
        BuildingName::ClayPit,
        BuildingName::IronMine,
        BuildingName::Cropland,
        BuildingName::Warehouse,
        BuildingName::Granary,
        BuildingName::MainBuilding,
        BuildingName::RallyPoint,
        BuildingName::Marketplace,
        BuildingName::Embassy,
        BuildingName::Barracks,
        BuildingName::Stable,
        BuildingName::Smithy,
        BuildingName::Residence,
        BuildingName::Palace,
        BuildingName::Treasury,
    ];

    /// Numeric building type used by clients and storage.
    pub fn code(&self) -> u8 {
        match self {
            BuildingName::Woodcutter => 1,
            BuildingName::ClayPit => 2,
            BuildingName::IronMine => 3,
            BuildingName::Cropland => 4,
            BuildingName::Warehouse => 10,
            BuildingName::Granary => 11,
            BuildingName::MainBuilding => 15,
            BuildingName::RallyPoint => 16,
            BuildingName::Marketplace => 17,
            BuildingName::Embassy => 18,
            BuildingName::Barracks => 19,
            BuildingName::Stable => 20,
            BuildingName::Smithy => 21,
            BuildingName::Residence => 25,
            BuildingName::Palace => 26,
            BuildingName::Treasury => 27,
        }
    }

    pub fn from_code(code: u8) -> Option<BuildingName> {
        BuildingName::ALL.into_iter().find(|name| name.code() == code)
    }
}

impl fmt::Display for BuildingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildingName::Woodcutter => "Woodcutter",
            BuildingName::ClayPit => "Clay Pit",
            BuildingName::IronMine => "Iron Mine",
            BuildingName::Cropland => "Cropland",
            BuildingName::Warehouse => "Warehouse",
            BuildingName::Granary => "Granary",
            BuildingName::MainBuilding => "Main Building",
            BuildingName::RallyPoint => "Rally Point",
            BuildingName::Marketplace => "Marketplace",
            BuildingName::Embassy => "Embassy",
            BuildingName::Barracks => "Barracks",
            BuildingName::Stable => "Stable",
            BuildingName::Smithy => "Smithy",
            BuildingName::Residence => "Residence",
            BuildingName::Palace => "Palace",
            BuildingName::Treasury => "Treasury",
        };
        write!(f, "{}", name)
    }
}
