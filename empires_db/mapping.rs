use empires_core::DbError;
use empires_game::models::{
    buildings::{BuildingInstance, Construction},
    resources::VillageResources,
    village::Village,
};
use empires_types::{
    buildings::BuildingName,
    common::{Cost, ResourceGroup},
};

use crate::models as db_models;

/// A village row together with all of its building rows.
pub struct VillageAggregate {
    pub village: db_models::Village,
    pub buildings: Vec<db_models::Building>,
}

impl TryFrom<VillageAggregate> for Village {
    type Error = DbError;

    fn try_from(agg: VillageAggregate) -> Result<Self, Self::Error> {
        let v = agg.village;

        let stock = ResourceGroup::new(
            to_u32("villages", v.wood)?,
            to_u32("villages", v.clay)?,
            to_u32("villages", v.iron)?,
            to_u32("villages", v.crop)?,
        );
        let production = ResourceGroup::new(
            to_u32("villages", v.wood_rate)?,
            to_u32("villages", v.clay_rate)?,
            to_u32("villages", v.iron_rate)?,
            to_u32("villages", v.crop_rate)?,
        );
        let carry: [f64; 4] = serde_json::from_value(v.carry)?;

        let resources = VillageResources::from_persistence(
            v.id,
            stock,
            production,
            to_u32("villages", v.warehouse_capacity)?,
            to_u32("villages", v.granary_capacity)?,
            v.last_update,
            carry,
        );

        let buildings = agg
            .buildings
            .into_iter()
            .map(BuildingInstance::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Village::from_persistence(
            v.id, v.player_id, v.name, resources, buildings,
        ))
    }
}

impl TryFrom<db_models::Building> for BuildingInstance {
    type Error = DbError;

    fn try_from(b: db_models::Building) -> Result<Self, Self::Error> {
        let code = to_u8("buildings", b.building_code)?;
        let name = BuildingName::from_code(code).ok_or_else(|| DbError::InvalidRecord {
            table: "buildings",
            reason: format!("unknown building code {code}"),
        })?;

        let construction = match (b.completes_at, b.build_secs, b.paid_cost) {
            (Some(completes_at), Some(build_secs), Some(paid_cost)) => Some(Construction {
                completes_at,
                build_secs: u32::try_from(build_secs).map_err(|_| invalid("buildings", build_secs))?,
                cost: serde_json::from_value::<Cost>(paid_cost)?,
            }),
            (None, None, None) => None,
            _ => {
                return Err(DbError::InvalidRecord {
                    table: "buildings",
                    reason: format!("incomplete construction on building {}", b.id),
                });
            }
        };

        Ok(BuildingInstance {
            id: b.id,
            village_id: b.village_id,
            name,
            slot_id: to_u8("buildings", b.slot_id)?,
            level: to_u8("buildings", b.level)?,
            construction,
        })
    }
}

fn to_u32(table: &'static str, value: i64) -> Result<u32, DbError> {
    u32::try_from(value).map_err(|_| invalid(table, value))
}

fn to_u8(table: &'static str, value: i16) -> Result<u8, DbError> {
    u8::try_from(value).map_err(|_| invalid(table, value))
}

fn invalid(table: &'static str, value: impl std::fmt::Display) -> DbError {
    DbError::InvalidRecord {
        table,
        reason: format!("value {value} out of range"),
    }
}
