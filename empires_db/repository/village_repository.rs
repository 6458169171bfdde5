use sqlx::{Postgres, Transaction, types::Json};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use empires_app::repository::VillageRepository;
use empires_core::{ApplicationError, DbError};
use empires_game::models::{buildings::BuildingInstance, village::Village};

use crate::{mapping::VillageAggregate, models as db_models};

const SELECT_VILLAGE: &str = "SELECT * FROM villages WHERE id = $1";
const SELECT_VILLAGE_FOR_UPDATE: &str = "SELECT * FROM villages WHERE id = $1 FOR UPDATE";

/// Implements VillageRepository and operates on transactions.
#[derive(Clone)]
pub struct PostgresVillageRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresVillageRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }

    async fn fetch(&self, village_id: Uuid, sql: &str) -> Result<Village, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let db_village = sqlx::query_as::<_, db_models::Village>(sql)
            .bind(village_id)
            .fetch_optional(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?
            .ok_or(ApplicationError::Db(DbError::VillageNotFound(village_id)))?;

        let db_buildings = sqlx::query_as::<_, db_models::Building>(
            "SELECT * FROM buildings WHERE village_id = $1 ORDER BY slot_id",
        )
        .bind(village_id)
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        let aggregate = VillageAggregate {
            village: db_village,
            buildings: db_buildings,
        };
        Ok(Village::try_from(aggregate)?)
    }
}

#[async_trait::async_trait]
impl<'a> VillageRepository for PostgresVillageRepository<'a> {
    async fn get_by_id(&self, village_id: Uuid) -> Result<Village, ApplicationError> {
        self.fetch(village_id, SELECT_VILLAGE).await
    }

    async fn get_for_update(&self, village_id: Uuid) -> Result<Village, ApplicationError> {
        self.fetch(village_id, SELECT_VILLAGE_FOR_UPDATE).await
    }

    async fn list_by_player_id(&self, player_id: Uuid) -> Result<Vec<Village>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let db_villages = sqlx::query_as::<_, db_models::Village>(
            "SELECT * FROM villages WHERE player_id = $1 ORDER BY created_at, name",
        )
        .bind(player_id)
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        if db_villages.is_empty() {
            return Ok(Vec::new());
        }

        let village_ids: Vec<Uuid> = db_villages.iter().map(|v| v.id).collect();

        let all_buildings = sqlx::query_as::<_, db_models::Building>(
            "SELECT * FROM buildings WHERE village_id = ANY($1) ORDER BY slot_id",
        )
        .bind(&village_ids)
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        drop(tx_guard);

        let mut buildings_map: HashMap<Uuid, Vec<db_models::Building>> = HashMap::new();
        for building in all_buildings {
            buildings_map
                .entry(building.village_id)
                .or_default()
                .push(building);
        }

        let mut game_villages: Vec<Village> = Vec::with_capacity(db_villages.len());
        for village in db_villages {
            let buildings = buildings_map.remove(&village.id).unwrap_or_default();
            let aggregate = VillageAggregate { village, buildings };
            game_villages.push(Village::try_from(aggregate)?);
        }

        Ok(game_villages)
    }

    async fn list_ids(&self) -> Result<Vec<Uuid>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        sqlx::query_scalar::<_, Uuid>("SELECT id FROM villages ORDER BY id")
            .fetch_all(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))
    }

    async fn save(&self, village: &Village) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let resources = village.resources();
        let stock = resources.stock();
        let production = resources.production();

        sqlx::query(
            r#"
                INSERT INTO villages (
                    id, player_id, name, population,
                    wood, clay, iron, crop,
                    wood_rate, clay_rate, iron_rate, crop_rate,
                    warehouse_capacity, granary_capacity, carry, last_update
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
                ON CONFLICT (id) DO UPDATE
                SET
                    name = $3,
                    population = $4,
                    wood = $5,
                    clay = $6,
                    iron = $7,
                    crop = $8,
                    wood_rate = $9,
                    clay_rate = $10,
                    iron_rate = $11,
                    crop_rate = $12,
                    warehouse_capacity = $13,
                    granary_capacity = $14,
                    carry = $15,
                    last_update = $16,
                    updated_at = NOW()
                "#,
        )
        .bind(village.id)
        .bind(village.player_id)
        .bind(&village.name)
        .bind(village.population as i32)
        .bind(stock.wood() as i64)
        .bind(stock.clay() as i64)
        .bind(stock.iron() as i64)
        .bind(stock.crop() as i64)
        .bind(production.wood() as i64)
        .bind(production.clay() as i64)
        .bind(production.iron() as i64)
        .bind(production.crop() as i64)
        .bind(resources.warehouse_capacity() as i64)
        .bind(resources.granary_capacity() as i64)
        .bind(Json(resources.carry()))
        .bind(resources.last_update())
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        // Idle buildings go first: only one row per village may hold a
        // construction at any time.
        let mut buildings: Vec<&BuildingInstance> = village.buildings().iter().collect();
        buildings.sort_by_key(|b| b.is_under_construction());

        for building in buildings {
            let construction = building.construction.as_ref();

            sqlx::query(
                r#"
                    INSERT INTO buildings (
                        id, village_id, slot_id, building_code, level,
                        completes_at, build_secs, paid_cost
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    ON CONFLICT (village_id, slot_id) DO UPDATE
                    SET
                        building_code = $4,
                        level = $5,
                        completes_at = $6,
                        build_secs = $7,
                        paid_cost = $8
                    "#,
            )
            .bind(building.id)
            .bind(village.id)
            .bind(building.slot_id as i16)
            .bind(building.name.code() as i16)
            .bind(building.level as i16)
            .bind(construction.map(|c| c.completes_at))
            .bind(construction.map(|c| c.build_secs as i32))
            .bind(construction.map(|c| Json(c.cost.clone())))
            .execute(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;
        }

        debug!(village_id = %village.id, "Village saved");
        Ok(())
    }
}
