use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Village {
    pub id: Uuid,
    pub player_id: Uuid,
    pub name: String,
    pub population: i32,
    pub wood: i64,
    pub clay: i64,
    pub iron: i64,
    pub crop: i64,
    pub wood_rate: i64,
    pub clay_rate: i64,
    pub iron_rate: i64,
    pub crop_rate: i64,
    pub warehouse_capacity: i64,
    pub granary_capacity: i64,
    pub carry: serde_json::Value,
    pub last_update: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Building {
    pub id: Uuid,
    pub village_id: Uuid,
    pub slot_id: i16,
    pub building_code: i16,
    pub level: i16,
    pub completes_at: Option<DateTime<Utc>>,
    pub build_secs: Option<i32>,
    pub paid_cost: Option<serde_json::Value>,
}
