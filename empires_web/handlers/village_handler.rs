use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use empires_app::{
    command_handlers::FoundVillageCommandHandler,
    cqrs::{
        commands::FoundVillage,
        queries::{GetVillageById, ListVillagesByPlayerId},
    },
    queries_handlers::{GetVillageByIdHandler, ListVillagesByPlayerIdHandler},
};

use crate::{
    handlers::{ApiError, VillageView},
    http::AppState,
};

#[derive(Debug, Deserialize)]
pub struct FoundVillageRequest {
    pub player_id: Uuid,
    pub name: String,
}

/// POST /villages
pub async fn found_village(
    State(state): State<AppState>,
    Json(req): Json<FoundVillageRequest>,
) -> Result<(StatusCode, Json<VillageView>), ApiError> {
    let village_id = Uuid::new_v4();

    state
        .app_bus
        .execute(
            FoundVillage {
                village_id,
                player_id: req.player_id,
                name: req.name,
            },
            FoundVillageCommandHandler::new(),
        )
        .await?;

    let view = village_view(&state, village_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /villages/{id}
pub async fn get_village(
    State(state): State<AppState>,
    Path(village_id): Path<Uuid>,
) -> Result<Json<VillageView>, ApiError> {
    Ok(Json(village_view(&state, village_id).await?))
}

/// GET /players/{id}/villages
pub async fn list_player_villages(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
) -> Result<Json<Vec<VillageView>>, ApiError> {
    let villages = state
        .app_bus
        .query(
            ListVillagesByPlayerId { player_id },
            ListVillagesByPlayerIdHandler::new(),
        )
        .await?;

    let now = Utc::now();
    Ok(Json(
        villages.iter().map(|v| VillageView::new(v, now)).collect(),
    ))
}

pub(crate) async fn village_view(
    state: &AppState,
    village_id: Uuid,
) -> Result<VillageView, ApiError> {
    let village = state
        .app_bus
        .query(GetVillageById { id: village_id }, GetVillageByIdHandler::new())
        .await?;

    Ok(VillageView::new(&village, Utc::now()))
}
