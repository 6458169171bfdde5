use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use uuid::Uuid;

use empires_app::{
    command_handlers::{CancelConstructionCommandHandler, StartConstructionCommandHandler},
    cqrs::commands::{CancelConstruction, StartConstruction},
};
use empires_core::GameError;
use empires_types::buildings::BuildingName;

use crate::{
    handlers::{ApiError, VillageView, village_handler::village_view},
    http::AppState,
};

#[derive(Debug, Deserialize)]
pub struct StartConstructionRequest {
    pub player_id: Uuid,
    pub slot_id: u8,
    /// Building type code.
    pub building: u8,
}

#[derive(Debug, Deserialize)]
pub struct CancelConstructionRequest {
    pub player_id: Uuid,
}

/// POST /villages/{id}/constructions
pub async fn start_construction(
    State(state): State<AppState>,
    Path(village_id): Path<Uuid>,
    Json(req): Json<StartConstructionRequest>,
) -> Result<Json<VillageView>, ApiError> {
    let building =
        BuildingName::from_code(req.building).ok_or(GameError::UnknownBuilding(req.building))?;

    state
        .app_bus
        .execute(
            StartConstruction {
                player_id: req.player_id,
                village_id,
                slot_id: req.slot_id,
                building,
            },
            StartConstructionCommandHandler::new(),
        )
        .await?;

    Ok(Json(village_view(&state, village_id).await?))
}

/// DELETE /villages/{id}/constructions
pub async fn cancel_construction(
    State(state): State<AppState>,
    Path(village_id): Path<Uuid>,
    Json(req): Json<CancelConstructionRequest>,
) -> Result<Json<VillageView>, ApiError> {
    state
        .app_bus
        .execute(
            CancelConstruction {
                player_id: req.player_id,
                village_id,
            },
            CancelConstructionCommandHandler::new(),
        )
        .await?;

    Ok(Json(village_view(&state, village_id).await?))
}
