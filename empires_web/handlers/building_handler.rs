use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use empires_app::{
    cqrs::queries::{BuildingCost, GetBuildingCost},
    queries_handlers::GetBuildingCostHandler,
};

use crate::{handlers::ApiError, http::AppState};

#[derive(Debug, Deserialize)]
pub struct BuildingCostParams {
    pub level: Option<u8>,
    pub main_building_level: Option<u8>,
}

/// GET /buildings/{code}/cost?level=&main_building_level=
///
/// Unknown codes are priced with the default base cost.
pub async fn building_cost(
    State(state): State<AppState>,
    Path(code): Path<u8>,
    Query(params): Query<BuildingCostParams>,
) -> Result<Json<BuildingCost>, ApiError> {
    let cost = state
        .app_bus
        .query(
            GetBuildingCost {
                code,
                level: params.level.unwrap_or(1),
                main_building_level: params.main_building_level.unwrap_or(0),
            },
            GetBuildingCostHandler::new(),
        )
        .await?;

    Ok(Json(cost))
}
