use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use empires_core::{ApplicationError, DbError, GameError};

/// Turns application errors into JSON responses. Game rule violations keep
/// their message, anything unexpected becomes a logged 500.
#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        Self(e)
    }
}

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        Self(ApplicationError::Game(e))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ApplicationError::Game(e) => match e {
                GameError::VillageNotOwned { .. } => StatusCode::FORBIDDEN,
                GameError::UnknownBuilding(_)
                | GameError::InvalidSlot(_)
                | GameError::InvalidFieldKind { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::CONFLICT,
            },
            ApplicationError::Db(DbError::VillageNotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self.0);
            "Internal server error.".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use empires_types::buildings::BuildingName;

    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (ApiError::from(GameError::NotEnoughResources), StatusCode::CONFLICT),
            (
                ApiError::from(GameError::ConstructionInProgress),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(GameError::BuildingRequirementsNotMet {
                    building: BuildingName::RallyPoint,
                    level: 1,
                }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(GameError::UnknownBuilding(99)),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(GameError::VillageNotOwned {
                    village_id: Uuid::new_v4(),
                    player_id: Uuid::new_v4(),
                }),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::from(ApplicationError::Db(DbError::VillageNotFound(Uuid::new_v4()))),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(ApplicationError::Infrastructure("down".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status(), expected, "Wrong status for {:?}", error.0);
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
