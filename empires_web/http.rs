use axum::{
    Router,
    routing::{get, post},
};
use std::{io::Error, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use empires_app::app::AppBus;
use empires_core::{ApplicationError, Result};

use crate::handlers::{
    building_cost, cancel_construction, found_village, get_village, list_player_villages,
    start_construction,
};

#[derive(Clone)]
pub struct AppState {
    pub app_bus: Arc<AppBus>,
}

impl AppState {
    pub fn new(app_bus: Arc<AppBus>) -> AppState {
        AppState { app_bus }
    }
}

pub struct WebRouter {}

impl WebRouter {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/villages", post(found_village))
            .route("/villages/{id}", get(get_village))
            .route(
                "/villages/{id}/constructions",
                post(start_construction).delete(cancel_construction),
            )
            .route("/players/{id}/villages", get(list_player_villages))
            .route("/buildings/{code}/cost", get(building_cost))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(state: AppState, port: u16) -> Result<(), ApplicationError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(infra_error)?;

        Self::serve_with_listener(state, listener).await
    }

    /// Serves on an already bound listener, e.g. one on an ephemeral port.
    pub async fn serve_with_listener(
        state: AppState,
        listener: TcpListener,
    ) -> Result<(), ApplicationError> {
        let addr = listener.local_addr().map_err(infra_error)?;
        tracing::info!("HTTP Server started, listening on http://{addr}");

        axum::serve(listener, Self::router(state))
            .await
            .map_err(infra_error)?;

        Ok(())
    }
}

fn infra_error(e: Error) -> ApplicationError {
    let err = format!("{:#?}", e);
    ApplicationError::Infrastructure(err)
}
