#[cfg(test)]
pub mod tests {
    use reqwest::Client;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    use empires_app::{
        app::AppBus, config::Config, test_utils::tests::MockUnitOfWorkProvider,
        workers::EconomyWorker,
    };
    use empires_core::{ApplicationError, Result};
    use empires_web::{AppState, WebRouter};

    #[allow(dead_code)]
    pub fn setup_app() -> (Arc<AppBus>, Arc<EconomyWorker>, Arc<MockUnitOfWorkProvider>) {
        let config = Arc::new(Config::default());
        let uow_provider = Arc::new(MockUnitOfWorkProvider::new());
        let app_bus = Arc::new(AppBus::new(config, uow_provider.clone()));
        let worker = Arc::new(EconomyWorker::new(app_bus.clone()));

        (app_bus, worker, uow_provider)
    }

    /// Starts the HTTP API on an ephemeral port. Returns a client and the base url.
    #[allow(dead_code)]
    pub async fn setup_web_app() -> Result<(Client, String, Arc<MockUnitOfWorkProvider>)> {
        let (app_bus, _, uow_provider) = setup_app();
        let state = AppState::new(app_bus);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;
        tokio::spawn(WebRouter::serve_with_listener(state, listener));

        Ok((Client::new(), format!("http://{addr}"), uow_provider))
    }
}
