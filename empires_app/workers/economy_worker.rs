use std::{sync::Arc, time::Duration};
use tokio::time;
use tracing::{error, info, instrument, warn};

use empires_core::ApplicationError;

use crate::{
    app::AppBus,
    command_handlers::AdvanceVillageCommandHandler,
    cqrs::{commands::AdvanceVillage, queries::ListVillageIds},
    queries_handlers::ListVillageIdsHandler,
};

/// Periodically brings every village up to date, so constructions complete
/// and stocks grow even when nobody looks at the village.
pub struct EconomyWorker {
    app_bus: Arc<AppBus>,
    interval: Duration,
}

impl EconomyWorker {
    pub fn new(app_bus: Arc<AppBus>) -> Self {
        let interval = Duration::from_secs(app_bus.config().sweep_interval_secs);
        Self { app_bus, interval }
    }

    /// Run worker loop inside a tokio task.
    pub fn run(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = time::interval(self.interval);
            interval.set_missed_tick_behavior(time::MissedTickBehavior::Skip);
            info!(every_secs = self.interval.as_secs(), "Economy worker started.");

            loop {
                interval.tick().await;
                if let Err(e) = self.sweep().await {
                    error!("Error while sweeping villages: {e}");
                }
            }
        });
    }

    /// Advances every village, each in its own transaction. A village that
    /// fails is logged and skipped. Returns how many villages were advanced.
    #[instrument(skip(self))]
    pub async fn sweep(&self) -> Result<usize, ApplicationError> {
        let village_ids = self
            .app_bus
            .query(ListVillageIds, ListVillageIdsHandler::new())
            .await?;

        let mut advanced = 0;
        for village_id in village_ids {
            let result = self
                .app_bus
                .execute(
                    AdvanceVillage { village_id },
                    AdvanceVillageCommandHandler::new(),
                )
                .await;

            match result {
                Ok(()) => advanced += 1,
                Err(e) => warn!(%village_id, "Village not advanced: {e}"),
            }
        }

        Ok(advanced)
    }
}
