use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use empires_core::ApplicationError;

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::CancelConstruction},
    uow::UnitOfWork,
};

pub struct CancelConstructionCommandHandler {}

impl Default for CancelConstructionCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelConstructionCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CancelConstruction> for CancelConstructionCommandHandler {
    #[instrument(skip_all, fields(village_id = %command.village_id))]
    async fn handle(
        &self,
        command: CancelConstruction,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<(), ApplicationError> {
        let village_repo = uow.villages();
        let mut village = village_repo.get_for_update(command.village_id).await?;
        village.ensure_owned_by(command.player_id)?;

        let cancelled = village.cancel_construction(Utc::now(), &config.rules)?;
        village_repo.save(&village).await?;

        info!(
            slot_id = cancelled.slot_id,
            building = %cancelled.name,
            "Construction cancelled"
        );
        Ok(())
    }
}
