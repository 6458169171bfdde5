use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use empires_core::ApplicationError;

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::AdvanceVillage},
    uow::UnitOfWork,
};

pub struct AdvanceVillageCommandHandler {}

impl Default for AdvanceVillageCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvanceVillageCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<AdvanceVillage> for AdvanceVillageCommandHandler {
    #[instrument(skip_all, fields(village_id = %command.village_id))]
    async fn handle(
        &self,
        command: AdvanceVillage,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<(), ApplicationError> {
        let village_repo = uow.villages();
        let mut village = village_repo.get_for_update(command.village_id).await?;

        match village.advance(Utc::now(), &config.rules) {
            Some(completed) => info!(
                slot_id = completed.slot_id,
                building = %completed.name,
                level = completed.level,
                "Construction completed"
            ),
            None => debug!("Village reconciled"),
        }

        village_repo.save(&village).await?;
        Ok(())
    }
}
