use async_trait::async_trait;
use empires_core::ApplicationError;
use std::sync::Arc;

use crate::{config::Config, uow::UnitOfWork};

/// A marker trait for Command structs.
/// Commands are operations that change the state of a village.
pub trait Command: Send + Sync {}

/// A trait for handlers that execute Commands.
/// It receives the command and the Unit of Work to use.
/// It must NOT commit or roll back; that is the job of the AppBus.
#[async_trait]
pub trait CommandHandler<C: Command> {
    async fn handle(
        &self,
        cmd: C,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<(), ApplicationError>;
}
