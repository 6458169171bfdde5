use async_trait::async_trait;
use std::sync::Arc;

use empires_core::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::ListVillageIds},
    uow::UnitOfWork,
};

pub struct ListVillageIdsHandler {}

impl ListVillageIdsHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<ListVillageIds> for ListVillageIdsHandler {
    async fn handle(
        &self,
        _query: ListVillageIds,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<ListVillageIds as Query>::Output, ApplicationError> {
        uow.villages().list_ids().await
    }
}
