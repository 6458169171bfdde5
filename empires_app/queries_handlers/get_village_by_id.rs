use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use empires_core::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetVillageById},
    uow::UnitOfWork,
};

pub struct GetVillageByIdHandler {}

impl GetVillageByIdHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetVillageById> for GetVillageByIdHandler {
    async fn handle(
        &self,
        query: GetVillageById,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<<GetVillageById as Query>::Output, ApplicationError> {
        let repo = uow.villages();
        let mut village = repo.get_by_id(query.id).await?;

        // Reconciled in memory only, nothing is saved
        village.advance(Utc::now(), &config.rules);
        Ok(village)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use std::sync::Arc;

    use empires_core::Result;
    use empires_game::test_utils::{VillageFactoryOptions, village_factory};
    use empires_types::common::ResourceGroup;

    use super::*;
    use crate::{test_utils::tests::MockUnitOfWork, uow::UnitOfWork};

    #[tokio::test]
    async fn test_get_village_by_id_is_up_to_date() -> Result<()> {
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let config = Arc::new(Config::default());
        let village = village_factory(VillageFactoryOptions {
            stock: Some(ResourceGroup::default()),
            now: Some(Utc::now() - Duration::hours(2)),
            ..Default::default()
        });
        mock_uow.villages().save(&village).await?;

        let fetched = GetVillageByIdHandler::new()
            .handle(GetVillageById { id: village.id }, &mock_uow, &config)
            .await?;

        assert_eq!(fetched.id, village.id);
        assert_eq!(fetched.resources().stock().wood(), 240);
        assert_eq!(fetched.resources().stock().crop(), 360);

        let stored = mock_uow.villages().get_by_id(village.id).await?;
        assert_eq!(stored, village, "Reading a village doesn't persist anything");
        Ok(())
    }
}
