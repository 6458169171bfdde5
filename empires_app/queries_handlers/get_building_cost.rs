use async_trait::async_trait;
use std::sync::Arc;

use empires_core::ApplicationError;
use empires_game::models::buildings::{calculate_construction_time, cost_for_code};

use crate::{
    config::Config,
    cqrs::{
        Query, QueryHandler,
        queries::{BuildingCost, GetBuildingCost},
    },
    uow::UnitOfWork,
};

/// Prices any building type, known or not, without touching storage.
pub struct GetBuildingCostHandler {}

impl GetBuildingCostHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetBuildingCost> for GetBuildingCostHandler {
    async fn handle(
        &self,
        query: GetBuildingCost,
        _uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetBuildingCost as Query>::Output, ApplicationError> {
        let cost = cost_for_code(query.code, query.level);
        let build_secs = calculate_construction_time(cost.time, query.main_building_level);

        Ok(BuildingCost {
            code: query.code,
            level: query.level,
            cost,
            build_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use empires_core::Result;
    use empires_types::common::ResourceGroup;

    use super::*;
    use crate::{test_utils::tests::MockUnitOfWork, uow::UnitOfWork};

    #[tokio::test]
    async fn test_get_building_cost() -> Result<()> {
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let config = Arc::new(Config::default());
        let handler = GetBuildingCostHandler::new();

        let woodcutter = handler
            .handle(
                GetBuildingCost {
                    code: 1,
                    level: 2,
                    main_building_level: 0,
                },
                &mock_uow,
                &config,
            )
            .await?;
        assert_eq!(woodcutter.cost.resources.wood(), 51);
        assert_eq!(woodcutter.build_secs, 384);

        let unknown = handler
            .handle(
                GetBuildingCost {
                    code: 99,
                    level: 1,
                    main_building_level: 10,
                },
                &mock_uow,
                &config,
            )
            .await?;
        assert_eq!(unknown.cost.resources, ResourceGroup::new(100, 100, 100, 100));
        assert_eq!(unknown.build_secs, 450);
        Ok(())
    }
}
