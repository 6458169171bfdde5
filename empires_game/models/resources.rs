use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use empires_types::common::{ResourceGroup, ResourceKind};

use crate::{
    catalog::{BuildingRole, StorageKind},
    models::buildings::{BASE_STORAGE_CAPACITY, BuildingInstance, get_storage_capacity},
    rules::{EconomyRules, StorageRule},
};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Resource stock of a village, with hourly rates and storage caps.
///
/// Wood, clay and iron are bounded by the warehouse capacity, crop by the
/// granary capacity. A resource never stays above its cap: lowering a cap
/// discards the excess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VillageResources {
    pub village_id: Uuid,
    stock: ResourceGroup,
    production: ResourceGroup,
    warehouse_capacity: u32,
    granary_capacity: u32,
    last_update: DateTime<Utc>,
    /// Fractions of a unit accrued but not credited yet, per resource.
    carry: [f64; 4],
}

impl VillageResources {
    pub fn new(village_id: Uuid, stock: ResourceGroup, now: DateTime<Utc>) -> Self {
        let mut resources = Self {
            village_id,
            stock: ResourceGroup::default(),
            production: ResourceGroup::default(),
            warehouse_capacity: BASE_STORAGE_CAPACITY,
            granary_capacity: BASE_STORAGE_CAPACITY,
            last_update: now,
            carry: [0.0; 4],
        };
        resources.store(&stock);
        resources
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        village_id: Uuid,
        stock: ResourceGroup,
        production: ResourceGroup,
        warehouse_capacity: u32,
        granary_capacity: u32,
        last_update: DateTime<Utc>,
        carry: [f64; 4],
    ) -> Self {
        Self {
            village_id,
            stock,
            production,
            warehouse_capacity,
            granary_capacity,
            last_update,
            carry,
        }
    }

    pub fn stock(&self) -> ResourceGroup {
        self.stock
    }

    /// Hourly production rates.
    pub fn production(&self) -> ResourceGroup {
        self.production
    }

    pub fn warehouse_capacity(&self) -> u32 {
        self.warehouse_capacity
    }

    pub fn granary_capacity(&self) -> u32 {
        self.granary_capacity
    }

    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    pub fn carry(&self) -> [f64; 4] {
        self.carry
    }

    pub fn capacity_for(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Crop => self.granary_capacity,
            _ => self.warehouse_capacity,
        }
    }

    /// Credits production for the time elapsed since the last update.
    /// Calls with a `now` at or before the last update only enforce the caps.
    pub fn reconcile(&mut self, now: DateTime<Utc>) {
        self.clamp_to_capacity();
        if now <= self.last_update {
            return;
        }
        let elapsed_ms = (now - self.last_update).num_milliseconds() as f64;

        for (idx, kind) in ResourceKind::ALL.into_iter().enumerate() {
            let cap = self.capacity_for(kind);
            let amount = self.stock.get(kind);

            if amount >= cap {
                self.carry[idx] = 0.0;
                continue;
            }

            let accrued =
                self.production.get(kind) as f64 * elapsed_ms / MILLIS_PER_HOUR + self.carry[idx];
            let whole = accrued.floor();
            let credited = amount.saturating_add(whole as u32).min(cap);

            *self.stock.get_mut(kind) = credited;
            self.carry[idx] = if credited == cap { 0.0 } else { accrued - whole };
        }

        self.last_update = now;
    }

    /// Debits `cost` only if every resource covers it. Returns whether it did.
    pub fn try_spend(&mut self, cost: &ResourceGroup) -> bool {
        if !self.stock.covers(cost) {
            return false;
        }

        self.stock = ResourceGroup::new(
            self.stock.wood() - cost.wood(),
            self.stock.clay() - cost.clay(),
            self.stock.iron() - cost.iron(),
            self.stock.crop() - cost.crop(),
        );
        true
    }

    /// Gives back `floor(cost * fraction)` of each resource. Whatever doesn't
    /// fit in storage is lost.
    pub fn refund(&mut self, cost: &ResourceGroup, fraction: f64) {
        let refund = *cost * fraction.clamp(0.0, 1.0);
        self.store(&refund);
    }

    /// Adds resources, capped at storage capacity.
    pub fn store(&mut self, resources: &ResourceGroup) {
        for kind in ResourceKind::ALL {
            let cap = self.capacity_for(kind);
            let amount = self.stock.get(kind);
            *self.stock.get_mut(kind) = amount.saturating_add(resources.get(kind)).min(cap);
        }
    }

    /// Derives rates and caps from the village buildings.
    pub fn recompute_rates(&mut self, buildings: &[BuildingInstance], rules: &EconomyRules) {
        let mut production = ResourceGroup::default();
        let mut warehouse = 0;
        let mut granary = 0;

        for b in buildings {
            match b.definition().role {
                BuildingRole::ResourceProducer(kind) => {
                    *production.get_mut(kind) += b.production(rules.production);
                }
                // unbuilt storage doesn't count
                BuildingRole::Storage(kind) if b.level > 0 => {
                    let capacity = get_storage_capacity(b.name, b.level);
                    let total = match kind {
                        StorageKind::Warehouse => &mut warehouse,
                        StorageKind::Granary => &mut granary,
                    };
                    *total = match rules.storage {
                        StorageRule::Max => (*total).max(capacity),
                        StorageRule::Sum => *total + capacity,
                    };
                }
                _ => continue,
            }
        }

        self.production = production;
        self.warehouse_capacity = warehouse.max(BASE_STORAGE_CAPACITY);
        self.granary_capacity = granary.max(BASE_STORAGE_CAPACITY);
        self.clamp_to_capacity();
    }

    fn clamp_to_capacity(&mut self) {
        for (idx, kind) in ResourceKind::ALL.into_iter().enumerate() {
            let cap = self.capacity_for(kind);
            if self.stock.get(kind) >= cap {
                *self.stock.get_mut(kind) = cap;
                self.carry[idx] = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use empires_types::buildings::BuildingName;

    use super::*;
    use crate::rules::ProductionFormula;

    fn ledger(stock: ResourceGroup, rates: ResourceGroup) -> (VillageResources, DateTime<Utc>) {
        let now = Utc::now();
        let resources = VillageResources::from_persistence(
            Uuid::new_v4(),
            stock,
            rates,
            800,
            800,
            now,
            [0.0; 4],
        );
        (resources, now)
    }

    fn building(name: BuildingName, slot_id: u8, level: u8) -> BuildingInstance {
        BuildingInstance::new(Uuid::new_v4(), name, slot_id).with_level(level)
    }

    #[test]
    fn test_reconcile_accrues_hourly_rates() {
        let (mut res, t0) = ledger(
            ResourceGroup::new(0, 0, 0, 0),
            ResourceGroup::new(55, 30, 80, 100),
        );

        res.reconcile(t0 + Duration::hours(1));
        assert_eq!(res.stock(), ResourceGroup::new(55, 30, 80, 100));

        res.reconcile(t0 + Duration::minutes(90));
        assert_eq!(
            res.stock(),
            ResourceGroup::new(82, 45, 120, 150),
            "Half an hour more should add half the hourly rate"
        );
        assert_eq!(res.last_update(), t0 + Duration::minutes(90));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let (mut res, t0) = ledger(
            ResourceGroup::new(10, 10, 10, 10),
            ResourceGroup::new(55, 55, 55, 55),
        );
        let now = t0 + Duration::minutes(37);

        res.reconcile(now);
        let after_first = res.clone();
        res.reconcile(now);

        assert_eq!(res, after_first, "Second reconcile with same time must be a no-op");
    }

    #[test]
    fn test_reconcile_never_moves_backwards() {
        let (mut res, t0) = ledger(
            ResourceGroup::new(10, 10, 10, 10),
            ResourceGroup::new(55, 55, 55, 55),
        );

        res.reconcile(t0 - Duration::hours(2));
        assert_eq!(res.stock(), ResourceGroup::new(10, 10, 10, 10));
        assert_eq!(res.last_update(), t0);
    }

    #[test]
    fn test_reconcile_respects_caps() {
        let (mut res, t0) = ledger(
            ResourceGroup::new(0, 0, 0, 0),
            ResourceGroup::new(55, 55, 55, 55),
        );

        res.reconcile(t0 + Duration::hours(100));
        assert_eq!(res.stock(), ResourceGroup::new(800, 800, 800, 800));

        res.reconcile(t0 + Duration::hours(200));
        assert_eq!(res.stock(), ResourceGroup::new(800, 800, 800, 800));
    }

    #[test]
    fn test_reconcile_clamps_stock_loaded_above_cap() {
        let now = Utc::now();
        let mut res = VillageResources::from_persistence(
            Uuid::new_v4(),
            ResourceGroup::new(900, 10, 10, 10),
            ResourceGroup::new(55, 55, 55, 55),
            800,
            800,
            now,
            [0.0; 4],
        );

        res.reconcile(now);
        assert_eq!(res.stock().wood(), 800);

        res.reconcile(now + Duration::hours(1));
        assert_eq!(res.stock().wood(), 800);
        assert_eq!(res.stock().clay(), 65);
    }

    #[test]
    fn test_lowering_storage_cap_discards_excess() {
        let (mut res, t0) = ledger(ResourceGroup::default(), ResourceGroup::default());
        let buildings = vec![
            building(BuildingName::Warehouse, 20, 1),
            building(BuildingName::Warehouse, 21, 1),
        ];
        let sum = EconomyRules {
            storage: StorageRule::Sum,
            ..EconomyRules::default()
        };

        res.recompute_rates(&buildings, &sum);
        res.store(&ResourceGroup::new(3500, 0, 0, 0));
        assert_eq!(res.warehouse_capacity(), 4000);
        assert_eq!(res.stock().wood(), 3500);

        res.recompute_rates(&buildings, &EconomyRules::default());
        assert_eq!(res.warehouse_capacity(), 2000);
        assert_eq!(res.stock().wood(), 2000);

        res.reconcile(t0 + Duration::hours(1));
        assert!(res.stock().wood() <= res.warehouse_capacity());
    }

    #[test]
    fn test_frequent_reconciles_dont_lose_production() {
        let (mut res, t0) = ledger(
            ResourceGroup::new(0, 0, 0, 0),
            ResourceGroup::new(30, 30, 30, 30),
        );

        // 30/h is a quarter unit every 30 seconds
        for tick in 1..=120 {
            res.reconcile(t0 + Duration::seconds(30 * tick));
        }

        assert_eq!(res.stock(), ResourceGroup::new(30, 30, 30, 30));
    }

    #[test]
    fn test_try_spend_is_all_or_nothing() {
        let (mut res, _) = ledger(
            ResourceGroup::new(100, 150, 100, 100),
            ResourceGroup::default(),
        );

        assert!(res.try_spend(&ResourceGroup::new(40, 100, 50, 60)));
        assert_eq!(res.stock(), ResourceGroup::new(60, 50, 50, 40));

        assert!(!res.try_spend(&ResourceGroup::new(10, 10, 10, 41)));
        assert_eq!(
            res.stock(),
            ResourceGroup::new(60, 50, 50, 40),
            "A failed spend must not touch any resource"
        );
    }

    #[test]
    fn test_refund_is_floored_and_capped() {
        let (mut res, _) = ledger(
            ResourceGroup::new(100, 790, 0, 0),
            ResourceGroup::default(),
        );

        res.refund(&ResourceGroup::new(45, 100, 51, 0), 0.8);
        assert_eq!(res.stock(), ResourceGroup::new(136, 800, 40, 0));

        res.refund(&ResourceGroup::new(10, 10, 10, 10), 3.0);
        assert_eq!(
            res.stock(),
            ResourceGroup::new(146, 800, 50, 10),
            "Refund fraction is clamped to the full cost"
        );
    }

    #[test]
    fn test_recompute_rates_uses_max_storage_by_default() {
        let (mut res, _) = ledger(ResourceGroup::default(), ResourceGroup::default());
        let buildings = vec![
            building(BuildingName::Woodcutter, 1, 1),
            building(BuildingName::Woodcutter, 2, 0),
            building(BuildingName::Cropland, 13, 2),
            building(BuildingName::Warehouse, 20, 1),
            building(BuildingName::Warehouse, 21, 3),
            building(BuildingName::Granary, 22, 0),
            building(BuildingName::MainBuilding, 19, 5),
        ];

        res.recompute_rates(&buildings, &EconomyRules::default());

        assert_eq!(res.production(), ResourceGroup::new(85, 0, 0, 80));
        assert_eq!(res.warehouse_capacity(), 4400);
        assert_eq!(
            res.granary_capacity(),
            800,
            "Level 0 granary must leave the base capacity"
        );
    }

    #[test]
    fn test_recompute_rates_with_sum_storage_and_exponential_production() {
        let (mut res, _) = ledger(ResourceGroup::default(), ResourceGroup::default());
        let buildings = vec![
            building(BuildingName::IronMine, 9, 3),
            building(BuildingName::Granary, 20, 1),
            building(BuildingName::Granary, 21, 1),
        ];
        let rules = EconomyRules {
            production: ProductionFormula::Exponential,
            storage: StorageRule::Sum,
        };

        res.recompute_rates(&buildings, &rules);

        assert_eq!(res.production(), ResourceGroup::new(0, 0, 13, 0));
        assert_eq!(res.granary_capacity(), 4000);
        assert_eq!(res.warehouse_capacity(), 800);
    }

    #[test]
    fn test_new_caps_initial_stock() {
        let res = VillageResources::new(
            Uuid::new_v4(),
            ResourceGroup::new(750, 900, 0, 800),
            Utc::now(),
        );
        assert_eq!(res.stock(), ResourceGroup::new(750, 800, 0, 800));
    }
}
