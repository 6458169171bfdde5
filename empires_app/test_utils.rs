#[cfg(any(test, feature = "test-utils"))]
#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };
    use uuid::Uuid;

    use empires_core::{ApplicationError, DbError};
    use empires_game::models::village::Village;

    use crate::{
        repository::VillageRepository,
        uow::{UnitOfWork, UnitOfWorkProvider},
    };

    type VillageStore = Arc<Mutex<HashMap<Uuid, Village>>>;

    #[derive(Default, Clone)]
    pub struct MockVillageRepository {
        villages: VillageStore,
    }

    impl MockVillageRepository {
        pub fn new() -> Self {
            Default::default()
        }

        fn snapshot(&self) -> HashMap<Uuid, Village> {
            self.villages.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VillageRepository for MockVillageRepository {
        async fn get_by_id(&self, village_id: Uuid) -> Result<Village, ApplicationError> {
            let villages = self.villages.lock().unwrap();
            villages
                .get(&village_id)
                .cloned()
                .ok_or(ApplicationError::Db(DbError::VillageNotFound(village_id)))
        }

        async fn get_for_update(&self, village_id: Uuid) -> Result<Village, ApplicationError> {
            self.get_by_id(village_id).await
        }

        async fn list_by_player_id(
            &self,
            player_id: Uuid,
        ) -> Result<Vec<Village>, ApplicationError> {
            let mut villages: Vec<Village> = vec![];

            for v in self.villages.lock().unwrap().values() {
                if v.player_id == player_id {
                    villages.push(v.clone());
                }
            }
            villages.sort_by(|a, b| a.name.cmp(&b.name));

            Ok(villages)
        }

        async fn list_ids(&self) -> Result<Vec<Uuid>, ApplicationError> {
            Ok(self.villages.lock().unwrap().keys().copied().collect())
        }

        async fn save(&self, village: &Village) -> Result<(), ApplicationError> {
            self.villages
                .lock()
                .unwrap()
                .insert(village.id, village.clone());
            Ok(())
        }
    }

    /// Works on its own copy of the villages. Changes are written back to the
    /// provider's store only on commit.
    #[derive(Default)]
    pub struct MockUnitOfWork {
        villages: Arc<MockVillageRepository>,
        store: VillageStore,

        // Flags to check if commit/rollback was called
        committed: Arc<Mutex<bool>>,
        rolled_back: Arc<Mutex<bool>>,
        commits: Arc<Mutex<usize>>,
        rollbacks: Arc<Mutex<usize>>,
    }

    impl MockUnitOfWork {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn is_committed(&self) -> bool {
            *self.committed.lock().unwrap()
        }

        pub fn is_rolled_back(&self) -> bool {
            *self.rolled_back.lock().unwrap()
        }
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for MockUnitOfWork {
        fn villages(&self) -> Arc<dyn VillageRepository + 'a> {
            self.villages.clone()
        }

        async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
            *self.store.lock().unwrap() = self.villages.snapshot();
            *self.committed.lock().unwrap() = true;
            *self.commits.lock().unwrap() += 1;
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
            *self.rolled_back.lock().unwrap() = true;
            *self.rollbacks.lock().unwrap() += 1;
            Ok(())
        }
    }

    /// Hands out units of work sharing one village store, so state survives
    /// across commands like it does with a real database.
    #[derive(Default)]
    pub struct MockUnitOfWorkProvider {
        store: VillageStore,
        commits: Arc<Mutex<usize>>,
        rollbacks: Arc<Mutex<usize>>,
    }

    impl MockUnitOfWorkProvider {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn insert_village(&self, village: Village) {
            self.store.lock().unwrap().insert(village.id, village);
        }

        pub fn stored_village(&self, village_id: Uuid) -> Option<Village> {
            self.store.lock().unwrap().get(&village_id).cloned()
        }

        pub fn commits(&self) -> usize {
            *self.commits.lock().unwrap()
        }

        pub fn rollbacks(&self) -> usize {
            *self.rollbacks.lock().unwrap()
        }
    }

    #[async_trait]
    impl UnitOfWorkProvider for MockUnitOfWorkProvider {
        async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
            let villages = MockVillageRepository {
                villages: Arc::new(Mutex::new(self.store.lock().unwrap().clone())),
            };

            let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork {
                villages: Arc::new(villages),
                store: self.store.clone(),
                commits: self.commits.clone(),
                rollbacks: self.rollbacks.clone(),
                ..Default::default()
            });
            Ok(uow)
        }
    }
}
