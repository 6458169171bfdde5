mod village_repository;

pub use village_repository::PostgresVillageRepository;
