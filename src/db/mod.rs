pub mod character_repo;
pub mod map_repo;
pub mod models;
pub mod pg_store;
pub mod player_repo;
pub mod result_repo;

pub use pg_store::PgLadderStore;
