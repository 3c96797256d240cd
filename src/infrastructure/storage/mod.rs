//! Storage infrastructure - Repository implementations per backend

mod factory;
mod in_memory;
mod postgres;

pub use factory::{Repositories, StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryStore;
pub use postgres::{PostgresConfig, PostgresStore};
