//! Roster API
//!
//! An HTTP service managing users and the teams they belong to, backed by
//! either an in-memory store or PostgreSQL.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::storage::{InMemoryStore, Repositories, StorageFactory};
use tracing::info;

/// Create the application state for the configured storage backend
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config.storage_config();
    info!(storage = ?storage_config.storage_type(), "Initializing storage");

    let repos = StorageFactory::create(&storage_config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage: {}", e))?;

    Ok(AppState::from_repositories(repos))
}

/// Create an application state backed by a fresh in-memory store
pub fn create_in_memory_app_state() -> AppState {
    AppState::from_repositories(Repositories::from_store(InMemoryStore::new()))
}
