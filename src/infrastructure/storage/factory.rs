//! Storage factory for runtime storage selection

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::team::TeamRepository;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;

use super::in_memory::InMemoryStore;
use super::postgres::{PostgresConfig, PostgresStore};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    #[default]
    #[serde(rename = "memory", alias = "inmemory", alias = "in-memory", alias = "in_memory")]
    InMemory,
    /// PostgreSQL storage
    #[serde(alias = "postgresql", alias = "pg")]
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a PostgreSQL storage configuration
    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    /// Creates a PostgreSQL configuration from a URL
    pub fn postgres_url(url: impl Into<String>) -> Self {
        Self::Postgres(PostgresConfig::new(url))
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// The repositories backing the services, sharing one underlying store
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub teams: Arc<dyn TeamRepository>,
}

impl Repositories {
    /// Both repositories served by a single store object
    pub fn from_store<S>(store: S) -> Self
    where
        S: UserRepository + TeamRepository + 'static,
    {
        let store = Arc::new(store);

        Self {
            users: store.clone(),
            teams: store,
        }
    }
}

/// Factory for creating storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the repositories for the configured backend
    pub async fn create(config: &StorageConfig) -> Result<Repositories, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory storage");
                Ok(Repositories::from_store(InMemoryStore::new()))
            }
            StorageConfig::Postgres(pg_config) => {
                info!("Connecting to PostgreSQL...");
                let store = Self::create_postgres(pg_config).await?;
                info!("PostgreSQL connection established");
                Ok(Repositories::from_store(store))
            }
        }
    }

    /// Creates a PostgreSQL store and makes sure its tables exist
    pub async fn create_postgres(config: &PostgresConfig) -> Result<PostgresStore, DomainError> {
        let store = PostgresStore::connect(config).await?;
        store.ensure_schema().await?;
        Ok(store)
    }
}
