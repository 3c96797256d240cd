use serde::Deserialize;

use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Storage backend selection and connection pool settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageType,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        let pool = PostgresConfig::default();

        Self {
            backend: StorageType::default(),
            database_url: None,
            max_connections: pool.max_connections,
            min_connections: pool.min_connections,
            connect_timeout_secs: pool.connect_timeout_secs,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_env(None)
    }

    /// Load configuration, reading variables from `vars` instead of the
    /// process environment when given
    fn load_from_env(
        vars: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let database_url = match &vars {
            Some(vars) => vars.get("DATABASE_URL").cloned(),
            None => std::env::var("DATABASE_URL").ok(),
        };

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;
        app_config.override_database_url(database_url);

        Ok(app_config)
    }

    /// A non-empty `DATABASE_URL` wins over the configured URL
    pub fn override_database_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.storage.database_url = Some(url);
        }
    }

    /// Build the storage configuration for the selected backend
    pub fn storage_config(&self) -> StorageConfig {
        match self.storage.backend {
            StorageType::InMemory => StorageConfig::in_memory(),
            StorageType::Postgres => {
                let settings = &self.storage;
                let url = settings
                    .database_url
                    .clone()
                    .unwrap_or_else(|| PostgresConfig::default().url);

                StorageConfig::postgres(
                    PostgresConfig::new(url)
                        .with_max_connections(settings.max_connections)
                        .with_min_connections(settings.min_connections)
                        .with_connect_timeout(settings.connect_timeout_secs),
                )
            }
        }
    }
}
