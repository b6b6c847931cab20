use std::sync::Arc;
use tracing::info;

use crate::config::{DatabaseConfig, StoreBackend};

use super::memory::MemoryStore;
use super::postgres::PgStore;
use super::store::{RecordStore, StoreError};

/// Builds the store selected by configuration
pub struct DatabaseManager;

impl DatabaseManager {
    /// `force_memory` overrides the configured backend (the `--memory` flag)
    pub async fn connect(
        config: &DatabaseConfig,
        force_memory: bool,
    ) -> Result<Arc<dyn RecordStore>, StoreError> {
        let backend = if force_memory { StoreBackend::Memory } else { config.backend };

        match backend {
            StoreBackend::Memory => {
                info!("Using in-memory record store; data is lost on shutdown");
                Ok(Arc::new(MemoryStore::new()))
            }
            StoreBackend::Postgres => Ok(Arc::new(PgStore::connect(config).await?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend: StoreBackend) -> DatabaseConfig {
        DatabaseConfig {
            backend,
            url: None,
            max_connections: 1,
            connection_timeout: 1,
        }
    }

    #[tokio::test]
    async fn memory_backend_needs_no_url() {
        let store = DatabaseManager::connect(&config(StoreBackend::Memory), false).await.unwrap();
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn postgres_backend_requires_url() {
        let err = DatabaseManager::connect(&config(StoreBackend::Postgres), false)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::ConfigMissing("DATABASE_URL")));
    }

    #[tokio::test]
    async fn memory_flag_overrides_backend() {
        let store = DatabaseManager::connect(&config(StoreBackend::Postgres), true).await.unwrap();
        assert!(store.list_surgeries().await.unwrap().is_empty());
    }
}
