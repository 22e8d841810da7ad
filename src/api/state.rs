//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{BlobStore, Database};
use crate::services::{ServiceContainer, Services};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// All application services
    pub services: Arc<dyn ServiceContainer>,
    pub config: Config,
    /// Database handle for health checks. Absent when services are injected.
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state from a database connection, config and blob store.
    pub fn from_config(
        database: Arc<Database>,
        config: Config,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        let services = Arc::new(Services::from_connection(
            database.get_connection(),
            config.clone(),
            blob_store,
        ));

        Self {
            services,
            config,
            database: Some(database),
        }
    }

    /// Create application state with manually injected services.
    pub fn new(services: Arc<dyn ServiceContainer>, config: Config) -> Self {
        Self {
            services,
            config,
            database: None,
        }
    }

    /// Attach a database handle for the health endpoint.
    pub fn with_database(mut self, database: Arc<Database>) -> Self {
        self.database = Some(database);
        self
    }
}
