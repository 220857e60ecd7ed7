//! Application state - shared across all handlers.

use std::sync::Arc;

use fintrack_core::ports::{CategoryRepository, TransactionRepository, UserRepository};
use fintrack_infra::database::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
use fintrack_infra::database::{
    PostgresCategoryRepository, PostgresTransactionRepository, PostgresUserRepository, connect,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub transactions: Arc<dyn TransactionRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(config) = db_config {
            match connect(config).await {
                Ok(conn) => {
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        transactions: Arc::new(PostgresTransactionRepository::new(conn.clone())),
                        categories: Arc::new(PostgresCategoryRepository::new(conn.clone())),
                        users: Arc::new(PostgresUserRepository::new(conn)),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repositories");
        }

        Self::in_memory()
    }

    /// State backed entirely by the in-memory store. Also used by tests.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            transactions: Arc::new(store.clone()),
            categories: Arc::new(store.clone()),
            users: Arc::new(store),
        }
    }
}
