//! SQLite storage backend for the studio admin console.
//!
//! ```rust,no_run
//! use studio_core::repositories::RepositoryProvider;
//! use studio_storage_sqlite::SqliteStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = SqliteStorage::connect("sqlite://studio.db").await?;
//! let repositories = storage.into_repository_provider();
//! repositories.migrate().await?;
//! # Ok(())
//! # }
//! ```

mod migrations;
mod repositories;

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use studio_core::{Error, error::StorageError};

pub use migrations::SqliteMigrationManager;
pub use repositories::{
    SqliteAdminRepository, SqliteRecordRepository, SqliteRepositoryProvider,
    SqliteSlotRepository, SqliteUserRepository,
};

/// A connection pool to a studio SQLite database.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `url`, creating the database file if it does not exist.
    pub async fn connect(url: &str) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, url, "Failed to connect to database");
                StorageError::Connection(e.to_string())
            })?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn into_repository_provider(self) -> SqliteRepositoryProvider {
        SqliteRepositoryProvider::new(self.pool)
    }
}

/// Maps a sqlx failure into the storage error the services expect.
pub(crate) fn database_error(e: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return Error::Storage(StorageError::Constraint(db.message().to_string()));
        }
    }
    tracing::error!(error = %e, "Database query failed");
    Error::Storage(StorageError::Database(e.to_string()))
}

/// Money columns are TEXT. Unreadable or negative amounts count as zero.
pub(crate) fn decimal_column(value: Option<&str>) -> Decimal {
    value
        .and_then(|s| Decimal::from_str(s.trim()).ok())
        .filter(|d| !d.is_sign_negative())
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;
    use studio_core::repositories::RepositoryProvider;

    use crate::SqliteRepositoryProvider;

    pub fn setup_test() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    pub async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create pool")
    }

    pub async fn migrated_provider() -> SqliteRepositoryProvider {
        setup_test();
        let provider = SqliteRepositoryProvider::new(memory_pool().await);
        provider.migrate().await.expect("Failed to migrate");
        provider
    }
}
