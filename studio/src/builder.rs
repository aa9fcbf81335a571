//! Builder pattern for constructing Studio instances
//!
//! This module provides a type-safe builder for creating [`Studio`] instances with
//! compile-time validation of storage configuration.
//!
//! # Example
//!
//! ```rust,no_run
//! use studio::StudioBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let studio = StudioBuilder::new()
//!         .with_sqlite("sqlite::memory:")
//!         .await?
//!         .apply_migrations(true)
//!         .build()
//!         .await?;
//!
//!     let summary = studio.payment_summary().await?;
//!     println!("{summary:?}");
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use studio_core::{LockoutConfig, repositories::RepositoryProvider};

use crate::Studio;

/// Errors that can occur when building a Studio instance.
#[derive(Debug, thiserror::Error)]
pub enum StudioBuilderError {
    /// Failed to connect to storage backend
    #[error("Storage connection failed: {0}")]
    StorageConnection(String),

    /// Failed to run database migrations
    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Marker type indicating no storage has been configured yet.
pub struct NoStorage;

/// Marker type indicating storage has been configured.
pub struct WithStorage<R: RepositoryProvider> {
    repositories: Arc<R>,
}

/// A type-safe builder for constructing [`Studio`] instances.
///
/// Storage must be configured before [`build`](StudioBuilder::build) is
/// available.
pub struct StudioBuilder<Storage> {
    storage: Storage,
    lockout_config: LockoutConfig,
    apply_migrations: bool,
}

impl Default for StudioBuilder<NoStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl StudioBuilder<NoStorage> {
    /// Create a new builder with default configuration.
    ///
    /// # Defaults
    ///
    /// - Lockout: 3 attempts, 30 second lock
    /// - Apply migrations: false
    pub fn new() -> Self {
        Self {
            storage: NoStorage,
            lockout_config: LockoutConfig::default(),
            apply_migrations: false,
        }
    }

    /// Use an already constructed repository provider.
    pub fn with_repositories<R: RepositoryProvider>(
        self,
        repositories: Arc<R>,
    ) -> StudioBuilder<WithStorage<R>> {
        StudioBuilder {
            storage: WithStorage { repositories },
            lockout_config: self.lockout_config,
            apply_migrations: self.apply_migrations,
        }
    }
}

#[cfg(feature = "sqlite")]
impl StudioBuilder<NoStorage> {
    /// Configure SQLite storage by connecting to the given URL.
    ///
    /// The database file is created if it does not exist.
    ///
    /// # Arguments
    ///
    /// * `url` - SQLite connection URL (e.g., "sqlite::memory:" or "sqlite://path/to/db.sqlite")
    pub async fn with_sqlite(
        self,
        url: &str,
    ) -> Result<StudioBuilder<WithStorage<crate::sqlite::SqliteRepositoryProvider>>, StudioBuilderError>
    {
        let storage = crate::sqlite::SqliteStorage::connect(url)
            .await
            .map_err(|e| StudioBuilderError::StorageConnection(e.to_string()))?;

        Ok(self.with_repositories(Arc::new(storage.into_repository_provider())))
    }

    /// Configure SQLite storage with an existing connection pool.
    pub fn with_sqlite_pool(
        self,
        pool: sqlx::SqlitePool,
    ) -> StudioBuilder<WithStorage<crate::sqlite::SqliteRepositoryProvider>> {
        self.with_repositories(Arc::new(crate::sqlite::SqliteRepositoryProvider::new(pool)))
    }
}

impl<R: RepositoryProvider> StudioBuilder<WithStorage<R>> {
    /// Configure the login lockout.
    ///
    /// Default: 3 attempts and a 30 second lock
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use studio::{LockoutConfig, StudioBuilder};
    /// use chrono::Duration;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let studio = StudioBuilder::new()
    ///     .with_sqlite("sqlite::memory:")
    ///     .await?
    ///     .with_lockout_config(LockoutConfig::new(5, Duration::minutes(2)))
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_lockout_config(mut self, config: LockoutConfig) -> Self {
        self.lockout_config = config;
        self
    }

    /// Set whether to apply database migrations during build.
    ///
    /// Default: false
    pub fn apply_migrations(mut self, apply: bool) -> Self {
        self.apply_migrations = apply;
        self
    }

    /// Build the Studio instance, running migrations first when requested.
    pub async fn build(self) -> Result<Studio<R>, StudioBuilderError> {
        if self.apply_migrations {
            self.storage
                .repositories
                .migrate()
                .await
                .map_err(|e| StudioBuilderError::Migration(e.to_string()))?;
        }

        Ok(Studio::new(self.storage.repositories).with_lockout_config(self.lockout_config))
    }
}
