//! Repository implementations for SQLite storage

pub mod admin;
pub mod record;
pub mod slot;
pub mod user;

pub use admin::SqliteAdminRepository;
pub use record::SqliteRecordRepository;
pub use slot::SqliteSlotRepository;
pub use user::SqliteUserRepository;

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use studio_core::{
    Error,
    error::StorageError,
    repositories::{
        AdminRepositoryProvider, RecordRepositoryProvider, RepositoryProvider,
        SlotRepositoryProvider, UserRepositoryProvider,
    },
};
use studio_migration::MigrationManager;

use crate::migrations::{self, SqliteMigrationManager};

/// Repository provider implementation for SQLite
///
/// This struct implements all the individual repository provider traits
/// as well as the unified `RepositoryProvider` trait.
pub struct SqliteRepositoryProvider {
    pool: SqlitePool,
    records: Arc<SqliteRecordRepository>,
    users: Arc<SqliteUserRepository>,
    admins: Arc<SqliteAdminRepository>,
    slots: Arc<SqliteSlotRepository>,
}

impl SqliteRepositoryProvider {
    pub fn new(pool: SqlitePool) -> Self {
        let records = Arc::new(SqliteRecordRepository::new(pool.clone()));
        let users = Arc::new(SqliteUserRepository::new(pool.clone()));
        let admins = Arc::new(SqliteAdminRepository::new(pool.clone()));
        let slots = Arc::new(SqliteSlotRepository::new(pool.clone()));

        Self {
            pool,
            records,
            users,
            admins,
            slots,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl RecordRepositoryProvider for SqliteRepositoryProvider {
    type RecordRepo = SqliteRecordRepository;

    fn records(&self) -> &Self::RecordRepo {
        &self.records
    }
}

impl UserRepositoryProvider for SqliteRepositoryProvider {
    type UserRepo = SqliteUserRepository;

    fn users(&self) -> &Self::UserRepo {
        &self.users
    }
}

impl AdminRepositoryProvider for SqliteRepositoryProvider {
    type AdminRepo = SqliteAdminRepository;

    fn admins(&self) -> &Self::AdminRepo {
        &self.admins
    }
}

impl SlotRepositoryProvider for SqliteRepositoryProvider {
    type SlotRepo = SqliteSlotRepository;

    fn slots(&self) -> &Self::SlotRepo {
        &self.slots
    }
}

#[async_trait]
impl RepositoryProvider for SqliteRepositoryProvider {
    async fn migrate(&self) -> Result<(), Error> {
        let manager = SqliteMigrationManager::new(self.pool.clone());
        manager.initialize().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to initialize migrations");
            Error::Storage(StorageError::Migration(
                "Failed to initialize migrations".to_string(),
            ))
        })?;

        manager.up(&migrations::all()).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to run migrations");
            Error::Storage(StorageError::Migration(
                "Failed to run migrations".to_string(),
            ))
        })?;

        Ok(())
    }

    async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;
        Ok(())
    }
}
