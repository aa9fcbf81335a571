//! Versioned schema migrations shared by the storage backends.
//!
//! A backend implements [`Migration`] once per schema step and a
//! [`MigrationManager`] that records applied versions in a tracking table.

use async_trait::async_trait;
use sqlx::Database;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Migration failed: {0}")]
    Migration(String),
    #[error("Migration {version} ({name}) is out of order")]
    OutOfOrder { version: i64, name: String },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, MigrationError>;

#[async_trait]
pub trait Migration<DB: Database>: Send + Sync {
    /// Apply the schema step.
    async fn up<'a>(&'a self, conn: &'a mut <DB as Database>::Connection) -> Result<()>;

    /// Undo the schema step.
    async fn down<'a>(&'a self, conn: &'a mut <DB as Database>::Connection) -> Result<()>;

    /// Strictly increasing across a backend's migration list.
    fn version(&self) -> i64;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    /// Unix seconds.
    pub applied_at: i64,
}

#[async_trait]
pub trait MigrationManager<DB: Database>: Send + Sync {
    fn get_migration_table_name(&self) -> &str {
        "_studio_migrations"
    }

    /// Create the tracking table if it is missing.
    async fn initialize(&self) -> Result<()>;

    /// Apply every migration not yet recorded, in version order.
    async fn up(&self, migrations: &[Box<dyn Migration<DB>>]) -> Result<()>;

    /// Roll back every recorded migration, newest first.
    async fn down(&self, migrations: &[Box<dyn Migration<DB>>]) -> Result<()>;

    async fn get_applied_migrations(&self) -> Result<Vec<MigrationRecord>>;

    async fn is_applied(&self, version: i64) -> Result<bool>;
}

/// Checks that versions strictly increase.
pub fn check_order<DB: Database>(migrations: &[Box<dyn Migration<DB>>]) -> Result<()> {
    for pair in migrations.windows(2) {
        if pair[1].version() <= pair[0].version() {
            return Err(MigrationError::OutOfOrder {
                version: pair[1].version(),
                name: pair[1].name().to_string(),
            });
        }
    }
    Ok(())
}
