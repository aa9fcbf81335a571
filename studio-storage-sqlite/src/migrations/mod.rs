use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Database, Sqlite, SqlitePool};
use studio_migration::{Migration, MigrationError, MigrationManager, MigrationRecord, check_order};

pub struct SqliteMigrationManager {
    pool: SqlitePool,
}

impl SqliteMigrationManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MigrationManager<Sqlite> for SqliteMigrationManager {
    async fn initialize(&self) -> Result<(), MigrationError> {
        sqlx::query(
            format!(
                r#"
            CREATE TABLE IF NOT EXISTS {} (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at INTEGER NOT NULL DEFAULT (unixepoch())
            );"#,
                self.get_migration_table_name()
            )
            .as_str(),
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn up(&self, migrations: &[Box<dyn Migration<Sqlite>>]) -> Result<(), MigrationError> {
        check_order(migrations)?;

        for migration in migrations {
            if self.is_applied(migration.version()).await? {
                continue;
            }

            let mut tx = self.pool.begin().await?;

            tracing::info!(
                version = migration.version(),
                name = migration.name(),
                "Applying migration"
            );

            migration
                .up(&mut *tx as &mut <Sqlite as Database>::Connection)
                .await?;

            sqlx::query(
                format!(
                    "INSERT INTO {} (version, name, applied_at) VALUES (?, ?, ?)",
                    self.get_migration_table_name()
                )
                .as_str(),
            )
            .bind(migration.version())
            .bind(migration.name())
            .bind(Utc::now().timestamp())
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
        }
        Ok(())
    }

    async fn down(&self, migrations: &[Box<dyn Migration<Sqlite>>]) -> Result<(), MigrationError> {
        for migration in migrations.iter().rev() {
            if !self.is_applied(migration.version()).await? {
                continue;
            }

            let mut tx = self.pool.begin().await?;

            tracing::info!(
                version = migration.version(),
                name = migration.name(),
                "Rolling back migration"
            );

            migration
                .down(&mut *tx as &mut <Sqlite as Database>::Connection)
                .await?;

            sqlx::query(
                format!(
                    "DELETE FROM {} WHERE version = ?",
                    self.get_migration_table_name()
                )
                .as_str(),
            )
            .bind(migration.version())
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
        }
        Ok(())
    }

    async fn get_applied_migrations(&self) -> Result<Vec<MigrationRecord>, MigrationError> {
        let records = sqlx::query_as::<_, MigrationRecord>(
            format!(
                "SELECT version, name, applied_at FROM {} ORDER BY version",
                self.get_migration_table_name()
            )
            .as_str(),
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    async fn is_applied(&self, version: i64) -> Result<bool, MigrationError> {
        let result: bool = sqlx::query_scalar(
            format!(
                "SELECT EXISTS(SELECT 1 FROM {} WHERE version = ?)",
                self.get_migration_table_name()
            )
            .as_str(),
        )
        .bind(version)
        .fetch_one(&self.pool)
        .await?;
        Ok(result)
    }
}

/// Every schema step, in version order.
pub fn all() -> Vec<Box<dyn Migration<Sqlite>>> {
    vec![
        Box::new(CreateRequestTables),
        Box::new(CreateUsersTable),
        Box::new(CreateAdminsTable),
        Box::new(CreateSlotTables),
        Box::new(CreateIndexes),
    ]
}

/// Bookings and rentals share a column layout.
pub struct CreateRequestTables;

#[async_trait]
impl Migration<Sqlite> for CreateRequestTables {
    fn version(&self) -> i64 {
        1
    }

    fn name(&self) -> &str {
        "CreateRequestTables"
    }

    async fn up<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        for table in ["bookings", "rentals"] {
            sqlx::query(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    email TEXT,
                    name TEXT,
                    duration TEXT,
                    participants INTEGER,
                    price TEXT,
                    scheduled_for TEXT,
                    payment TEXT,
                    status TEXT NOT NULL DEFAULT 'Pending',
                    created_at INTEGER NOT NULL DEFAULT (unixepoch())
                );"#
            ))
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    async fn down<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query("DROP TABLE IF EXISTS rentals")
            .execute(&mut *conn)
            .await?;
        sqlx::query("DROP TABLE IF EXISTS bookings")
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

pub struct CreateUsersTable;

#[async_trait]
impl Migration<Sqlite> for CreateUsersTable {
    fn version(&self) -> i64 {
        2
    }

    fn name(&self) -> &str {
        "CreateUsersTable"
    }

    async fn up<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT,
                name TEXT,
                role TEXT,
                status TEXT,
                amount TEXT,
                created_at INTEGER NOT NULL DEFAULT (unixepoch())
            );"#,
        )
        .execute(conn)
        .await?;
        Ok(())
    }

    async fn down<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query("DROP TABLE IF EXISTS users")
            .execute(conn)
            .await?;
        Ok(())
    }
}

pub struct CreateAdminsTable;

#[async_trait]
impl Migration<Sqlite> for CreateAdminsTable {
    fn version(&self) -> i64 {
        3
    }

    fn name(&self) -> &str {
        "CreateAdminsTable"
    }

    async fn up<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS admins (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                username TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at INTEGER NOT NULL DEFAULT (unixepoch()),
                UNIQUE(email),
                UNIQUE(username)
            );"#,
        )
        .execute(conn)
        .await?;
        Ok(())
    }

    async fn down<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query("DROP TABLE IF EXISTS admins")
            .execute(conn)
            .await?;
        Ok(())
    }
}

/// One table per slot kind. Rental slots leave style and level empty.
pub struct CreateSlotTables;

#[async_trait]
impl Migration<Sqlite> for CreateSlotTables {
    fn version(&self) -> i64 {
        4
    }

    fn name(&self) -> &str {
        "CreateSlotTables"
    }

    async fn up<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        for table in ["dance_classes", "private_classes", "rental_slots"] {
            sqlx::query(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    class_date TEXT NOT NULL,
                    style TEXT,
                    level TEXT,
                    duration TEXT NOT NULL,
                    price TEXT NOT NULL,
                    booked INTEGER NOT NULL DEFAULT 0,
                    created_at INTEGER NOT NULL DEFAULT (unixepoch())
                );"#
            ))
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    async fn down<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        for table in ["rental_slots", "private_classes", "dance_classes"] {
            sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }
}

pub struct CreateIndexes;

#[async_trait]
impl Migration<Sqlite> for CreateIndexes {
    fn version(&self) -> i64 {
        5
    }

    fn name(&self) -> &str {
        "CreateIndexes"
    }

    async fn up<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings(status)")
            .execute(&mut *conn)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_rentals_status ON rentals(status)")
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn down<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query("DROP INDEX IF EXISTS idx_rentals_status")
            .execute(&mut *conn)
            .await?;
        sqlx::query("DROP INDEX IF EXISTS idx_bookings_status")
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
