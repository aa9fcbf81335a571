use sqlx::sqlite::SqlitePoolOptions;
use studio::{Studio, StudioBuilder, sqlite::SqliteRepositoryProvider};

pub fn setup_test() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub async fn studio() -> Studio<SqliteRepositoryProvider> {
    setup_test();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create pool");

    StudioBuilder::new()
        .with_sqlite_pool(pool)
        .apply_migrations(true)
        .build()
        .await
        .expect("Failed to build Studio")
}
