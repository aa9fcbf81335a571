use async_trait::async_trait;
use serde_json::Value;
use sqlx::SqlitePool;
use studio_core::{
    Error, RecordId,
    error::StorageError,
    record::{NewRequest, RawRecord, RecordKind, RequestStatus, TransactionRecord},
    repositories::RecordRepository,
};

use crate::database_error;

/// A `bookings` or `rentals` row. Columns are loosely typed so legacy rows
/// still load; [`TransactionRecord::normalize`] cleans them up.
#[derive(Debug, Clone, sqlx::FromRow)]
struct SqliteRecord {
    id: i64,
    email: Option<String>,
    name: Option<String>,
    duration: Option<String>,
    participants: Option<i64>,
    price: Option<String>,
    scheduled_for: Option<String>,
    payment: Option<String>,
    status: Option<String>,
}

impl SqliteRecord {
    fn into_record(self, kind: RecordKind) -> TransactionRecord {
        let raw = RawRecord {
            id: Some(Value::from(self.id)),
            email: self.email.map(Value::from),
            name: self.name.map(Value::from),
            duration: self.duration.map(Value::from),
            participants: self.participants.map(Value::from),
            price: self.price.map(Value::from),
            class_date: self.scheduled_for.map(Value::from),
            payment: self.payment.map(Value::from),
            status: self.status.map(Value::from),
            ..Default::default()
        };
        TransactionRecord::normalize(raw, kind)
    }
}

fn table(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Booking => "bookings",
        RecordKind::Rental => "rentals",
    }
}

pub struct SqliteRecordRepository {
    pool: SqlitePool,
}

impl SqliteRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository for SqliteRecordRepository {
    async fn create(&self, request: NewRequest) -> Result<TransactionRecord, Error> {
        let row = sqlx::query_as::<_, SqliteRecord>(&format!(
            r#"
            INSERT INTO {} (email, name, duration, participants, price, scheduled_for, payment, status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING *
            "#,
            table(request.kind)
        ))
        .bind(&request.email)
        .bind(&request.name)
        .bind(&request.duration)
        .bind(request.participants.map(i64::from))
        .bind(request.price.to_string())
        .bind(&request.scheduled_for)
        .bind(request.payment.as_str())
        .bind(request.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.into_record(request.kind))
    }

    async fn fetch_all(&self, kind: RecordKind) -> Result<Vec<TransactionRecord>, Error> {
        let rows = sqlx::query_as::<_, SqliteRecord>(&format!(
            "SELECT * FROM {} ORDER BY id",
            table(kind)
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(|r| r.into_record(kind)).collect())
    }

    async fn fetch_by_status(
        &self,
        kind: RecordKind,
        status: RequestStatus,
    ) -> Result<Vec<TransactionRecord>, Error> {
        let rows = sqlx::query_as::<_, SqliteRecord>(&format!(
            "SELECT * FROM {} WHERE status = ?1 ORDER BY id",
            table(kind)
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(|r| r.into_record(kind)).collect())
    }

    async fn update_status(
        &self,
        kind: RecordKind,
        id: RecordId,
        status: RequestStatus,
    ) -> Result<TransactionRecord, Error> {
        let row = sqlx::query_as::<_, SqliteRecord>(&format!(
            "UPDATE {} SET status = ?1 WHERE id = ?2 RETURNING *",
            table(kind)
        ))
        .bind(status.as_str())
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .ok_or(StorageError::NotFound)?;

        Ok(row.into_record(kind))
    }

    async fn delete(&self, kind: RecordKind, id: RecordId) -> Result<(), Error> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?1", table(kind)))
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound.into());
        }
        Ok(())
    }
}
