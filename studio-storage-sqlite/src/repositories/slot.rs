use async_trait::async_trait;
use sqlx::SqlitePool;
use studio_core::{
    Error, RecordId,
    error::StorageError,
    repositories::SlotRepository,
    slot::{ScheduleSlot, SlotKind, ValidatedSlot},
};

use crate::{database_error, decimal_column};

#[derive(Debug, Clone, sqlx::FromRow)]
struct SqliteSlot {
    id: i64,
    class_date: String,
    style: Option<String>,
    level: Option<String>,
    duration: String,
    price: String,
    booked: bool,
}

impl SqliteSlot {
    fn into_slot(self, kind: SlotKind) -> ScheduleSlot {
        ScheduleSlot {
            id: RecordId::new(self.id),
            kind,
            class_date: self.class_date,
            style: self.style,
            level: self.level,
            duration: self.duration,
            price: decimal_column(Some(&self.price)),
            booked: self.booked,
        }
    }
}

fn table(kind: SlotKind) -> &'static str {
    match kind {
        SlotKind::DanceClass => "dance_classes",
        SlotKind::PrivateClass => "private_classes",
        SlotKind::Rental => "rental_slots",
    }
}

const COLUMNS: &str = "id, class_date, style, level, duration, price, booked";

pub struct SqliteSlotRepository {
    pool: SqlitePool,
}

impl SqliteSlotRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for SqliteSlotRepository {
    async fn create(&self, slot: ValidatedSlot) -> Result<ScheduleSlot, Error> {
        let row = sqlx::query_as::<_, SqliteSlot>(&format!(
            r#"
            INSERT INTO {} (class_date, style, level, duration, price)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING {COLUMNS}
            "#,
            table(slot.kind)
        ))
        .bind(&slot.class_date)
        .bind(&slot.style)
        .bind(&slot.level)
        .bind(&slot.duration)
        .bind(slot.price.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.into_slot(slot.kind))
    }

    async fn list_available(&self, kind: SlotKind) -> Result<Vec<ScheduleSlot>, Error> {
        let rows = sqlx::query_as::<_, SqliteSlot>(&format!(
            "SELECT {COLUMNS} FROM {} WHERE booked = 0 ORDER BY id DESC",
            table(kind)
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(|r| r.into_slot(kind)).collect())
    }

    async fn mark_booked(&self, kind: SlotKind, id: RecordId) -> Result<(), Error> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET booked = 1 WHERE id = ?1",
            table(kind)
        ))
        .bind(id.value())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound.into());
        }
        Ok(())
    }

    async fn delete(&self, kind: SlotKind, id: RecordId) -> Result<(), Error> {
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
