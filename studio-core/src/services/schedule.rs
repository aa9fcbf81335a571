//! Bookable slot management for the schedule screen.

use std::sync::Arc;

use crate::{
    Error,
    id::RecordId,
    repositories::SlotRepository,
    slot::{NewSlot, ScheduleSlot, SlotKind},
    validation::{require_record_id, validate_new_slot},
};

pub struct ScheduleService<R: SlotRepository> {
    slots: Arc<R>,
}

impl<R: SlotRepository> ScheduleService<R> {
    pub fn new(slots: Arc<R>) -> Self {
        Self { slots }
    }

    /// Validate and store a new slot. Nothing is written when a field is blank.
    pub async fn add_slot(&self, kind: SlotKind, slot: &NewSlot) -> Result<ScheduleSlot, Error> {
        let validated = validate_new_slot(kind, slot)?;
        let slot = self.slots.create(validated).await?;
        tracing::info!(%kind, id = %slot.id, date = %slot.class_date, "Added schedule slot");
        Ok(slot)
    }

    /// Unbooked slots of one kind, newest first.
    pub async fn available_slots(&self, kind: SlotKind) -> Result<Vec<ScheduleSlot>, Error> {
        self.slots.list_available(kind).await
    }

    pub async fn mark_booked(&self, kind: SlotKind, id: Option<RecordId>) -> Result<(), Error> {
        let id = require_record_id(id)?;
        self.slots.mark_booked(kind, id).await
    }

    pub async fn delete_slot(&self, kind: SlotKind, id: Option<RecordId>) -> Result<(), Error> {
        let id = require_record_id(id)?;
        self.slots.delete(kind, id).await?;
        tracing::info!(%kind, %id, "Deleted schedule slot");
        Ok(())
    }
}
