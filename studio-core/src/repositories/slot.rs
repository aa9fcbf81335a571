//! Repository trait for bookable schedule slots.

use async_trait::async_trait;

use crate::{
    Error,
    id::RecordId,
    slot::{ScheduleSlot, SlotKind, ValidatedSlot},
};

#[async_trait]
pub trait SlotRepository: Send + Sync + 'static {
    async fn create(&self, slot: ValidatedSlot) -> Result<ScheduleSlot, Error>;

    /// Slots of one kind that nobody has booked yet, newest first.
    async fn list_available(&self, kind: SlotKind) -> Result<Vec<ScheduleSlot>, Error>;

    /// Mark a slot as taken so it drops out of [`Self::list_available`].
    async fn mark_booked(&self, kind: SlotKind, id: RecordId) -> Result<(), Error>;

    /// Returns `StorageError::NotFound` when no slot has this id.
    async fn delete(&self, kind: SlotKind, id: RecordId) -> Result<(), Error>;
}
