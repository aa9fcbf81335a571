//! Repository trait for booking and rental requests.

use async_trait::async_trait;

use crate::{
    Error,
    id::RecordId,
    record::{NewRequest, RecordKind, RequestStatus, TransactionRecord},
};

/// Storage for booking and rental requests.
///
/// Implementations return rows already normalized into [`TransactionRecord`].
/// Status updates and deletes are pass-through: they do not check the current
/// status of the row.
#[async_trait]
pub trait RecordRepository: Send + Sync + 'static {
    /// Insert a request and return the stored row.
    async fn create(&self, request: NewRequest) -> Result<TransactionRecord, Error>;

    /// Every request of one kind.
    async fn fetch_all(&self, kind: RecordKind) -> Result<Vec<TransactionRecord>, Error>;

    /// Requests of one kind with the given status.
    async fn fetch_by_status(
        &self,
        kind: RecordKind,
        status: RequestStatus,
    ) -> Result<Vec<TransactionRecord>, Error>;

    /// Set the status of one request and return the updated row.
    ///
    /// Returns `StorageError::NotFound` when no row has this id.
    async fn update_status(
        &self,
        kind: RecordKind,
        id: RecordId,
        status: RequestStatus,
    ) -> Result<TransactionRecord, Error>;

    /// Delete one request.
    ///
    /// Returns `StorageError::NotFound` when no row has this id.
    async fn delete(&self, kind: RecordKind, id: RecordId) -> Result<(), Error>;
}
