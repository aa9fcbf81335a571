//! Review of booking and rental requests from the dashboard.

use std::sync::Arc;

use crate::{
    Error,
    id::RecordId,
    record::{NewRequest, RecordKind, RequestStatus, TransactionRecord},
    repositories::RecordRepository,
    validation::{require_record_id, validate_email},
};

/// Records matching the dashboard search box, in their original order.
pub fn filter_requests<'a>(
    records: &'a [TransactionRecord],
    query: &str,
) -> Vec<&'a TransactionRecord> {
    records.iter().filter(|r| r.matches(query)).collect()
}

/// Lists requests by review status and applies admin decisions.
pub struct RequestService<R: RecordRepository> {
    records: Arc<R>,
}

impl<R: RecordRepository> RequestService<R> {
    pub fn new(records: Arc<R>) -> Self {
        Self { records }
    }

    /// Store a request submitted by a client.
    pub async fn submit(&self, request: NewRequest) -> Result<TransactionRecord, Error> {
        if let Some(email) = request.email.as_deref() {
            validate_email(email)?;
        }
        let record = self.records.create(request).await?;
        tracing::info!(kind = %record.kind, "Received request");
        Ok(record)
    }

    /// Bookings then rentals with the given status.
    pub async fn requests(&self, status: RequestStatus) -> Result<Vec<TransactionRecord>, Error> {
        let mut requests = Vec::new();
        for kind in RecordKind::ALL {
            requests.extend(self.records.fetch_by_status(kind, status).await?);
        }
        Ok(requests)
    }

    /// Requests with the given status that match a search query.
    pub async fn search(
        &self,
        status: RequestStatus,
        query: &str,
    ) -> Result<Vec<TransactionRecord>, Error> {
        let mut requests = self.requests(status).await?;
        requests.retain(|r| r.matches(query));
        Ok(requests)
    }

    pub async fn confirm(
        &self,
        kind: RecordKind,
        id: Option<RecordId>,
    ) -> Result<TransactionRecord, Error> {
        self.set_status(kind, id, RequestStatus::Confirmed).await
    }

    pub async fn decline(
        &self,
        kind: RecordKind,
        id: Option<RecordId>,
    ) -> Result<TransactionRecord, Error> {
        self.set_status(kind, id, RequestStatus::Declined).await
    }

    /// Set a request's status. The id must be present; the current status is
    /// not checked.
    pub async fn set_status(
        &self,
        kind: RecordKind,
        id: Option<RecordId>,
        status: RequestStatus,
    ) -> Result<TransactionRecord, Error> {
        let id = require_record_id(id)?;
        let record = self.records.update_status(kind, id, status).await?;
        tracing::info!(%kind, %id, %status, "Updated request status");
        Ok(record)
    }

    pub async fn delete(&self, kind: RecordKind, id: Option<RecordId>) -> Result<(), Error> {
        let id = require_record_id(id)?;
        self.records.delete(kind, id).await?;
        tracing::info!(%kind, %id, "Deleted request");
        Ok(())
    }
}
