//! Payment summary and chart data for the dashboard.
//!
//! [`summarize`] is a pure reduction over normalized records. [`ReportService`]
//! fetches every booking and rental from the record store and summarizes them.

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    Error,
    record::{RecordKind, TransactionRecord},
    repositories::RecordRepository,
};

/// Paid versus unpaid record counts, as fed to the pie chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaymentTally {
    pub paid: usize,
    pub unpaid: usize,
}

impl PaymentTally {
    /// Labelled series in chart order.
    pub fn series(&self) -> [(&'static str, usize); 2] {
        [("Paid", self.paid), ("Unpaid", self.unpaid)]
    }

    pub fn total(&self) -> usize {
        self.paid + self.unpaid
    }
}

/// Headline payment numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_paid: Decimal,
    pub total_pending: Decimal,
    pub distinct_client_count: usize,
    pub paid_count: usize,
    pub paid_vs_unpaid: PaymentTally,
}

/// Reduce records into a [`ReportSummary`] in one pass.
///
/// Paid records add their price to `total_paid`, all others to
/// `total_pending`. Every record lands in exactly one side of the tally, so
/// `paid_count` always equals `paid_vs_unpaid.paid`.
pub fn summarize<'a, I>(records: I) -> ReportSummary
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut summary = ReportSummary::default();
    let mut clients = HashSet::new();

    for record in records {
        if record.is_paid() {
            summary.total_paid += record.price;
            summary.paid_count += 1;
            summary.paid_vs_unpaid.paid += 1;
        } else {
            summary.total_pending += record.price;
            summary.paid_vs_unpaid.unpaid += 1;
        }

        if let Some(email) = record.email.as_deref().filter(|e| !e.is_empty()) {
            clients.insert(email);
        }
    }

    summary.distinct_client_count = clients.len();
    summary
}

/// Builds dashboard reports from the record store.
pub struct ReportService<R: RecordRepository> {
    records: Arc<R>,
}

impl<R: RecordRepository> ReportService<R> {
    pub fn new(records: Arc<R>) -> Self {
        Self { records }
    }

    /// Summarize every booking and rental, whatever its review status.
    pub async fn payment_summary(&self) -> Result<ReportSummary, Error> {
        let mut all = Vec::new();
        for kind in RecordKind::ALL {
            all.extend(self.records.fetch_all(kind).await?);
        }

        let summary = summarize(&all);
        tracing::debug!(
            records = all.len(),
            distinct_clients = summary.distinct_client_count,
            "Computed payment summary"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{NewRequest, PaymentStatus, RequestStatus};
    use crate::services::testing::MockRecordRepository;
    use serde_json::json;

    fn record(value: serde_json::Value) -> TransactionRecord {
        TransactionRecord::from_json(value, RecordKind::Booking)
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = summarize(&[] as &[TransactionRecord]);
        assert_eq!(summary.total_paid, Decimal::ZERO);
        assert_eq!(summary.total_pending, Decimal::ZERO);
        assert_eq!(summary.distinct_client_count, 0);
        assert_eq!(summary.paid_count, 0);
        assert_eq!(summary.paid_vs_unpaid, PaymentTally { paid: 0, unpaid: 0 });
    }

    #[test]
    fn test_mixed_records() {
        let records = vec![
            record(json!({"email": "a@x.com", "price": 100, "payment": "Paid"})),
            record(json!({"email": "b@x.com", "price": 50, "payment": "Unpaid"})),
            record(json!({"email": "a@x.com", "price": 200, "payment": "Paid"})),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.total_paid, Decimal::from(300));
        assert_eq!(summary.total_pending, Decimal::from(50));
        assert_eq!(summary.distinct_client_count, 2);
        assert_eq!(summary.paid_count, 2);
        assert_eq!(summary.paid_vs_unpaid, PaymentTally { paid: 2, unpaid: 1 });
    }

    #[test]
    fn test_bare_record_counts_as_unpaid_zero() {
        let summary = summarize(&[record(json!({"id": 1}))]);
        assert_eq!(summary.total_paid, Decimal::ZERO);
        assert_eq!(summary.total_pending, Decimal::ZERO);
        assert_eq!(summary.distinct_client_count, 0);
        assert_eq!(summary.paid_vs_unpaid, PaymentTally { paid: 0, unpaid: 1 });
    }

    #[test]
    fn test_padded_and_blank_emails() {
        let records = vec![
            record(json!({"email": " a@x.com"})),
            record(json!({"email": "a@x.com "})),
            record(json!({"email": "   "})),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.distinct_client_count, 1);
        assert_eq!(records[2].email, None);
    }

    #[test]
    fn test_two_decimal_amounts_sum_exactly() {
        let records = vec![
            record(json!({"price": "0.10", "payment": "Paid"})),
            record(json!({"price": "0.20", "payment": "Paid"})),
            record(json!({"price": "19.99", "payment": "pending"})),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.total_paid, Decimal::new(30, 2));
        assert_eq!(summary.total_pending, Decimal::new(1999, 2));
        assert_eq!(summary.paid_vs_unpaid.series(), [("Paid", 2), ("Unpaid", 1)]);
        assert_eq!(summary.paid_vs_unpaid.total(), 3);
    }

    #[tokio::test]
    async fn test_payment_summary_covers_bookings_and_rentals() {
        let repo = Arc::new(MockRecordRepository::new());
        repo.create(
            NewRequest::new(RecordKind::Booking)
                .email("a@x.com")
                .price(Decimal::from(100))
                .payment(PaymentStatus::Paid),
        )
        .await
        .unwrap();
        repo.create(
            NewRequest::new(RecordKind::Rental)
                .email("b@x.com")
                .price(Decimal::from(80))
                .status(RequestStatus::Declined),
        )
        .await
        .unwrap();

        let service = ReportService::new(repo);
        let summary = service.payment_summary().await.unwrap();

        assert_eq!(summary.total_paid, Decimal::from(100));
        assert_eq!(summary.total_pending, Decimal::from(80));
        assert_eq!(summary.distinct_client_count, 2);
        assert_eq!(summary.paid_vs_unpaid, PaymentTally { paid: 1, unpaid: 1 });
    }
}
