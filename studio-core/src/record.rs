//! Booking and rental requests.
//!
//! Rows arrive from the store in loosely typed shapes: prices may be numbers
//! or strings, names may live in `name` or `full_name`, dates in `class_date`
//! or `datetime`, and any field may be missing. [`RawRecord`] captures that
//! shape and [`TransactionRecord::normalize`] normalizes it once, applying these
//! coercions:
//!
//! | Field     | Rule                                                        |
//! | --------- | ----------------------------------------------------------- |
//! | `price`   | non-negative decimal; missing, negative or non-numeric is 0 |
//! | `email`   | trimmed; empty is absent                                    |
//! | `payment` | `Paid` only for the literal `"Paid"`, otherwise `Unpaid`    |
//! | `status`  | `Pending`, `Confirmed` or `Declined`; anything else absent  |
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::RecordId;

/// Which table a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Booking,
    Rental,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Booking, RecordKind::Rental];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Booking => "booking",
            RecordKind::Rental => "rental",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "booking" | "bookings" => Ok(RecordKind::Booking),
            "rental" | "rentals" => Ok(RecordKind::Rental),
            other => Err(format!("unknown record kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
}

impl PaymentStatus {
    /// Only the exact string `"Paid"` counts as paid.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("Paid") => PaymentStatus::Paid,
            _ => PaymentStatus::Unpaid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Unpaid => "Unpaid",
        }
    }
}

/// Review state of a request on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Confirmed,
    Declined,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Confirmed => "Confirmed",
            RequestStatus::Declined => "Declined",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(RequestStatus::Pending),
            "Confirmed" => Ok(RequestStatus::Confirmed),
            "Declined" => Ok(RequestStatus::Declined),
            other => Err(format!("unknown request status: {other}")),
        }
    }
}

/// A request row exactly as the store hands it over.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    pub id: Option<Value>,
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    pub email: Option<Value>,
    pub name: Option<Value>,
    pub full_name: Option<Value>,
    pub duration: Option<Value>,
    pub participants: Option<Value>,
    pub price: Option<Value>,
    pub class_date: Option<Value>,
    pub datetime: Option<Value>,
    pub payment: Option<Value>,
    pub status: Option<Value>,
}

impl RawRecord {
    /// Decode a JSON row. Anything that is not an object decodes as an empty
    /// record so one bad row cannot abort a listing.
    pub fn from_json(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring malformed record row");
            RawRecord::default()
        })
    }
}

/// A booking or rental request after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub id: Option<RecordId>,
    pub kind: RecordKind,
    pub email: Option<String>,
    pub name: Option<String>,
    pub duration: Option<String>,
    pub participants: Option<u32>,
    pub price: Decimal,
    pub scheduled_for: Option<String>,
    pub payment: PaymentStatus,
    pub status: Option<RequestStatus>,
}

impl TransactionRecord {
    /// Normalize a raw row; `default_kind` applies when the row carries no
    /// recognizable `type` field.
    pub fn normalize(raw: RawRecord, default_kind: RecordKind) -> Self {
        let kind = text(raw.kind)
            .and_then(|k| k.parse().ok())
            .unwrap_or(default_kind);

        Self {
            id: raw.id.as_ref().and_then(integer).map(RecordId::new),
            kind,
            email: text(raw.email),
            name: text(raw.name).or_else(|| text(raw.full_name)),
            duration: text(raw.duration),
            participants: raw
                .participants
                .as_ref()
                .and_then(integer)
                .and_then(|n| u32::try_from(n).ok()),
            price: raw.price.as_ref().map(amount).unwrap_or(Decimal::ZERO),
            scheduled_for: text(raw.class_date).or_else(|| text(raw.datetime)),
            payment: PaymentStatus::parse(raw.payment.as_ref().and_then(Value::as_str)),
            status: raw
                .status
                .as_ref()
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok()),
        }
    }

    pub fn from_json(value: Value, default_kind: RecordKind) -> Self {
        Self::normalize(RawRecord::from_json(value), default_kind)
    }

    pub fn is_paid(&self) -> bool {
        self.payment == PaymentStatus::Paid
    }

    /// Case-insensitive substring match of `query` against the email, name
    /// and kind columns. An empty query matches every record.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_uppercase();
        [
            self.email.as_deref().unwrap_or_default(),
            self.name.as_deref().unwrap_or_default(),
            self.kind.as_str(),
        ]
        .iter()
        .any(|column| column.to_uppercase().contains(&query))
    }
}

/// Fields for inserting a new request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRequest {
    pub kind: RecordKind,
    pub email: Option<String>,
    pub name: Option<String>,
    pub duration: Option<String>,
    pub participants: Option<u32>,
    pub price: Decimal,
    pub scheduled_for: Option<String>,
    pub payment: PaymentStatus,
    pub status: RequestStatus,
}

impl NewRequest {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            email: None,
            name: None,
            duration: None,
            participants: None,
            price: Decimal::ZERO,
            scheduled_for: None,
            payment: PaymentStatus::Unpaid,
            status: RequestStatus::Pending,
        }
    }

    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    pub fn scheduled_for(mut self, when: &str) -> Self {
        self.scheduled_for = Some(when.to_string());
        self
    }

    pub fn payment(mut self, payment: PaymentStatus) -> Self {
        self.payment = payment;
        self
    }

    pub fn status(mut self, status: RequestStatus) -> Self {
        self.status = status;
        self
    }
}

fn text(value: Option<Value>) -> Option<String> {
    let s = match value? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse a non-negative amount, falling back to zero.
pub(crate) fn amount(value: &Value) -> Decimal {
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    };

    match parsed {
        Some(d) if !d.is_sign_negative() => d,
        _ => Decimal::ZERO,
    }
}

pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_full_booking() {
        let record = TransactionRecord::from_json(
            json!({
                "id": 7,
                "email": " a@x.com ",
                "full_name": "Ana",
                "duration": "1h",
                "participants": 2,
                "price": 150,
                "class_date": "2025-03-01",
                "payment": "Paid",
                "status": "Confirmed"
            }),
            RecordKind::Booking,
        );

        assert_eq!(record.id, Some(RecordId::new(7)));
        assert_eq!(record.kind, RecordKind::Booking);
        assert_eq!(record.email.as_deref(), Some("a@x.com"));
        assert_eq!(record.name.as_deref(), Some("Ana"));
        assert_eq!(record.participants, Some(2));
        assert_eq!(record.price, Decimal::from(150));
        assert_eq!(record.scheduled_for.as_deref(), Some("2025-03-01"));
        assert!(record.is_paid());
        assert_eq!(record.status, Some(RequestStatus::Confirmed));
    }

    #[test]
    fn test_missing_fields_degrade_to_defaults() {
        let record = TransactionRecord::from_json(json!({}), RecordKind::Rental);

        assert_eq!(record.id, None);
        assert_eq!(record.kind, RecordKind::Rental);
        assert_eq!(record.email, None);
        assert_eq!(record.price, Decimal::ZERO);
        assert_eq!(record.payment, PaymentStatus::Unpaid);
        assert_eq!(record.status, None);
    }

    #[test]
    fn test_non_object_row_degrades() {
        let record = TransactionRecord::from_json(json!("garbage"), RecordKind::Booking);
        assert_eq!(record.price, Decimal::ZERO);
        assert_eq!(record.email, None);
    }

    #[test]
    fn test_price_coercion() {
        assert_eq!(amount(&json!("49.50")), Decimal::new(4950, 2));
        assert_eq!(amount(&json!(12.25)), Decimal::new(1225, 2));
        assert_eq!(amount(&json!("free")), Decimal::ZERO);
        assert_eq!(amount(&json!(-5)), Decimal::ZERO);
        assert_eq!(amount(&json!(null)), Decimal::ZERO);
        assert_eq!(amount(&json!(true)), Decimal::ZERO);
    }

    #[test]
    fn test_payment_is_exact_match() {
        assert_eq!(PaymentStatus::parse(Some("Paid")), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::parse(Some("paid")), PaymentStatus::Unpaid);
        assert_eq!(PaymentStatus::parse(Some("Partial")), PaymentStatus::Unpaid);
        assert_eq!(PaymentStatus::parse(None), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_empty_email_is_absent() {
        let record = TransactionRecord::from_json(json!({"email": "   "}), RecordKind::Booking);
        assert_eq!(record.email, None);
    }

    #[test]
    fn test_type_field_overrides_default_kind() {
        let record = TransactionRecord::from_json(json!({"type": "rental"}), RecordKind::Booking);
        assert_eq!(record.kind, RecordKind::Rental);

        let record = TransactionRecord::from_json(json!({"type": "gift"}), RecordKind::Booking);
        assert_eq!(record.kind, RecordKind::Booking);
    }

    #[test]
    fn test_name_and_date_fallbacks() {
        let record = TransactionRecord::from_json(
            json!({"name": "", "full_name": "Ben", "datetime": "2025-04-02T10:00"}),
            RecordKind::Rental,
        );
        assert_eq!(record.name.as_deref(), Some("Ben"));
        assert_eq!(record.scheduled_for.as_deref(), Some("2025-04-02T10:00"));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Pending".parse::<RequestStatus>(), Ok(RequestStatus::Pending));
        assert!("pending".parse::<RequestStatus>().is_err());
        assert_eq!("rentals".parse::<RecordKind>(), Ok(RecordKind::Rental));
    }
}
