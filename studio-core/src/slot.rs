//! Bookable time slots managed from the schedule screen.
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::id::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    DanceClass,
    PrivateClass,
    Rental,
}

impl SlotKind {
    pub const ALL: [SlotKind; 3] = [SlotKind::DanceClass, SlotKind::PrivateClass, SlotKind::Rental];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::DanceClass => "dance",
            SlotKind::PrivateClass => "private",
            SlotKind::Rental => "rental",
        }
    }

    /// Class slots carry a style and a level; rental slots do not.
    pub fn is_class(&self) -> bool {
        !matches!(self, SlotKind::Rental)
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dance" | "dance_class" => Ok(SlotKind::DanceClass),
            "private" | "private_class" => Ok(SlotKind::PrivateClass),
            "rental" => Ok(SlotKind::Rental),
            other => Err(format!("unknown slot kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSlot {
    pub id: RecordId,
    pub kind: SlotKind,
    pub class_date: String,
    pub style: Option<String>,
    pub level: Option<String>,
    pub duration: String,
    pub price: Decimal,
    pub booked: bool,
}

/// Form input for a new slot, as typed by the admin.
///
/// Fields are raw strings; [`crate::validation::validate_new_slot`] trims and
/// checks them before anything is stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSlot {
    pub class_date: String,
    pub style: Option<String>,
    pub level: Option<String>,
    pub duration: String,
    pub price: String,
}

/// A slot that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSlot {
    pub kind: SlotKind,
    pub class_date: String,
    pub style: Option<String>,
    pub level: Option<String>,
    pub duration: String,
    pub price: Decimal,
}
