//! Core functionality for the studio admin console
//!
//! This crate holds the domain types, the repository traits that storage
//! backends implement, and the services built on top of them.
//!
//! See [`LockoutGuard`] for the login lockout state machine and [`summarize`]
//! for the dashboard payment summary. Storage backends implement
//! [`RepositoryProvider`](repositories::RepositoryProvider).
pub mod auth;
pub mod error;
pub mod id;
pub mod record;
pub mod repositories;
pub mod services;
pub mod slot;
pub mod storage;
pub mod user;
pub mod validation;

pub use auth::{Authenticator, Credentials};
pub use error::Error;
pub use id::{RecordId, UserId};
pub use record::{PaymentStatus, RecordKind, RequestStatus, TransactionRecord};
pub use services::{LockoutGuard, ReportSummary, summarize};
pub use slot::{ScheduleSlot, SlotKind};
pub use storage::{FileStore, KeyValueStore, LockStatus, LockoutConfig, MemoryStore};
pub use user::{AdminRole, AuthenticatedAdmin, ClientUser, Landing};
