//! Service layer for business logic
//!
//! This module contains the services behind the admin console: login with
//! lockout, request review, the payment summary, schedule slots and users.

pub mod lockout;
pub mod login;
pub mod password;
pub mod report;
pub mod request;
pub mod schedule;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use lockout::LockoutGuard;
pub use login::LoginService;
pub use password::PasswordAuthenticator;
pub use report::{PaymentTally, ReportService, ReportSummary, summarize};
pub use request::{RequestService, filter_requests};
pub use schedule::ScheduleService;
pub use user::UserService;
