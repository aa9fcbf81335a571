//! Repository traits for data access layer
//!
//! Services reach the record store only through these traits.
//!
//! # Trait Hierarchy
//!
//! - Individual `*Repository` traits define the operations for each data domain
//! - Individual `*RepositoryProvider` traits provide access to each repository type
//! - [`RepositoryProvider`] is a supertrait combining all provider traits plus lifecycle methods

pub mod adapter;
pub mod admin;
pub mod record;
pub mod slot;
pub mod user;

pub use adapter::{
    AdminRepositoryAdapter, RecordRepositoryAdapter, SlotRepositoryAdapter, UserRepositoryAdapter,
};
pub use admin::AdminRepository;
pub use record::RecordRepository;
pub use slot::SlotRepository;
pub use user::UserRepository;

use async_trait::async_trait;

use crate::Error;

/// Provider trait for booking and rental request access.
pub trait RecordRepositoryProvider: Send + Sync + 'static {
    type RecordRepo: RecordRepository;

    fn records(&self) -> &Self::RecordRepo;
}

/// Provider trait for client user access.
pub trait UserRepositoryProvider: Send + Sync + 'static {
    type UserRepo: UserRepository;

    fn users(&self) -> &Self::UserRepo;
}

/// Provider trait for admin account access.
pub trait AdminRepositoryProvider: Send + Sync + 'static {
    type AdminRepo: AdminRepository;

    fn admins(&self) -> &Self::AdminRepo;
}

/// Provider trait for schedule slot access.
pub trait SlotRepositoryProvider: Send + Sync + 'static {
    type SlotRepo: SlotRepository;

    fn slots(&self) -> &Self::SlotRepo;
}

/// Provider trait that storage implementations must implement to provide all repositories.
///
/// # Example
///
/// ```rust,ignore
/// use studio_core::repositories::*;
///
/// struct MyStorage { /* ... */ }
///
/// impl RecordRepositoryProvider for MyStorage {
///     type RecordRepo = MyRecordRepository;
///     fn records(&self) -> &Self::RecordRepo { &self.records }
/// }
///
/// // ... implement other provider traits ...
///
/// #[async_trait]
/// impl RepositoryProvider for MyStorage {
///     async fn migrate(&self) -> Result<(), Error> { /* ... */ }
///     async fn health_check(&self) -> Result<(), Error> { /* ... */ }
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider:
    RecordRepositoryProvider + UserRepositoryProvider + AdminRepositoryProvider + SlotRepositoryProvider
{
    /// Run migrations for all repositories
    async fn migrate(&self) -> Result<(), Error>;

    /// Health check for all repositories
    async fn health_check(&self) -> Result<(), Error>;
}
