//! # Studio
//!
//! Admin console core for a dance studio. It covers:
//! - Admin sign-in with a client-side lockout after repeated failures
//! - Review of booking and rental requests
//! - The dashboard payment summary
//! - Bookable class and rental slots
//! - The client user list
//!
//! ## Storage Support
//!
//! SQLite through the `sqlite` feature (enabled by default). Other backends
//! plug in by implementing [`RepositoryProvider`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use studio::{Credentials, MemoryStore, StudioBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let studio = StudioBuilder::new()
//!         .with_sqlite("sqlite://studio.db")
//!         .await?
//!         .apply_migrations(true)
//!         .build()
//!         .await?;
//!
//!     let mut login = studio.login_service(MemoryStore::new());
//!     let admin = login.login(&Credentials::new("head", "password123")).await?;
//!     println!("landing on {:?}", admin.landing());
//!     Ok(())
//! }
//! ```
use std::sync::Arc;

use studio_core::{
    repositories::{
        AdminRepositoryAdapter, RecordRepositoryAdapter, SlotRepositoryAdapter,
        UserRepositoryAdapter,
    },
    services::{
        LockoutGuard, LoginService, PasswordAuthenticator, ReportService, RequestService,
        ScheduleService, UserService,
    },
};

pub mod builder;

pub use builder::{NoStorage, StudioBuilder, StudioBuilderError, WithStorage};
pub use studio_core::{
    AdminRole, AuthenticatedAdmin, Authenticator, ClientUser, Credentials, Error, FileStore,
    KeyValueStore, Landing, LockStatus, LockoutConfig, MemoryStore, PaymentStatus, RecordId,
    RecordKind, ReportSummary, RequestStatus, ScheduleSlot, SlotKind, TransactionRecord, UserId,
    record::NewRequest,
    repositories::RepositoryProvider,
    slot::NewSlot,
    user::{AdminAccount, NewClientUser},
};

#[cfg(feature = "sqlite")]
pub mod sqlite {
    pub use studio_storage_sqlite::{SqliteRepositoryProvider, SqliteStorage};
}

/// Password authenticator over the admin accounts of a provider.
pub type StudioAuthenticator<R> = PasswordAuthenticator<AdminRepositoryAdapter<R>>;

/// The admin console over one repository provider.
///
/// Every operation goes through a service from `studio-core`; this type wires
/// them to the same storage.
pub struct Studio<R: RepositoryProvider> {
    repositories: Arc<R>,
    lockout_config: LockoutConfig,
    authenticator: Arc<StudioAuthenticator<R>>,
    report_service: ReportService<RecordRepositoryAdapter<R>>,
    request_service: RequestService<RecordRepositoryAdapter<R>>,
    schedule_service: ScheduleService<SlotRepositoryAdapter<R>>,
    user_service: UserService<UserRepositoryAdapter<R>>,
}

impl<R: RepositoryProvider> Studio<R> {
    pub fn new(repositories: Arc<R>) -> Self {
        let record_repo = Arc::new(RecordRepositoryAdapter::new(repositories.clone()));

        Self {
            lockout_config: LockoutConfig::default(),
            authenticator: Arc::new(PasswordAuthenticator::new(Arc::new(
                AdminRepositoryAdapter::new(repositories.clone()),
            ))),
            report_service: ReportService::new(record_repo.clone()),
            request_service: RequestService::new(record_repo),
            schedule_service: ScheduleService::new(Arc::new(SlotRepositoryAdapter::new(
                repositories.clone(),
            ))),
            user_service: UserService::new(Arc::new(UserRepositoryAdapter::new(
                repositories.clone(),
            ))),
            repositories,
        }
    }

    pub fn with_lockout_config(mut self, config: LockoutConfig) -> Self {
        self.lockout_config = config;
        self
    }

    pub fn lockout_config(&self) -> &LockoutConfig {
        &self.lockout_config
    }

    pub fn repositories(&self) -> &Arc<R> {
        &self.repositories
    }

    /// Run migrations for all repositories
    pub async fn migrate(&self) -> Result<(), Error> {
        self.repositories.migrate().await
    }

    /// Health check for all repositories
    pub async fn health_check(&self) -> Result<(), Error> {
        self.repositories.health_check().await
    }

    /// A login flow whose lockout state lives in `store`.
    ///
    /// The state is read from the store now; use one store per browser or
    /// client so lockouts do not leak between them.
    pub fn login_service<S: KeyValueStore>(
        &self,
        store: S,
    ) -> LoginService<StudioAuthenticator<R>, S> {
        let guard = LockoutGuard::load(store, self.lockout_config.clone());
        LoginService::new(self.authenticator.clone(), guard)
    }

    /// Check credentials without any lockout bookkeeping.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AuthenticatedAdmin, Error> {
        self.authenticator.authenticate(credentials).await
    }

    pub async fn create_admin(
        &self,
        email: &str,
        username: &str,
        password: &str,
        role: AdminRole,
    ) -> Result<AdminAccount, Error> {
        self.authenticator
            .create_admin(email, username, password, role)
            .await
    }

    /// Totals over every booking and rental.
    pub async fn payment_summary(&self) -> Result<ReportSummary, Error> {
        self.report_service.payment_summary().await
    }

    pub async fn submit_request(&self, request: NewRequest) -> Result<TransactionRecord, Error> {
        self.request_service.submit(request).await
    }

    pub async fn requests(&self, status: RequestStatus) -> Result<Vec<TransactionRecord>, Error> {
        self.request_service.requests(status).await
    }

    /// Requests with `status` whose email, name or kind contains `query`,
    /// ignoring case.
    pub async fn search_requests(
        &self,
        status: RequestStatus,
        query: &str,
    ) -> Result<Vec<TransactionRecord>, Error> {
        self.request_service.search(status, query).await
    }

    pub async fn confirm_request(
        &self,
        kind: RecordKind,
        id: Option<RecordId>,
    ) -> Result<TransactionRecord, Error> {
        self.request_service.confirm(kind, id).await
    }

    pub async fn decline_request(
        &self,
        kind: RecordKind,
        id: Option<RecordId>,
    ) -> Result<TransactionRecord, Error> {
        self.request_service.decline(kind, id).await
    }

    pub async fn delete_request(&self, kind: RecordKind, id: Option<RecordId>) -> Result<(), Error> {
        self.request_service.delete(kind, id).await
    }

    pub async fn add_slot(&self, kind: SlotKind, slot: &NewSlot) -> Result<ScheduleSlot, Error> {
        self.schedule_service.add_slot(kind, slot).await
    }

    pub async fn available_slots(&self, kind: SlotKind) -> Result<Vec<ScheduleSlot>, Error> {
        self.schedule_service.available_slots(kind).await
    }

    pub async fn book_slot(&self, kind: SlotKind, id: Option<RecordId>) -> Result<(), Error> {
        self.schedule_service.mark_booked(kind, id).await
    }

    pub async fn delete_slot(&self, kind: SlotKind, id: Option<RecordId>) -> Result<(), Error> {
        self.schedule_service.delete_slot(kind, id).await
    }

    pub async fn create_user(&self, user: NewClientUser) -> Result<ClientUser, Error> {
        self.user_service.create_user(user).await
    }

    pub async fn users(&self) -> Result<Vec<ClientUser>, Error> {
        self.user_service.users().await
    }

    pub async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        self.user_service.delete_user(id).await
    }
}
