//! Admin sign-in: lockout check, authentication, and outcome bookkeeping.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    Error,
    auth::{Authenticator, Credentials},
    error::AuthError,
    services::LockoutGuard,
    storage::{KeyValueStore, LockStatus},
    user::AuthenticatedAdmin,
};

/// Runs one admin's login attempts through a [`LockoutGuard`].
///
/// While locked, attempts fail with [`AuthError::LockoutActive`] and the
/// authenticator is never called. Otherwise the authenticator's verdict is fed
/// back into the guard: a rejection counts as a failure and is reported as
/// [`AuthError::AuthenticationFailed`] carrying the new lock status.
pub struct LoginService<A: Authenticator, S: KeyValueStore> {
    authenticator: Arc<A>,
    guard: LockoutGuard<S>,
}

impl<A: Authenticator, S: KeyValueStore> LoginService<A, S> {
    pub fn new(authenticator: Arc<A>, guard: LockoutGuard<S>) -> Self {
        Self {
            authenticator,
            guard,
        }
    }

    pub fn guard(&self) -> &LockoutGuard<S> {
        &self.guard
    }

    /// Current lock status, for showing a countdown before the form is used.
    pub fn status(&mut self, now: DateTime<Utc>) -> LockStatus {
        self.guard.check_locked(now)
    }

    pub async fn login(&mut self, credentials: &Credentials) -> Result<AuthenticatedAdmin, Error> {
        self.login_at(credentials, Utc::now()).await
    }

    /// Attempt a login as of `now`.
    ///
    /// A role problem after a correct password resets the guard like any
    /// success, then surfaces the error.
    pub async fn login_at(
        &mut self,
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedAdmin, Error> {
        let status = self.guard.check_locked(now);
        if status.is_locked() {
            tracing::debug!(
                identifier = %credentials.identifier,
                retry_after_seconds = status.retry_after_seconds(),
                "Rejected login attempt during lockout"
            );
            return Err(AuthError::LockoutActive(status).into());
        }

        match self.authenticator.authenticate(credentials).await {
            Ok(admin) => {
                self.guard.record_success();
                tracing::info!(admin_id = %admin.user_id, role = %admin.role, "Admin signed in");
                Ok(admin)
            }
            Err(e) if !e.counts_as_failure() => {
                self.guard.record_success();
                tracing::warn!(identifier = %credentials.identifier, error = %e, "Admin lacks console access");
                Err(e)
            }
            Err(e) => {
                let status = self.guard.record_failure(now);
                tracing::info!(
                    identifier = %credentials.identifier,
                    locked = status.is_locked(),
                    "Failed login attempt"
                );
                let reason = match e {
                    Error::Auth(inner) => inner.to_string(),
                    other => other.to_string(),
                };
                Err(AuthError::AuthenticationFailed { reason, status }.into())
            }
        }
    }
}
