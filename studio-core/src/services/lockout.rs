//! Client-side login lockout.
//!
//! [`LockoutGuard`] counts consecutive failed sign-in attempts and, once the
//! configured threshold is reached, rejects attempts for a fixed period. The
//! counter and the lock expiry are persisted through a [`KeyValueStore`] after
//! every change, so a restart resumes an active lock.
//!
//! ```text
//! Unlocked(n) --failure--> Unlocked(n + 1)           if n + 1 < max_attempts
//! Unlocked(n) --failure--> Locked(now + duration)    counter reset to 0
//! Locked(t)   --now >= t-> Unlocked(n)               counter untouched
//! any         --success--> Unlocked(0)
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use studio_core::services::LockoutGuard;
//! use studio_core::storage::{LockoutConfig, MemoryStore};
//!
//! let mut guard = LockoutGuard::load(MemoryStore::new(), LockoutConfig::default());
//! let now = Utc::now();
//!
//! if !guard.check_locked(now).is_locked() {
//!     // authentication failed
//!     let status = guard.record_failure(now);
//!     assert_eq!(guard.remaining_attempts(), 2);
//!     assert!(!status.is_locked());
//! }
//! ```

use chrono::{DateTime, Utc};

use crate::storage::{
    KeyValueStore, LOCK_UNTIL_KEY, LOGIN_ATTEMPTS_KEY, LockStatus, LockoutConfig, LockoutState,
    clamp_lock_duration, remaining_lock_time,
};

/// Tracks failed login attempts and enforces a temporary lockout.
///
/// The guard owns its state; the store is only read in [`LockoutGuard::load`]
/// and written after each mutation. None of its operations fail: storage
/// problems are logged and the guard falls back to zero attempts and no lock.
///
/// # Thread Safety
///
/// Mutating methods take `&mut self`. Guards in separate processes that share
/// one backing store do not coordinate, and concurrent failures may be
/// counted once.
pub struct LockoutGuard<S: KeyValueStore> {
    store: S,
    config: LockoutConfig,
    state: LockoutState,
}

impl<S: KeyValueStore> LockoutGuard<S> {
    /// Construct a guard from whatever the store currently holds.
    ///
    /// A corrupt counter is treated as 0 and a corrupt expiry as absent. A
    /// counter at or above the threshold is clamped to one below it, which
    /// keeps the next failure the one that locks.
    pub fn load(store: S, config: LockoutConfig) -> Self {
        let (mut state, problems) = LockoutState::load(&store);

        for problem in problems {
            tracing::warn!(error = %problem, "Recovered from malformed lockout state");
        }

        let ceiling = config.max_attempts.saturating_sub(1);
        if state.failed_attempts > ceiling {
            tracing::warn!(
                failed_attempts = state.failed_attempts,
                max_attempts = config.max_attempts,
                "Clamping persisted failed attempt counter"
            );
            state.failed_attempts = ceiling;
        }

        Self {
            store,
            config,
            state,
        }
    }

    pub fn config(&self) -> &LockoutConfig {
        &self.config
    }

    pub fn state(&self) -> &LockoutState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Report whether attempts are currently rejected.
    ///
    /// A lock that expired at or before `now` is cleared here, in memory and
    /// in the store. The failed attempt counter is never touched.
    pub fn check_locked(&mut self, now: DateTime<Utc>) -> LockStatus {
        let Some(locked_until) = self.state.locked_until else {
            return self.unlocked();
        };

        match remaining_lock_time(now, locked_until) {
            Some(remaining) => LockStatus::Locked { remaining },
            None => {
                tracing::info!(%locked_until, "Login lock expired");
                self.state.locked_until = None;
                self.store.remove(LOCK_UNTIL_KEY);
                self.unlocked()
            }
        }
    }

    /// Count a failed authentication at `now`.
    ///
    /// Reaching the threshold locks until `now + lock_duration` and resets the
    /// counter. While a lock is active the failure is not counted and the
    /// active lock is reported instead.
    pub fn record_failure(&mut self, now: DateTime<Utc>) -> LockStatus {
        let current = self.check_locked(now);
        if current.is_locked() {
            return current;
        }

        self.state.failed_attempts += 1;

        if self.state.failed_attempts >= self.config.max_attempts {
            let lock_duration = clamp_lock_duration(self.config.lock_duration);
            let locked_until = now
                .checked_add_signed(lock_duration)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            self.state.failed_attempts = 0;
            self.state.locked_until = Some(locked_until);

            self.store
                .set(LOCK_UNTIL_KEY, &locked_until.timestamp_millis().to_string());
            self.store.set(LOGIN_ATTEMPTS_KEY, "0");

            tracing::info!(
                %locked_until,
                max_attempts = self.config.max_attempts,
                "Too many failed login attempts, locking"
            );

            return LockStatus::Locked {
                remaining: locked_until - now,
            };
        }

        self.store.set(
            LOGIN_ATTEMPTS_KEY,
            &self.state.failed_attempts.to_string(),
        );

        tracing::debug!(
            failed_attempts = self.state.failed_attempts,
            remaining_attempts = self.remaining_attempts(),
            "Recorded failed login attempt"
        );

        self.unlocked()
    }

    /// Clear the counter and any lock after a successful authentication.
    pub fn record_success(&mut self) {
        self.state = LockoutState::default();
        self.store.remove(LOGIN_ATTEMPTS_KEY);
        self.store.remove(LOCK_UNTIL_KEY);
    }

    /// Tries left before the next lock.
    pub fn remaining_attempts(&self) -> u32 {
        self.config
            .max_attempts
            .saturating_sub(self.state.failed_attempts)
    }

    fn unlocked(&self) -> LockStatus {
        LockStatus::Unlocked {
            remaining_attempts: self.remaining_attempts(),
        }
    }
}
