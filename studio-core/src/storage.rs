//! Lockout configuration, lock status, and the key-value store that persists
//! the lockout state between runs.
//!
//! The guard's entire durable footprint is two keys:
//!
//! | Key             | Encoding                               | Absent means     |
//! | --------------- | -------------------------------------- | ---------------- |
//! | `loginAttempts` | decimal integer string                 | zero attempts    |
//! | `lockUntil`     | epoch milliseconds as a decimal string | no lock          |
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Storage key holding the failed attempt counter.
pub const LOGIN_ATTEMPTS_KEY: &str = "loginAttempts";

/// Storage key holding the lock expiry as epoch milliseconds.
pub const LOCK_UNTIL_KEY: &str = "lockUntil";

/// Configuration for the login lockout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockoutConfig {
    /// Number of consecutive failures that triggers a lock.
    pub max_attempts: u32,
    /// How long a lock lasts once triggered.
    #[serde(with = "duration_millis")]
    pub lock_duration: Duration,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            lock_duration: Duration::seconds(30),
        }
    }
}

impl LockoutConfig {
    /// Longest lock the guard will impose, one year.
    pub const MAX_LOCK_MILLIS: i64 = 365 * 24 * 60 * 60 * 1000;

    /// Build a config; the threshold is at least 1 and the lock duration is
    /// clamped into `1ms..=MAX_LOCK_MILLIS`.
    pub fn new(max_attempts: u32, lock_duration: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            lock_duration: clamp_lock_duration(lock_duration),
        }
    }
}

/// Clamp a lock duration into `1ms..=LockoutConfig::MAX_LOCK_MILLIS`.
pub fn clamp_lock_duration(duration: Duration) -> Duration {
    Duration::milliseconds(
        duration
            .num_milliseconds()
            .clamp(1, LockoutConfig::MAX_LOCK_MILLIS),
    )
}

mod duration_millis {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_milliseconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = i64::deserialize(deserializer)?;
        Ok(Duration::milliseconds(
            millis.clamp(1, super::LockoutConfig::MAX_LOCK_MILLIS),
        ))
    }
}

/// Decision returned by the lockout guard for display and gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStatus {
    /// Attempts are allowed; `remaining_attempts` tries are left before a lock.
    Unlocked { remaining_attempts: u32 },
    /// Attempts are rejected for `remaining` more time.
    Locked { remaining: Duration },
}

impl LockStatus {
    pub fn is_locked(&self) -> bool {
        matches!(self, LockStatus::Locked { .. })
    }

    /// Remaining lock time in milliseconds, zero when unlocked.
    pub fn remaining_ms(&self) -> i64 {
        match self {
            LockStatus::Locked { remaining } => remaining.num_milliseconds().max(0),
            LockStatus::Unlocked { .. } => 0,
        }
    }

    /// Whole seconds until the lock expires, rounded up, for countdown display.
    pub fn retry_after_seconds(&self) -> Option<i64> {
        match self {
            LockStatus::Locked { .. } => Some((self.remaining_ms() + 999) / 1000),
            LockStatus::Unlocked { .. } => None,
        }
    }
}

impl fmt::Display for LockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockStatus::Unlocked { remaining_attempts } => {
                write!(f, "{remaining_attempts} tries left")
            }
            LockStatus::Locked { .. } => write!(
                f,
                "locked, try again in {}s",
                self.retry_after_seconds().unwrap_or_default()
            ),
        }
    }
}

/// Time left until `locked_until`, or `None` once it has passed.
///
/// Never negative; a lock expiring exactly at `now` is already expired.
pub fn remaining_lock_time(now: DateTime<Utc>, locked_until: DateTime<Utc>) -> Option<Duration> {
    let remaining = locked_until - now;
    (remaining > Duration::zero()).then_some(remaining)
}

/// In-memory view of the persisted lockout state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockoutState {
    pub failed_attempts: u32,
    pub locked_until: Option<DateTime<Utc>>,
}

impl LockoutState {
    /// Read the state from a store.
    ///
    /// Each key is decoded on its own; a malformed value is reported in the
    /// returned error list and replaced by its default so that a corrupt
    /// timestamp never leaves the guard locked forever.
    pub fn load(store: &dyn KeyValueStore) -> (Self, Vec<StorageError>) {
        let mut problems = Vec::new();

        let failed_attempts = match store.get(LOGIN_ATTEMPTS_KEY) {
            Some(raw) => decode_attempts(&raw).unwrap_or_else(|e| {
                problems.push(e);
                0
            }),
            None => 0,
        };

        let locked_until = match store.get(LOCK_UNTIL_KEY) {
            Some(raw) => decode_lock_until(&raw).map(Some).unwrap_or_else(|e| {
                problems.push(e);
                None
            }),
            None => None,
        };

        (
            Self {
                failed_attempts,
                locked_until,
            },
            problems,
        )
    }
}

fn decode_attempts(raw: &str) -> Result<u32, StorageError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| StorageError::MalformedState(format!("{LOGIN_ATTEMPTS_KEY}={raw:?}")))
}

fn decode_lock_until(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| StorageError::MalformedState(format!("{LOCK_UNTIL_KEY}={raw:?}")))
}

/// String key-value storage scoped to one admin client.
///
/// Writes are best effort: implementations log failures instead of returning
/// them, because the lockout guard never fails.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }
}

/// Store backed by a JSON object on disk, rewritten after every change.
///
/// Two processes sharing one file can interleave read-modify-write cycles and
/// lose an increment; that race is accepted.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read state file");
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt state file");
            BTreeMap::new()
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) {
        let result = serde_json::to_string_pretty(entries)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&self.path, json).map_err(|e| e.to_string()));

        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write state file");
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.read_all();
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.read_all();
        if entries.remove(key).is_some() {
            self.write_all(&entries);
        }
    }
}
