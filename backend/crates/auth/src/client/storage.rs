//! Client Cookie Storage
//!
//! Browser-side cookie access. Reads and writes may fail (storage disabled,
//! private browsing), so every operation returns a `Result`.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use platform::cookie::EXPIRED_MAX_AGE;

#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("{0}")]
    Unavailable(String),
}

pub trait ClientStorage: Send + Sync + 'static {
    /// Current value of a live, non-empty cookie
    fn read(&self, name: &str) -> Result<Option<String>, StorageError>;

    fn write(&self, name: &str, value: &str, max_age: Duration) -> Result<(), StorageError>;

    /// Overwrite with an empty value and a negative max-age
    fn remove(&self, name: &str) -> Result<(), StorageError>;
}

impl<T: ClientStorage + ?Sized> ClientStorage for std::sync::Arc<T> {
    fn read(&self, name: &str) -> Result<Option<String>, StorageError> {
        (**self).read(name)
    }

    fn write(&self, name: &str, value: &str, max_age: Duration) -> Result<(), StorageError> {
        (**self).write(name, value, max_age)
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        (**self).remove(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCookie {
    pub value: String,
    pub max_age_secs: i64,
    pub expires_at: DateTime<Utc>,
}

impl StoredCookie {
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        !self.value.is_empty() && self.max_age_secs > 0 && now < self.expires_at
    }
}

/// In-process cookie jar with `document.cookie` semantics.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    entries: Mutex<HashMap<String, StoredCookie>>,
    disabled: AtomicBool,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail, as a locked-down browser would
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// Raw entry, including cleared ones
    pub fn entry(&self, name: &str) -> Option<StoredCookie> {
        self.entries.lock().ok()?.get(name).cloned()
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, StoredCookie>) -> T,
    ) -> Result<T, StorageError> {
        if self.disabled.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("cookie storage disabled".to_string()));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("cookie jar poisoned".to_string()))?;
        Ok(f(&mut entries))
    }
}

impl ClientStorage for MemoryCookieStore {
    fn read(&self, name: &str) -> Result<Option<String>, StorageError> {
        let now = Utc::now();
        self.with_entries(|entries| {
            entries
                .get(name)
                .filter(|cookie| cookie.is_live(now))
                .map(|cookie| cookie.value.clone())
        })
    }

    fn write(&self, name: &str, value: &str, max_age: Duration) -> Result<(), StorageError> {
        let max_age_secs = max_age.as_secs() as i64;
        let cookie = StoredCookie {
            value: value.to_string(),
            max_age_secs,
            expires_at: Utc::now() + chrono::Duration::seconds(max_age_secs),
        };
        self.with_entries(|entries| {
            entries.insert(name.to_string(), cookie);
        })
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        let cookie = StoredCookie {
            value: String::new(),
            max_age_secs: EXPIRED_MAX_AGE,
            expires_at: DateTime::<Utc>::default(),
        };
        self.with_entries(|entries| {
            entries.insert(name.to_string(), cookie);
        })
    }
}
