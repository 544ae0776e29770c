//! Session correlation for lead logging.
//!
//! The identifier is an opaque analytics tag, not authentication. It is
//! resolved once per page view and threaded through the submit flow as an
//! explicit value; resolution must never block message sending.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::Rng;
use thiserror::Error;

/// Storage key under which the session identifier is persisted.
const SESSION_STORAGE_KEY: &str = "chatSessionId";

/// Prefix for identifiers that survived into the store.
const PERSISTED_PREFIX: &str = "session";

/// Prefix for transient identifiers generated when the store is unavailable.
const TRANSIENT_PREFIX: &str = "temp_session";

/// Characters used for the random identifier suffix.
const SUFFIX_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random identifier suffix.
const SUFFIX_LEN: usize = 9;

/// Error raised by a session store.
#[derive(Debug, Error)]
#[error("session store unavailable: {0}")]
pub struct SessionStoreError(pub String);

/// Session-scoped key/value storage, as the embedding page provides it.
pub trait SessionStore {
    /// Read a stored value.
    ///
    /// # Errors
    /// Returns an error if the store is unavailable.
    fn load(&self, key: &str) -> Result<Option<String>, SessionStoreError>;

    /// Persist a value.
    ///
    /// # Errors
    /// Returns an error if the store is unavailable.
    fn store(&self, key: &str, value: &str) -> Result<(), SessionStoreError>;
}

/// Session correlation tag threaded through the submit flow.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionContext {
    /// Opaque identifier carried on every logged event.
    pub id: String,
    /// Whether the identifier survived into the store.
    pub persisted: bool,
}

impl SessionContext {
    /// Resolve the session identifier from the store.
    ///
    /// Reuses a stored identifier when present; otherwise generates one and
    /// persists it. Any store failure yields a transient identifier
    /// instead, so resolution always succeeds.
    #[must_use]
    pub fn resolve(store: &dyn SessionStore) -> Self {
        match store.load(SESSION_STORAGE_KEY) {
            Ok(Some(id)) => Self {
                id,
                persisted: true,
            },
            Ok(None) => {
                let id = generate_id(PERSISTED_PREFIX);
                match store.store(SESSION_STORAGE_KEY, &id) {
                    Ok(()) => Self {
                        id,
                        persisted: true,
                    },
                    Err(err) => {
                        tracing::debug!("session store write failed: {err}");
                        Self::transient()
                    }
                }
            }
            Err(err) => {
                tracing::debug!("session store read failed: {err}");
                Self::transient()
            }
        }
    }

    /// Build a transient context without touching any store.
    #[must_use]
    pub fn transient() -> Self {
        Self {
            id: generate_id(TRANSIENT_PREFIX),
            persisted: false,
        }
    }
}

/// Generate `<prefix>_<unix millis>_<random suffix>`.
fn generate_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..SUFFIX_CHARSET.len());
            char::from(SUFFIX_CHARSET[idx])
        })
        .collect();
    format!("{prefix}_{millis}_{suffix}")
}

/// In-memory session store for embedding shells and tests.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let values = self
            .values
            .lock()
            .map_err(|_| SessionStoreError("lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| SessionStoreError("lock poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
