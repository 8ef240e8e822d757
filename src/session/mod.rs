//! Client-held session record and the context pages read it through.
//!
//! The record is the only state persisted on the client. It is written
//! wholesale after a successful login, deleted on logout, and never partially
//! updated. It gates which pages are reachable; authorization itself stays
//! with the backend.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::watch;

use crate::domain::auth::{AccountId, LoginResponse, Profile, Role};
use crate::domain::types::{DentistId, PatientId};

#[cfg(feature = "server")]
pub mod cookie;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Storage key of the session record.
pub const SESSION_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage error: {0}")]
    Storage(String),

    #[error("session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key/value storage persisted on the client side.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: &str);
}

/// Process-local store, used outside of a browser session and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Proof-of-login kept by the client for UI gating.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    pub id: AccountId,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    pub profile: Profile,
    #[serde(rename = "isLoggedIn", default)]
    pub is_logged_in: bool,
    /// Bearer token, when the backend issues one at login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Remaining login response fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionRecord {
    /// Merges a login response with the derived profile and the logged-in flag.
    ///
    /// Returns `None` when the response carries no account id.
    pub fn from_login(response: LoginResponse) -> Option<Self> {
        let id = response.id.filter(AccountId::is_present)?;
        let role = Role::from_backend(&response.role);
        Some(Self {
            id,
            nom: response.nom,
            prenom: response.prenom,
            email: response.email,
            role,
            profile: role.profile(),
            is_logged_in: true,
            token: response.token,
            extra: response.extra,
        })
    }

    /// Account id as a patient identifier; `None` for non-numeric ids.
    pub fn patient_id(&self) -> Option<PatientId> {
        self.id.as_i64().and_then(|id| PatientId::new(id).ok())
    }

    /// Account id as a dentist identifier; `None` for non-numeric ids.
    pub fn dentist_id(&self) -> Option<DentistId> {
        self.id.as_i64().and_then(|id| DentistId::new(id).ok())
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom).trim().to_string()
    }

    /// Extra backend field as text, if present and non-empty.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Single entry point to the session record.
///
/// Reads always go to the underlying store. Writes go through
/// [`SessionContext::set_session`] and [`SessionContext::clear_session`],
/// which notify every subscriber.
pub struct SessionContext<S> {
    store: S,
    sender: watch::Sender<Option<SessionRecord>>,
}

impl<S: KeyValueStore> SessionContext<S> {
    pub fn new(store: S) -> Self {
        let current = read_record(&store);
        let (sender, _) = watch::channel(current);
        Self { store, sender }
    }

    /// Current record, or `None` when absent or unreadable.
    pub fn get_session(&self) -> Option<SessionRecord> {
        read_record(&self.store)
    }

    /// Overwrites the record, forcing the logged-in flag on.
    pub fn set_session(&self, mut record: SessionRecord) -> Result<(), StoreError> {
        record.is_logged_in = true;
        let serialized = serde_json::to_string(&record)?;
        self.store.set(SESSION_KEY, serialized)?;
        log::info!("Session opened for account {:?}", record.id);
        self.sender.send_replace(Some(record));
        Ok(())
    }

    pub fn clear_session(&self) {
        self.store.remove(SESSION_KEY);
        self.sender.send_replace(None);
    }

    /// Record of a logged-in user, filtering out records with the flag off.
    pub fn current_user(&self) -> Option<SessionRecord> {
        self.get_session().filter(|record| record.is_logged_in)
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn patient_id(&self) -> Option<PatientId> {
        self.current_user().and_then(|record| record.patient_id())
    }

    /// Receiver notified on every login and logout made through this context.
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionRecord>> {
        self.sender.subscribe()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn read_record<S: KeyValueStore + ?Sized>(store: &S) -> Option<SessionRecord> {
    let raw = match store.get(SESSION_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            log::error!("Failed to read session: {err}");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(err) => {
            log::error!("Discarding malformed session record: {err}");
            None
        }
    }
}
