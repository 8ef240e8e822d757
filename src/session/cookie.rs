//! Session storage backed by the signed actix session cookie.
//!
//! The cookie lives in the browser, so the record stays client-persisted just
//! like it would in browser storage.

use actix_session::Session;

use crate::session::{KeyValueStore, StoreError};

impl KeyValueStore for Session {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Session::get::<String>(self, key).map_err(|err| StoreError::Storage(err.to_string()))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.insert(key, value)
            .map_err(|err| StoreError::Storage(err.to_string()))
    }

    fn remove(&self, key: &str) {
        Session::remove(self, key);
    }
}
