//! Mock session storage for isolating session handling in tests.

use mockall::mock;

use crate::session::{KeyValueStore, StoreError};

mock! {
    pub Store {}

    impl KeyValueStore for Store {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
        fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
        fn remove(&self, key: &str);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SESSION_KEY, SessionContext};

    #[test]
    fn storage_failure_reads_as_no_session() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .withf(|key| key == SESSION_KEY)
            .returning(|_| Err(StoreError::Storage("cookie too large".into())));

        let context = SessionContext::new(store);

        assert!(context.get_session().is_none());
        assert!(!context.is_logged_in());
    }

    #[test]
    fn logout_removes_the_session_key() {
        let mut store = MockStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_remove()
            .withf(|key| key == SESSION_KEY)
            .times(1)
            .return_const(());

        let context = SessionContext::new(store);
        context.clear_session();
    }
}
