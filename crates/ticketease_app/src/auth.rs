#![forbid(unsafe_code)]

use ticketease_contracts::account::AccountRecord;
use ticketease_storage::{KvStore, StoreAccessor, StoreFault, StoreKeys};

/// Mock signup/login/logout over the persisted account registry and the
/// single session marker. Credential failures are plain `false`: callers
/// cannot tell wrong-password from unknown-email, and must not need to.
#[derive(Debug)]
pub struct SessionManager<S: KvStore> {
    store: StoreAccessor<S>,
    keys: StoreKeys,
}

impl<S: KvStore> SessionManager<S> {
    pub fn new(store: S, keys: StoreKeys) -> Self {
        Self {
            store: StoreAccessor::new(store),
            keys,
        }
    }

    /// Appends a new account unless the email is already registered. Does
    /// not log the new account in. Blank credentials are rejected the same
    /// way a duplicate is.
    pub fn signup(&mut self, email: &str, password: &str) -> bool {
        let Ok(account) = AccountRecord::v1(email.to_string(), password.to_string()) else {
            return false;
        };
        let mut registry = self.store.get_records::<AccountRecord>(&self.keys.users);
        if registry.iter().any(|row| row.email == account.email) {
            return false;
        }
        registry.push(account);
        self.store.set(&self.keys.users, &registry);
        true
    }

    /// Writes the session marker on an exact email and password match. A
    /// failed attempt leaves any existing session untouched.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        let registry = self.store.get_records::<AccountRecord>(&self.keys.users);
        let matched = registry
            .iter()
            .any(|row| row.email == email && row.password == password);
        if matched {
            self.store.set(&self.keys.session, &email);
        }
        matched
    }

    /// Removes the session marker; a no-op when already logged out.
    pub fn logout(&mut self) {
        self.store.remove(&self.keys.session);
    }

    /// True iff the session marker is present.
    pub fn is_authenticated(&self) -> bool {
        self.store.contains(&self.keys.session)
    }

    /// Email recorded by the active session, if any.
    pub fn current_user(&mut self) -> Option<String> {
        self.store.get_record::<String>(&self.keys.session)
    }

    /// Storage failures swallowed on behalf of this manager.
    pub fn faults(&self) -> &[StoreFault] {
        self.store.faults()
    }

    pub fn take_faults(&mut self) -> Vec<StoreFault> {
        self.store.take_faults()
    }
}
