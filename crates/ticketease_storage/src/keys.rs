#![forbid(unsafe_code)]

/// Storage key namespace for one deployment of the app. Injected next to
/// the store handle so tests can run against a scratch namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKeys {
    pub users: String,
    pub session: String,
    pub tickets: String,
}

impl StoreKeys {
    /// Key layout every deployed build reads and writes. The names are a
    /// compatibility contract with existing stored data.
    pub fn ticketapp_v1() -> Self {
        Self {
            users: "ticketapp_users".to_string(),
            session: "ticketapp_session".to_string(),
            tickets: "tickets".to_string(),
        }
    }
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self::ticketapp_v1()
    }
}
