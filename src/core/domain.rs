use serde::{Deserialize, Serialize};
use crate::core::repository::RepositoryStore;

pub const DEFAULT_TABLE: &str = "books";
pub const DEFAULT_DDB_ENDPOINT: &str = "http://localhost:8000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration abstracts config options for the reading tracker
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub table_name: String,
    pub store: RepositoryStore,
    pub endpoint_url: String,
    pub log_level: String,
}

impl Configuration {
    pub fn new(table_name: &str) -> Self {
        Configuration {
            table_name: table_name.to_string(),
            store: RepositoryStore::LocalDynamoDB,
            endpoint_url: DEFAULT_DDB_ENDPOINT.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    pub fn with_store(mut self, store: RepositoryStore) -> Self {
        self.store = store;
        self
    }

    /// Reads `SHELF_TABLE`, `SHELF_STORE`, `SHELF_DDB_ENDPOINT` and `SHELF_LOG_LEVEL`,
    /// keeping the default for every variable that is unset or unrecognized.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let mut config = Configuration::new(DEFAULT_TABLE);
        if let Some(table) = lookup("SHELF_TABLE").filter(|t| !t.trim().is_empty()) {
            config.table_name = table.trim().to_string();
        }
        if let Some(store) = lookup("SHELF_STORE") {
            match RepositoryStore::parse(store.as_str()) {
                Some(store) => config.store = store,
                None => tracing::warn!(store = store.as_str(), "unknown SHELF_STORE, using {}", config.store),
            }
        }
        if let Some(endpoint) = lookup("SHELF_DDB_ENDPOINT").filter(|e| !e.trim().is_empty()) {
            config.endpoint_url = endpoint.trim().to_string();
        }
        if let Some(level) = lookup("SHELF_LOG_LEVEL").filter(|l| !l.trim().is_empty()) {
            config.log_level = level.trim().to_ascii_lowercase();
        }
        config
    }
}
