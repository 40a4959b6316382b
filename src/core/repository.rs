use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

// RepositoryStore selects the backend that holds the books collection.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    Memory,
}

impl RepositoryStore {
    // parses the SHELF_STORE spelling, None for anything unrecognized
    pub fn parse(s: &str) -> Option<RepositoryStore> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamodb" | "ddb" => Some(RepositoryStore::DynamoDB),
            "local" | "localdynamodb" => Some(RepositoryStore::LocalDynamoDB),
            "memory" => Some(RepositoryStore::Memory),
            _ => None,
        }
    }
}

impl Display for RepositoryStore {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RepositoryStore::DynamoDB => write!(f, "dynamodb"),
            RepositoryStore::LocalDynamoDB => write!(f, "local"),
            RepositoryStore::Memory => write!(f, "memory"),
        }
    }
}
