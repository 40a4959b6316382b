use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const MISSING_ID_MESSAGE: &str = "Cannot delete a book without an ID.";

#[derive(Debug, Clone, PartialEq)]
pub enum ShelfError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // The store could not be reached or throttled the request; the same call may
    // succeed later, but nothing in this crate retries it.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    // Raised when an operation needs a store-assigned identifier the book does not have yet.
    MissingIdentifier {
        message: String,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl ShelfError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> ShelfError {
        ShelfError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> ShelfError {
        ShelfError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> ShelfError {
        ShelfError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> ShelfError {
        ShelfError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> ShelfError {
        ShelfError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn missing_identifier() -> ShelfError {
        ShelfError::MissingIdentifier { message: MISSING_ID_MESSAGE.to_string() }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> ShelfError {
        if retryable {
            ShelfError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                ShelfError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") {
                ShelfError::access_denied(
                    format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                ShelfError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            ShelfError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn serialization(message: &str) -> ShelfError {
        ShelfError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> ShelfError {
        ShelfError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            ShelfError::Database { retryable, .. } => { *retryable }
            ShelfError::AccessDenied { .. } => { false }
            ShelfError::DuplicateKey { .. } => { false }
            ShelfError::NotFound { .. } => { false }
            ShelfError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            ShelfError::MissingIdentifier { .. } => { false }
            ShelfError::Serialization { .. } => { false }
            ShelfError::Runtime { .. } => { false }
        }
    }
}

impl From<serde_json::Error> for ShelfError {
    fn from(err: serde_json::Error) -> Self {
        ShelfError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for ShelfError {
    fn from(err: String) -> Self {
        ShelfError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for ShelfError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ShelfError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            ShelfError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            ShelfError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            ShelfError::NotFound { message } => {
                write!(f, "{}", message)
            }
            ShelfError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            ShelfError::MissingIdentifier { message } => {
                write!(f, "{}", message)
            }
            ShelfError::Serialization { message } => {
                write!(f, "{}", message)
            }
            ShelfError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for ShelfError {}

/// A specialized Result type for the book store and its collections.
pub type ShelfResult<T> = Result<T, ShelfError>;

/// Reading progress of a book. Values the tracker does not know are kept verbatim
/// in `Other` so they survive a load/save cycle.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ReadingStatus {
    Completed,
    Reading,
    WantToRead,
    Other(String),
}

impl ReadingStatus {
    // display priority, higher sorts first
    pub fn priority(&self) -> i32 {
        match self {
            ReadingStatus::Completed => 3,
            ReadingStatus::Reading => 2,
            ReadingStatus::WantToRead => 1,
            ReadingStatus::Other(_) => 0,
        }
    }
}

impl From<String> for ReadingStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "completed" => ReadingStatus::Completed,
            "reading" => ReadingStatus::Reading,
            "want-to-read" => ReadingStatus::WantToRead,
            _ => ReadingStatus::Other(s),
        }
    }
}

impl From<&str> for ReadingStatus {
    fn from(s: &str) -> Self {
        ReadingStatus::from(s.to_string())
    }
}

impl Display for ReadingStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ReadingStatus::Completed => write!(f, "completed"),
            ReadingStatus::Reading => write!(f, "reading"),
            ReadingStatus::WantToRead => write!(f, "want-to-read"),
            ReadingStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for ReadingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_string().as_str())
    }
}

impl<'de> Deserialize<'de> for ReadingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(deserializer)?;
        Ok(ReadingStatus::from(s))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{MISSING_ID_MESSAGE, ReadingStatus, ShelfError};

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(ShelfError::database("test", None, false), ShelfError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_missing_identifier_error() {
        let err = ShelfError::missing_identifier();
        assert!(matches!(err, ShelfError::MissingIdentifier{ message: _ }));
        assert_eq!(MISSING_ID_MESSAGE, err.to_string());
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(ShelfError::database_or_unavailable("test", None, true), ShelfError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(ShelfError::database_or_unavailable("test", Some("404".to_string()), false), ShelfError::NotFound{ message: _ }));
        assert!(matches!(ShelfError::database_or_unavailable("test", Some("400".to_string()), false), ShelfError::AccessDenied{ message: _, reason_code: _ }));
        assert!(matches!(ShelfError::database_or_unavailable("test", Some("500".to_string()), false), ShelfError::Database{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(ShelfError::database_or_unavailable("test", None, false), ShelfError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert!(!ShelfError::database("test", None, false).retryable());
        assert!(!ShelfError::access_denied("test", None).retryable());
        assert!(!ShelfError::duplicate_key("test").retryable());
        assert!(!ShelfError::not_found("test").retryable());
        assert!(!ShelfError::unavailable("test", None, false).retryable());
        assert!(ShelfError::unavailable("test", None, true).retryable());
        assert!(!ShelfError::missing_identifier().retryable());
        assert!(!ShelfError::serialization("test").retryable());
        assert!(!ShelfError::runtime("test", None).retryable());
    }

    #[tokio::test]
    async fn test_should_format_reading_status() {
        let statuses = vec![
            ReadingStatus::Completed,
            ReadingStatus::Reading,
            ReadingStatus::WantToRead,
            ReadingStatus::Other("abandoned".to_string()),
        ];
        for status in statuses {
            let str = status.to_string();
            let str_status = ReadingStatus::from(str);
            assert_eq!(status, str_status);
        }
    }

    #[tokio::test]
    async fn test_should_rank_reading_status() {
        assert_eq!(3, ReadingStatus::Completed.priority());
        assert_eq!(2, ReadingStatus::Reading.priority());
        assert_eq!(1, ReadingStatus::WantToRead.priority());
        assert_eq!(0, ReadingStatus::from("").priority());
        assert_eq!(0, ReadingStatus::from("Completed").priority());
    }

    #[tokio::test]
    async fn test_should_serialize_reading_status_as_string() {
        let json = serde_json::to_string(&ReadingStatus::WantToRead).expect("serialize status");
        assert_eq!("\"want-to-read\"", json);
        let status: ReadingStatus = serde_json::from_str("\"on-shelf\"").expect("deserialize status");
        assert_eq!(ReadingStatus::Other("on-shelf".to_string()), status);
    }
}
