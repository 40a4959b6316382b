use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::library::ReadingStatus;
use crate::utils::date::serializer;

// A date as it arrives from a form, an import file or a stored row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Date(DateTime<Utc>),
    Text(String),
}

impl From<DateTime<Utc>> for DateInput {
    fn from(date: DateTime<Utc>) -> Self {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Text(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Text(s)
    }
}

// A page count that may still be text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PagesInput {
    Number(i64),
    Text(String),
}

impl Default for PagesInput {
    fn default() -> Self {
        PagesInput::Number(0)
    }
}

impl From<i64> for PagesInput {
    fn from(n: i64) -> Self {
        PagesInput::Number(n)
    }
}

impl From<&str> for PagesInput {
    fn from(s: &str) -> Self {
        PagesInput::Text(s.to_string())
    }
}

impl From<String> for PagesInput {
    fn from(s: String) -> Self {
        PagesInput::Text(s)
    }
}

/// BookInput is the raw, untyped shape a caller collects before building a
/// [`Book`](crate::books::domain::model::Book). Nothing here is validated yet.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BookInput {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub start_date: Option<DateInput>,
    #[serde(default)]
    pub end_date: Option<DateInput>,
    #[serde(default)]
    pub creation_date: Option<DateInput>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub pages: PagesInput,
}

impl BookInput {
    pub fn new(title: &str, author: &str, status: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }
}

// NewBookRecord is the insert payload: every field except the identifier, which
// the store assigns, and the creation date, which the store stamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBookRecord {
    pub title: String,
    pub author: String,
    #[serde(with = "serializer")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(with = "serializer")]
    pub end_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub status: ReadingStatus,
    pub pages: i64,
}

// BookChanges is the update payload keyed by `id`. Dates are already ISO-8601
// strings and the creation date is never re-sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookChanges {
    pub id: String,
    pub title: String,
    pub author: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub image_url: Option<String>,
    pub status: ReadingStatus,
    pub pages: i64,
}

// BookRecord is a row as held by the remote collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(with = "serializer", default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(with = "serializer", default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(with = "serializer", default)]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub status: ReadingStatus,
    #[serde(default)]
    pub pages: i64,
}

impl From<BookRecord> for BookInput {
    fn from(other: BookRecord) -> Self {
        Self {
            id: Some(other.id),
            title: other.title,
            author: other.author,
            start_date: other.start_date.map(DateInput::Date),
            end_date: other.end_date.map(DateInput::Date),
            creation_date: other.creation_date.map(DateInput::Date),
            image_url: other.image_url,
            status: other.status.to_string(),
            pages: PagesInput::Number(other.pages),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use crate::books::dto::{BookChanges, BookInput, BookRecord, DateInput, NewBookRecord, PagesInput};
    use crate::core::library::ReadingStatus;

    #[tokio::test]
    async fn test_should_deserialize_mixed_input() {
        let input: BookInput = serde_json::from_value(json!({
            "id": null,
            "title": "Dune",
            "author": "Frank Herbert",
            "start_date": "2023-01-05",
            "end_date": null,
            "image_url": null,
            "status": "reading",
            "pages": "412"
        })).expect("should parse input");
        assert_eq!(None, input.id);
        assert_eq!(Some(DateInput::Text("2023-01-05".to_string())), input.start_date);
        assert_eq!(None, input.end_date);
        assert_eq!(None, input.creation_date);
        assert_eq!(PagesInput::Text("412".to_string()), input.pages);
    }

    #[tokio::test]
    async fn test_should_deserialize_canonical_dates() {
        let input: BookInput = serde_json::from_value(json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "end_date": "2023-01-05T00:00:00Z",
            "status": "completed",
            "pages": 412
        })).expect("should parse input");
        let date = Utc.with_ymd_and_hms(2023, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(Some(DateInput::Date(date)), input.end_date);
        assert_eq!(PagesInput::Number(412), input.pages);
    }

    #[tokio::test]
    async fn test_should_serialize_insert_payload_without_id() {
        let record = NewBookRecord {
            title: "Emma".to_string(),
            author: "Jane Austen".to_string(),
            start_date: Some(Utc.with_ymd_and_hms(2022, 6, 1, 0, 0, 0).unwrap()),
            end_date: None,
            image_url: None,
            status: ReadingStatus::Reading,
            pages: 474,
        };
        let value = serde_json::to_value(&record).expect("should serialize");
        assert!(value.get("id").is_none());
        assert!(value.get("creation_date").is_none());
        assert_eq!(json!("2022-06-01T00:00:00.000Z"), value["start_date"]);
        assert_eq!(json!(null), value["end_date"]);
        assert_eq!(json!("reading"), value["status"]);
    }

    #[tokio::test]
    async fn test_should_serialize_update_payload_without_creation_date() {
        let changes = BookChanges {
            id: "b-1".to_string(),
            title: "Emma".to_string(),
            author: "Jane Austen".to_string(),
            start_date: Some("2022-06-01T00:00:00.000Z".to_string()),
            end_date: None,
            image_url: None,
            status: ReadingStatus::Completed,
            pages: 474,
        };
        let value = serde_json::to_value(&changes).expect("should serialize");
        assert_eq!(json!("b-1"), value["id"]);
        assert!(value.get("creation_date").is_none());
    }

    #[tokio::test]
    async fn test_should_convert_record_to_input() {
        let record: BookRecord = serde_json::from_value(json!({
            "id": "b-2",
            "title": "Emma",
            "author": "Jane Austen",
            "creation_date": "2021-02-03T04:05:06.000Z",
            "end_date": "garbage",
            "status": "paused",
            "pages": 474
        })).expect("should parse record");
        assert_eq!(None, record.end_date);
        assert_eq!(ReadingStatus::Other("paused".to_string()), record.status);
        let input = BookInput::from(record);
        assert_eq!(Some("b-2".to_string()), input.id);
        assert_eq!("paused", input.status.as_str());
        assert!(matches!(input.creation_date, Some(DateInput::Date(_))));
    }
}
