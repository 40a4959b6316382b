use chrono::{DateTime, Utc};
use crate::books::domain::BookStore;
use crate::books::dto::{BookChanges, BookInput, BookRecord, DateInput, NewBookRecord, PagesInput};
use crate::core::library::{ReadingStatus, ShelfError, ShelfResult};
use crate::utils::date::{opt_iso_string, parse_date};

// Book is one entry of a reading list, normalized from whatever the caller collected.
// The identifier stays None until the first successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    id: Option<String>,
    title: String,
    author: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    creation_date: Option<DateTime<Utc>>,
    image_url: Option<String>,
    status: ReadingStatus,
    pages: i64,
}

impl Book {
    pub fn new(input: BookInput) -> Self {
        Self {
            id: input.id,
            title: input.title,
            author: input.author,
            start_date: normalize_date(input.start_date),
            end_date: normalize_date(input.end_date),
            creation_date: normalize_date(input.creation_date),
            image_url: input.image_url,
            status: ReadingStatus::from(input.status),
            pages: coerce_pages(input.pages),
        }
    }

    /// Inserts the book when it has no identifier yet, otherwise updates the stored
    /// record keyed by the identifier. A failure is reported to the store's
    /// diagnostic sink and handed back; nothing is retried.
    pub async fn save(&mut self, store: &BookStore) -> ShelfResult<()> {
        let res = match self.id.clone() {
            None => match store.collection().insert(&self.new_record()).await {
                Ok(record) => {
                    tracing::debug!(id = record.id.as_str(), "book inserted");
                    self.id = Some(record.id);
                    self.creation_date = record.creation_date;
                    Ok(())
                }
                Err(err) => Err(err),
            },
            Some(id) => store.collection().update(id.as_str(), &self.changes(id.as_str())).await.map(|_| ()),
        };
        if let Err(ref err) = res {
            store.diagnostics().report("Error saving book:", err);
        }
        res
    }

    /// Removes the stored record. The instance itself stays usable and still
    /// carries its identifier, so the caller should drop it afterwards.
    pub async fn delete(&self, store: &BookStore) -> ShelfResult<()> {
        let id = match self.id.as_deref() {
            Some(id) => id,
            None => {
                let err = ShelfError::missing_identifier();
                store.diagnostics().report("Error deleting book:", &err);
                return Err(err);
            }
        };
        store.collection().delete(id).await.map(|_| ()).map_err(|err| {
            store.diagnostics().report("Error deleting book:", &err);
            err
        })
    }

    fn new_record(&self) -> NewBookRecord {
        NewBookRecord {
            title: self.title.clone(),
            author: self.author.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            image_url: self.image_url.clone(),
            status: self.status.clone(),
            pages: self.pages,
        }
    }

    fn changes(&self, id: &str) -> BookChanges {
        BookChanges {
            id: id.to_string(),
            title: self.title.clone(),
            author: self.author.clone(),
            start_date: opt_iso_string(self.start_date.as_ref()),
            end_date: opt_iso_string(self.end_date.as_ref()),
            image_url: self.image_url.clone(),
            status: self.status.clone(),
            pages: self.pages,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.creation_date
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn status(&self) -> &ReadingStatus {
        &self.status
    }

    pub fn pages(&self) -> i64 {
        self.pages
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_author(&mut self, author: &str) {
        self.author = author.to_string();
    }

    pub fn set_start_date(&mut self, start_date: Option<DateTime<Utc>>) {
        self.start_date = start_date;
    }

    pub fn set_end_date(&mut self, end_date: Option<DateTime<Utc>>) {
        self.end_date = end_date;
    }

    pub fn set_image_url(&mut self, image_url: Option<String>) {
        self.image_url = image_url;
    }

    pub fn set_status(&mut self, status: ReadingStatus) {
        self.status = status;
    }

    pub fn set_pages<P: Into<PagesInput>>(&mut self, pages: P) {
        self.pages = coerce_pages(pages.into());
    }
}

impl From<BookRecord> for Book {
    fn from(other: BookRecord) -> Self {
        Book::new(BookInput::from(other))
    }
}

pub fn normalize_date(input: Option<DateInput>) -> Option<DateTime<Utc>> {
    match input {
        None => None,
        Some(DateInput::Date(date)) => Some(date),
        Some(DateInput::Text(s)) => parse_date(s.as_str()),
    }
}

/// Reads a base-10 integer from the start of `s`: leading whitespace and one sign
/// are allowed, and everything after the last leading digit is ignored, so
/// `"320 pages"` gives 320. Returns None when no digit leads or the value overflows.
pub fn parse_pages(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = match s.as_bytes().first() {
        Some(b'-') | Some(b'+') => 1,
        _ => 0,
    };
    let digits = &s[sign_len..];
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    s[..sign_len + end].parse::<i64>().ok()
}

// unparseable page counts are stored as 0
fn coerce_pages(input: PagesInput) -> i64 {
    match input {
        PagesInput::Number(n) => n,
        PagesInput::Text(s) => match parse_pages(s.as_str()) {
            Some(n) => n,
            None => {
                tracing::warn!(pages = s.as_str(), "page count is not a number, storing 0");
                0
            }
        },
    }
}
