use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;
use crate::books::dto::{BookChanges, BookRecord, NewBookRecord};
use crate::books::repository::BookCollection;
use crate::core::library::{ShelfError, ShelfResult};
use crate::utils::date::parse_date;

#[derive(Debug, Clone, PartialEq)]
pub enum CollectionCall {
    Insert(NewBookRecord),
    Update(String, BookChanges),
    Delete(String),
    FindAll,
}

// MemoryBookCollection keeps records in insertion order and remembers every call
// it received. A failure queued with `fail_next` is returned by the next call.
#[derive(Debug, Default)]
pub struct MemoryBookCollection {
    records: Mutex<Vec<BookRecord>>,
    calls: Mutex<Vec<CollectionCall>>,
    failure: Mutex<Option<ShelfError>>,
}

impl MemoryBookCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fail_next(&self, err: ShelfError) {
        *self.failure.lock().await = Some(err);
    }

    pub async fn calls(&self) -> Vec<CollectionCall> {
        self.calls.lock().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<BookRecord> {
        self.records.lock().await.iter().find(|r| r.id == id).cloned()
    }

    async fn record_call(&self, call: CollectionCall) -> ShelfResult<()> {
        self.calls.lock().await.push(call);
        match self.failure.lock().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BookCollection for MemoryBookCollection {
    async fn insert(&self, record: &NewBookRecord) -> ShelfResult<BookRecord> {
        self.record_call(CollectionCall::Insert(record.clone())).await?;
        let stored = BookRecord {
            id: Uuid::new_v4().to_string(),
            title: record.title.clone(),
            author: record.author.clone(),
            start_date: record.start_date,
            end_date: record.end_date,
            creation_date: Some(Utc::now()),
            image_url: record.image_url.clone(),
            status: record.status.clone(),
            pages: record.pages,
        };
        self.records.lock().await.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, changes: &BookChanges) -> ShelfResult<usize> {
        self.record_call(CollectionCall::Update(id.to_string(), changes.clone())).await?;
        let mut records = self.records.lock().await;
        let record = records.iter_mut().find(|r| r.id == id)
            .ok_or_else(|| ShelfError::not_found(format!("book not found for {}", id).as_str()))?;
        record.title = changes.title.clone();
        record.author = changes.author.clone();
        record.start_date = changes.start_date.as_deref().and_then(parse_date);
        record.end_date = changes.end_date.as_deref().and_then(parse_date);
        record.image_url = changes.image_url.clone();
        record.status = changes.status.clone();
        record.pages = changes.pages;
        Ok(1)
    }

    async fn delete(&self, id: &str) -> ShelfResult<usize> {
        self.record_call(CollectionCall::Delete(id.to_string())).await?;
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(before - records.len())
    }

    async fn find_all(&self) -> ShelfResult<Vec<BookRecord>> {
        self.record_call(CollectionCall::FindAll).await?;
        Ok(self.records.lock().await.clone())
    }
}
