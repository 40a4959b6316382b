pub mod ddb_book_collection;
pub mod memory_book_collection;

use async_trait::async_trait;
use crate::books::dto::{BookChanges, BookRecord, NewBookRecord};
use crate::core::library::ShelfResult;

// BookCollection is the remote `books` collection. The store owns identifiers:
// insert assigns one, and update/delete are keyed by it.
#[async_trait]
pub trait BookCollection: Sync + Send {
    // inserts a new record and returns it as stored
    async fn insert(&self, record: &NewBookRecord) -> ShelfResult<BookRecord>;

    // updates the record with the given id
    async fn update(&self, id: &str, changes: &BookChanges) -> ShelfResult<usize>;

    // deletes the record with the given id
    async fn delete(&self, id: &str) -> ShelfResult<usize>;

    // returns every stored record
    async fn find_all(&self) -> ShelfResult<Vec<BookRecord>>;
}
