pub mod model;

use std::sync::Arc;
use crate::books::domain::model::Book;
use crate::books::repository::BookCollection;
use crate::books::sorting::sort_books;
use crate::core::diagnostics::DiagnosticSink;
use crate::core::library::ShelfResult;

// BookStore is what a Book needs to persist itself: the remote collection and the
// sink that failures are reported to.
#[derive(Clone)]
pub struct BookStore {
    collection: Arc<dyn BookCollection>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl BookStore {
    pub fn new(collection: Arc<dyn BookCollection>, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            collection,
            diagnostics,
        }
    }

    pub fn collection(&self) -> &dyn BookCollection {
        self.collection.as_ref()
    }

    pub fn diagnostics(&self) -> &dyn DiagnosticSink {
        self.diagnostics.as_ref()
    }

    /// Loads every stored book, most relevant first.
    pub async fn load_books(&self) -> ShelfResult<Vec<Book>> {
        let records = self.collection.find_all().await.map_err(|err| {
            self.diagnostics.report("Error loading books:", &err);
            err
        })?;
        let mut books: Vec<Book> = records.into_iter().map(Book::from).collect();
        sort_books(&mut books);
        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::{TimeZone, Utc};
    use crate::books::domain::BookStore;
    use crate::books::domain::model::Book;
    use crate::books::dto::{BookInput, DateInput};
    use crate::books::repository::memory_book_collection::MemoryBookCollection;
    use crate::core::diagnostics::RecordingSink;
    use crate::core::library::ShelfError;

    #[tokio::test]
    async fn test_should_load_sorted_books() {
        let collection = Arc::new(MemoryBookCollection::new());
        let sink = Arc::new(RecordingSink::new());
        let store = BookStore::new(collection.clone(), sink.clone());

        let mut wishlist = Book::new(BookInput::new("Ulysses", "James Joyce", "want-to-read"));
        let mut current = Book::new(BookInput::new("Dune", "Frank Herbert", "reading"));
        let mut input = BookInput::new("Emma", "Jane Austen", "completed");
        input.end_date = Some(DateInput::from(Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap()));
        let mut finished = Book::new(input);
        for book in [&mut wishlist, &mut current, &mut finished] {
            book.save(&store).await.expect("should save book");
        }

        let books = store.load_books().await.expect("should load books");
        let titles: Vec<&str> = books.iter().map(|b| b.title()).collect();
        assert_eq!(vec!["Emma", "Dune", "Ulysses"], titles);
        assert!(books.iter().all(|b| b.id().is_some()));
    }

    #[tokio::test]
    async fn test_should_report_load_failure() {
        let collection = Arc::new(MemoryBookCollection::new());
        let sink = Arc::new(RecordingSink::new());
        let store = BookStore::new(collection.clone(), sink.clone());
        collection.fail_next(ShelfError::runtime("offline", None)).await;

        let res = store.load_books().await;
        assert!(res.is_err());
        assert_eq!("Error loading books:", sink.reports()[0].0.as_str());
    }
}
