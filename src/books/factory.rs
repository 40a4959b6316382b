use std::sync::Arc;
use crate::books::domain::BookStore;
use crate::books::repository::BookCollection;
use crate::books::repository::ddb_book_collection::DDBBookCollection;
use crate::books::repository::memory_book_collection::MemoryBookCollection;
use crate::core::diagnostics::TracingSink;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table};

pub async fn create_book_collection(config: &Configuration) -> Arc<dyn BookCollection> {
    match config.store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(config).await;
            Arc::new(DDBBookCollection::new(client, config.table_name.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(config).await;
            if let Err(err) = create_table(&client, config.table_name.as_str(), "id").await {
                tracing::debug!(error = %err, "books table not created");
            }
            Arc::new(DDBBookCollection::new(client, config.table_name.as_str()))
        }
        RepositoryStore::Memory => {
            Arc::new(MemoryBookCollection::new())
        }
    }
}

// failures are reported through tracing
pub async fn create_book_store(config: &Configuration) -> BookStore {
    let collection = create_book_collection(config).await;
    BookStore::new(collection, Arc::new(TracingSink))
}
