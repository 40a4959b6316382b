use shelf::books::domain::model::Book;
use shelf::books::factory::create_book_store;
use shelf::core::domain::Configuration;
use shelf::core::library::ShelfError;
use shelf::utils::ddb::setup_tracing;

// Prints the reading list in display order. Configuration comes from SHELF_* variables.
#[tokio::main]
async fn main() -> Result<(), ShelfError> {
    let config = Configuration::from_env();
    setup_tracing(config.log_level.as_str());
    tracing::info!(store = %config.store, table = config.table_name.as_str(), "loading books");

    let store = create_book_store(&config).await;
    let books = store.load_books().await?;
    for book in &books {
        println!("{}", render(book));
    }
    Ok(())
}

fn render(book: &Book) -> String {
    let finished = book.end_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{:<12} {:<10} {} by {} ({} pages)",
            book.status().to_string(), finished, book.title(), book.author(), book.pages())
}
