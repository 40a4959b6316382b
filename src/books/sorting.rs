use std::cmp::Ordering;
use chrono::{DateTime, Utc};
use crate::books::domain::model::Book;

/// Orders books for display, most relevant first: latest end date, then higher
/// status priority, latest start date, latest creation date, and finally fewer
/// pages. Missing dates sort after present ones at every date tier.
pub fn compare_books(a: &Book, b: &Book) -> Ordering {
    compare_dates(a.end_date(), b.end_date())
        .then_with(|| b.status().priority().cmp(&a.status().priority()))
        .then_with(|| compare_dates(a.start_date(), b.start_date()))
        .then_with(|| compare_dates(a.creation_date(), b.creation_date()))
        .then_with(|| a.pages().cmp(&b.pages()))
}

// stable: fully tied books keep their input order
pub fn sort_books(books: &mut [Book]) {
    books.sort_by(compare_books);
}

fn compare_dates(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => b.cmp(&a),
    }
}
