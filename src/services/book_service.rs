//! Book Service - Pure business logic without HTTP layer
//!
//! Acquisition (ISBN -> provider lookup -> stored book) and owner-checked
//! deletion. Handlers only translate the outcome into notifications.

use crate::domain::{BookMetadata, BookRepository, DomainError, MetadataProvider};
use crate::models::{Book, NewBook};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Longest ISBN text repeated back in a notification; flashes live in the cookie
const MAX_ECHOED_ISBN: usize = 32;

fn echoed_isbn(isbn: &str) -> String {
    match isbn.char_indices().nth(MAX_ECHOED_ISBN) {
        Some((cut, _)) => format!("{}...", &isbn[..cut]),
        None => isbn.to_string(),
    }
}

/// Apply the field defaults to a provider result
pub fn resolve_metadata(user_id: i32, isbn: &str, meta: BookMetadata) -> NewBook {
    let authors = meta
        .authors
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| vec![UNKNOWN_AUTHOR.to_string()]);

    NewBook {
        user_id,
        isbn: isbn.to_string(),
        title: meta.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        author: authors.join(", "),
        page_count: meta
            .page_count
            .unwrap_or(0)
            .clamp(0, i32::MAX as i64) as i32,
        average_rating: meta.average_rating.unwrap_or(0.0),
        thumbnail: meta.thumbnail,
    }
}

/// Look up `raw_isbn` and store the first result for `user_id`.
///
/// Nothing is persisted unless the lookup yields a result.
pub async fn acquire_book(
    books: &dyn BookRepository,
    provider: &dyn MetadataProvider,
    user_id: i32,
    raw_isbn: &str,
) -> Result<Book, DomainError> {
    let isbn = raw_isbn.trim();
    if isbn.is_empty() {
        return Err(DomainError::EmptyInput);
    }

    let meta = provider
        .lookup_isbn(isbn)
        .await?
        .ok_or_else(|| DomainError::NotFound(echoed_isbn(isbn)))?;

    let book = books.create(resolve_metadata(user_id, isbn, meta)).await?;
    tracing::info!(user_id, book_id = book.id, %isbn, title = %book.title, "Book added");
    Ok(book)
}

/// Delete a book if, and only if, `user_id` owns it.
///
/// Missing and foreign-owned ids both report `AccessDenied`.
pub async fn delete_owned_book(
    books: &dyn BookRepository,
    user_id: i32,
    book_id: i32,
) -> Result<(), DomainError> {
    match books.find_by_id(book_id).await? {
        Some(book) if book.user_id == user_id => {
            books.delete(book_id).await?;
            tracing::info!(user_id, book_id, "Book deleted");
            Ok(())
        }
        _ => {
            tracing::warn!(user_id, book_id, "Delete refused: missing or not owned");
            Err(DomainError::AccessDenied)
        }
    }
}

pub async fn list_books(books: &dyn BookRepository, user_id: i32) -> Result<Vec<Book>, DomainError> {
    books.find_by_owner(user_id).await
}
