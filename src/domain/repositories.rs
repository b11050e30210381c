//! Repository trait definitions
//!
//! These traits define the contract for data access and for the external
//! metadata lookup. Implementations live in the infrastructure layer and in
//! `modules::integrations`.

use async_trait::async_trait;

use super::DomainError;
use crate::models::book::{Book, NewBook};
use crate::models::user;

/// Raw metadata for one volume, as returned by a provider.
///
/// Every field is optional; defaults are applied by the acquisition flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookMetadata {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub page_count: Option<i64>,
    pub average_rating: Option<f64>,
    pub thumbnail: Option<String>,
}

/// Lookup of book metadata by ISBN against an external service
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch the first matching volume, or `None` when the provider has no result
    async fn lookup_isbn(&self, isbn: &str) -> Result<Option<BookMetadata>, DomainError>;
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books owned by a user, newest first
    async fn find_by_owner(&self, user_id: i32) -> Result<Vec<Book>, DomainError>;

    /// Find a single book by ID, regardless of owner
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Insert a new book
    async fn create(&self, book: NewBook) -> Result<Book, DomainError>;

    /// Delete a book by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, DomainError>;

    /// Create a user from an already hashed password
    async fn create(&self, username: &str, password_hash: &str)
    -> Result<user::Model, DomainError>;
}
