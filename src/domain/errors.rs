//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! The `Display` text of each variant is what the user sees as a notification.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The submitted ISBN was blank after trimming
    EmptyInput,
    /// Network error, timeout or non-2xx status from the metadata provider
    ProviderUnreachable(String),
    /// The provider answered with a payload we could not interpret
    MalformedResponse(String),
    /// The provider returned zero results for this ISBN
    NotFound(String),
    /// No authenticated user in the session
    Unauthorized,
    /// Book missing or owned by someone else
    AccessDenied,
    /// Rejected input outside the acquisition flow (user creation)
    Validation(String),
    /// Database/persistence error
    Database(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::EmptyInput => write!(f, "Please enter an ISBN."),
            DomainError::ProviderUnreachable(msg) => {
                write!(f, "Error connecting to Google Books API: {}", msg)
            }
            DomainError::MalformedResponse(msg) => {
                write!(f, "Error processing book data: {}", msg)
            }
            DomainError::NotFound(isbn) => write!(f, "No book found with ISBN: {}", isbn),
            DomainError::Unauthorized => write!(f, "Please login to access this page."),
            DomainError::AccessDenied => write!(f, "Book not found or access denied."),
            DomainError::Validation(msg) => write!(f, "{}", msg),
            DomainError::Database(msg) => write!(f, "An unexpected error occurred: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}
