//! Domain layer
//!
//! The error taxonomy shared by the book flows, and the traits the services
//! are written against: book and user storage, and the ISBN metadata lookup.

pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::{BookMetadata, BookRepository, MetadataProvider, UserRepository};
