//! Services Layer
//!
//! Business logic extracted from HTTP handlers, written against the domain
//! traits so it can be exercised without a server or a real provider.

pub mod book_service;

pub use book_service::*;
