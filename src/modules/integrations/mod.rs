//! External metadata providers

pub mod google_books;

pub use google_books::GoogleBooksClient;
