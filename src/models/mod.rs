pub mod book;
pub mod user;

pub use book::{Book, NewBook};
