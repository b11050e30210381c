//! Infrastructure layer - Framework implementations
//!
//! - Database bootstrap (db)
//! - HTTP server setup (server)
//! - Configuration loading (config)
//! - Password hashing and the login gate (auth)
//! - Signed cookie session and flash notifications (session)
//! - Repository implementations (repositories)
//! - Application state (state)

pub mod auth;
pub mod config;
pub mod db;
pub mod repositories;
pub mod seed;
pub mod server;
pub mod session;
pub mod state;

pub use repositories::*;
pub use state::AppState;
