//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{BookRepository, MetadataProvider, UserRepository};
use crate::infrastructure::session::SessionKeys;
use crate::infrastructure::{SeaOrmBookRepository, SeaOrmUserRepository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Book repository
    pub book_repo: Arc<dyn BookRepository>,
    /// User repository
    pub user_repo: Arc<dyn UserRepository>,
    /// ISBN metadata lookup
    pub metadata: Arc<dyn MetadataProvider>,
    /// Session cookie signing keys
    pub session_keys: SessionKeys,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        metadata: Arc<dyn MetadataProvider>,
        session_keys: SessionKeys,
    ) -> Self {
        let book_repo = Arc::new(SeaOrmBookRepository::new(db.clone()));
        let user_repo = Arc::new(SeaOrmUserRepository::new(db));

        Self {
            book_repo,
            user_repo,
            metadata,
            session_keys,
        }
    }
}

impl axum::extract::FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        state.session_keys.clone()
    }
}
