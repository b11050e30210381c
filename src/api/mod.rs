pub mod auth;
pub mod books;
pub mod health;
pub mod views;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::infrastructure::AppState;
use crate::infrastructure::auth::require_login;

pub fn router(state: AppState) -> Router {
    // Everything here is behind the login gate
    let protected = Router::new()
        .route("/", get(books::index))
        .route("/search", post(books::search_book))
        .route("/delete/:book_id", post(books::delete_book))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_login));

    Router::new()
        .merge(protected)
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/health", get(health::health_check))
        .with_state(state)
}
