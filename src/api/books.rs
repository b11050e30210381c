use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::api::views;
use crate::infrastructure::AppState;
use crate::infrastructure::session::{CurrentUser, FlashCategory, Session};
use crate::services::book_service;

#[derive(Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    isbn: String,
}

pub async fn index(
    State(state): State<AppState>,
    user: CurrentUser,
    mut session: Session,
) -> Response {
    let books = match book_service::list_books(state.book_repo.as_ref(), user.id).await {
        Ok(books) => books,
        Err(e) => {
            tracing::error!(user_id = user.id, "Failed to list books: {}", e);
            session.flash(FlashCategory::Error, e.to_string());
            Vec::new()
        }
    };

    let flashes = session.take_flashes();
    (
        session,
        Html(views::index_page(&user.username, &books, &flashes)),
    )
        .into_response()
}

pub async fn search_book(
    State(state): State<AppState>,
    user: CurrentUser,
    mut session: Session,
    Form(form): Form<SearchForm>,
) -> Response {
    let result = book_service::acquire_book(
        state.book_repo.as_ref(),
        state.metadata.as_ref(),
        user.id,
        &form.isbn,
    )
    .await;

    match result {
        Ok(book) => session.flash(
            FlashCategory::Success,
            format!("Book \"{}\" added successfully!", book.title),
        ),
        Err(e) => {
            let isbn = form.isbn.trim();
            tracing::warn!(user_id = user.id, %isbn, "Acquisition failed: {}", e);
            session.flash(FlashCategory::Error, e.to_string());
        }
    }

    (session, Redirect::to("/")).into_response()
}

pub async fn delete_book(
    State(state): State<AppState>,
    user: CurrentUser,
    mut session: Session,
    Path(book_id): Path<i32>,
) -> Response {
    match book_service::delete_owned_book(state.book_repo.as_ref(), user.id, book_id).await {
        Ok(()) => session.flash(FlashCategory::Success, "Book deleted successfully!"),
        Err(e) => session.flash(FlashCategory::Error, e.to_string()),
    }

    (session, Redirect::to("/")).into_response()
}
