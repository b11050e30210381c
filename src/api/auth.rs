use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::api::views;
use crate::infrastructure::AppState;
use crate::infrastructure::auth::verify_password;
use crate::infrastructure::session::{Flash, FlashCategory, Session};

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

pub async fn login_page(mut session: Session) -> Response {
    if session.user().is_some() {
        return Redirect::to("/").into_response();
    }

    let flashes = session.take_flashes();
    (session, Html(views::login_page(&flashes))).into_response()
}

pub async fn login(
    State(state): State<AppState>,
    mut session: Session,
    Form(payload): Form<LoginForm>,
) -> Response {
    tracing::info!("Login attempt for user: {}", payload.username);

    let user = match state.user_repo.find_by_username(&payload.username).await {
        Ok(Some(u)) => Some(u),
        Ok(None) => {
            tracing::warn!("User not found: {}", payload.username);
            None
        }
        Err(e) => {
            tracing::error!("User lookup failed: {}", e);
            None
        }
    };

    let verified = user.filter(|u| match verify_password(&payload.password, &u.password_hash) {
        Ok(ok) => ok,
        Err(e) => {
            tracing::error!("Stored hash for {} is unreadable: {}", u.username, e);
            false
        }
    });

    match verified {
        Some(user) => {
            tracing::info!("Password verified successfully for user: {}", user.username);
            session.login(user.id, &user.username);
            session.flash(FlashCategory::Success, "Login successful!");
            (session, Redirect::to("/")).into_response()
        }
        None => {
            tracing::warn!("Login failed for user: {}", payload.username);
            // Render directly; the notice belongs to this page only
            let mut flashes = session.take_flashes();
            flashes.push(Flash {
                category: FlashCategory::Error,
                message: "Invalid username or password.".to_string(),
            });
            (session, Html(views::login_page(&flashes))).into_response()
        }
    }
}

pub async fn logout(mut session: Session) -> Response {
    if let Some(user) = session.user() {
        tracing::info!(user_id = user.id, "User logged out");
    }
    session.clear();
    session.flash(FlashCategory::Success, "You have been logged out.");
    (session, Redirect::to("/login")).into_response()
}
