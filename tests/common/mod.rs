#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use bookshelf::db;
use cookie::Cookie;
use bookshelf::google_books::GoogleBooksClient;
use bookshelf::infrastructure::session::SessionKeys;
use bookshelf::infrastructure::{AppState, SeaOrmUserRepository};
use bookshelf::models::book::{self, Entity as BookEntity};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tower::util::ServiceExt; // for `oneshot`

// Helper to build the full app against an in-memory database and a provider URL
pub async fn setup_app(api_url: &str) -> (Router, DatabaseConnection) {
    let conn = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let provider =
        GoogleBooksClient::new(api_url, Duration::from_secs(2)).expect("Failed to build client");
    let state = AppState::new(
        conn.clone(),
        Arc::new(provider),
        SessionKeys::new("test-secret"),
    );
    (bookshelf::server::build_router(state), conn)
}

// Helper to create a user with a hashed password
pub async fn create_test_user(db: &DatabaseConnection, username: &str, password: &str) -> i32 {
    let users = SeaOrmUserRepository::new(db.clone());
    bookshelf::seed::create_user(&users, username, password)
        .await
        .expect("Failed to create user")
        .id
}

pub async fn books_of(db: &DatabaseConnection, user_id: i32) -> Vec<book::Model> {
    BookEntity::find()
        .filter(book::Column::UserId.eq(user_id))
        .all(db)
        .await
        .expect("Failed to query books")
}

pub async fn all_books(db: &DatabaseConnection) -> Vec<book::Model> {
    BookEntity::find().all(db).await.expect("Failed to query books")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

/// Drives the router like a browser: keeps the session cookie between requests
pub struct Browser {
    app: Router,
    pub cookie: Option<String>,
}

impl Browser {
    pub fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send("GET", uri, None).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        self.send("POST", uri, Some(form)).await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form("/login", &format!("username={}&password={}", username, password))
            .await
    }

    async fn send(&mut self, method: &str, uri: &str, form: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        let body = match form {
            Some(f) => {
                builder = builder.header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                );
                Body::from(f.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set) = response.headers().get(header::SET_COOKIE) {
            let set = Cookie::parse(set.to_str().unwrap().to_owned()).unwrap();
            self.cookie = if set.max_age() == Some(cookie::time::Duration::ZERO) {
                None
            } else {
                Some(set.stripped().to_string())
            };
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}
