use std::env;
use std::time::Duration;

use rand::{Rng, distributions::Alphanumeric};

pub const DEFAULT_BOOKS_API_URL: &str = "https://www.googleapis.com/books/v1";

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub books_api_url: String,
    pub lookup_timeout: Duration,
    pub session_secret: String,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let session_secret = var("SESSION_SECRET")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                tracing::warn!(
                    "SESSION_SECRET not set, using a random per-process secret (sessions will not survive a restart)"
                );
                random_secret()
            });

        Self {
            database_url: var("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://bookshelf.db?mode=rwc".to_string()),
            port: var("PORT").and_then(|p| p.parse().ok()).unwrap_or(5000),
            books_api_url: var("BOOKS_API_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BOOKS_API_URL.to_string()),
            lookup_timeout: Duration::from_secs(
                var("LOOKUP_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
            session_secret,
            seed_demo: var("SEED_DEMO").is_some(),
        }
    }
}

fn random_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}
