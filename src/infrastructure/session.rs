//! Signed cookie session
//!
//! The whole session (authenticated user plus pending flash notifications)
//! lives client-side in one cookie, signed as an HS256 token. Handlers receive
//! it as an explicit [`Session`] value and hand it back in their response,
//! which re-issues the cookie when something changed.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{COOKIE, SET_COOKIE},
        request::Parts,
    },
    response::{IntoResponseParts, ResponseParts},
};
use chrono::{Duration, Utc};
use cookie::{Cookie, SameSite, time::Duration as CookieMaxAge};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "bookshelf_session";
const SESSION_TTL_HOURS: i64 = 24;

/// Signing keys for the session cookie, derived from the configured secret
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn encode(&self, data: &SessionData) -> Result<String, jsonwebtoken::errors::Error> {
        let exp = Utc::now()
            .checked_add_signed(Duration::hours(SESSION_TTL_HOURS))
            .map(|t| t.timestamp())
            .unwrap_or(i64::MAX);

        let claims = Claims {
            data: data.clone(),
            exp: exp as usize,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Tampered, expired or unparsable tokens all yield `None`
    pub fn decode(&self, token: &str) -> Option<SessionData> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims.data)
            .map_err(|e| tracing::debug!("Discarding session cookie: {}", e))
            .ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Error,
}

impl FlashCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashCategory::Success => "success",
            FlashCategory::Error => "error",
        }
    }
}

/// One-shot notification, shown on the next rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flashes: Vec<Flash>,
}

impl SessionData {
    fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.username.is_none() && self.flashes.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    data: SessionData,
    exp: usize,
}

/// Identity of the logged-in user for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
}

/// Per-request view of the session cookie
pub struct Session {
    keys: SessionKeys,
    data: SessionData,
    dirty: bool,
}

impl Session {
    pub fn new(keys: SessionKeys, data: SessionData) -> Self {
        Self {
            keys,
            data,
            dirty: false,
        }
    }

    pub fn user(&self) -> Option<CurrentUser> {
        match (self.data.user_id, &self.data.username) {
            (Some(id), Some(username)) => Some(CurrentUser {
                id,
                username: username.clone(),
            }),
            _ => None,
        }
    }

    pub fn login(&mut self, user_id: i32, username: &str) {
        self.data.user_id = Some(user_id);
        self.data.username = Some(username.to_owned());
        self.dirty = true;
    }

    /// Drop everything, identity and pending notifications alike
    pub fn clear(&mut self) {
        self.data = SessionData::default();
        self.dirty = true;
    }

    pub fn flash(&mut self, category: FlashCategory, message: impl Into<String>) {
        self.data.flashes.push(Flash {
            category,
            message: message.into(),
        });
        self.dirty = true;
    }

    pub fn take_flashes(&mut self) -> Vec<Flash> {
        if !self.data.flashes.is_empty() {
            self.dirty = true;
        }
        std::mem::take(&mut self.data.flashes)
    }

    fn set_cookie(&self) -> Result<Cookie<'static>, jsonwebtoken::errors::Error> {
        let mut cookie = if self.data.is_empty() {
            let mut cookie = Cookie::new(SESSION_COOKIE, "");
            cookie.make_removal();
            cookie
        } else {
            let mut cookie = Cookie::new(SESSION_COOKIE, self.keys.encode(&self.data)?);
            cookie.set_max_age(CookieMaxAge::hours(SESSION_TTL_HOURS));
            cookie
        };
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        Ok(cookie)
    }
}

/// Find a cookie value by name across all `Cookie` headers
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_owned())
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    SessionKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let data = cookie_value(&parts.headers, SESSION_COOKIE)
            .filter(|token| !token.is_empty())
            .and_then(|token| keys.decode(&token))
            .unwrap_or_default();

        Ok(Session::new(keys, data))
    }
}

impl IntoResponseParts for Session {
    type Error = (StatusCode, String);

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if !self.dirty {
            return Ok(res);
        }

        let cookie = self.set_cookie().map_err(|e| {
            tracing::error!("Failed to sign session cookie: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Session error".to_string())
        })?;
        let value = HeaderValue::from_str(&cookie.to_string())
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
        res.headers_mut().append(SET_COOKIE, value);
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_roundtrip_keeps_user_and_flashes() {
        let keys = SessionKeys::new("test-secret");
        let data = SessionData {
            user_id: Some(7),
            username: Some("alice".to_string()),
            flashes: vec![Flash {
                category: FlashCategory::Success,
                message: "Login successful!".to_string(),
            }],
        };

        let token = keys.encode(&data).expect("encode");
        assert_eq!(keys.decode(&token), Some(data));
    }

    #[test]
    fn test_foreign_secret_is_rejected() {
        let token = SessionKeys::new("one")
            .encode(&SessionData {
                user_id: Some(1),
                username: Some("mallory".to_string()),
                flashes: vec![],
            })
            .unwrap();

        assert_eq!(SessionKeys::new("two").decode(&token), None);
        assert_eq!(SessionKeys::new("two").decode("garbage"), None);
    }

    #[test]
    fn test_user_requires_id_and_name() {
        let keys = SessionKeys::new("k");
        let mut session = Session::new(keys, SessionData::default());
        assert_eq!(session.user(), None);

        session.login(3, "bob");
        assert_eq!(
            session.user(),
            Some(CurrentUser {
                id: 3,
                username: "bob".to_string()
            })
        );

        session.clear();
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_flashes_are_consumed_once() {
        let mut session = Session::new(SessionKeys::new("k"), SessionData::default());
        session.flash(FlashCategory::Error, "first");
        session.flash(FlashCategory::Success, "second");

        let flashes = session.take_flashes();
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[0].message, "first");
        assert!(session.take_flashes().is_empty());
    }

    #[test]
    fn test_empty_session_expires_cookie() {
        let mut session = Session::new(SessionKeys::new("k"), SessionData::default());
        session.clear();
        let cookie = session.set_cookie().unwrap();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieMaxAge::ZERO));
        assert!(cookie.to_string().starts_with("bookshelf_session=;"));
    }

    #[test]
    fn test_logged_in_cookie_attributes() {
        let mut session = Session::new(SessionKeys::new("k"), SessionData::default());
        session.login(1, "alice");
        let cookie = session.set_cookie().unwrap();

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(CookieMaxAge::hours(24)));
        assert_eq!(
            SessionKeys::new("k").decode(cookie.value()).and_then(|d| d.user_id),
            Some(1)
        );
    }

    #[test]
    fn test_cookie_value_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; bookshelf_session=abc.def.ghi"),
        );
        assert_eq!(
            cookie_value(&headers, SESSION_COOKIE).as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(cookie_value(&headers, "missing"), None);
    }
}
