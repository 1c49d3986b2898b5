use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};

pub const SESSION_COOKIE_NAME: &str = "mealweek_session";

/// Session used by clients that never loaded the page (curl, scripts).
pub const ANONYMOUS_SESSION: &str = "anonymous";

pub fn new_session_id() -> String {
    ulid::Ulid::new().to_string()
}

pub fn build_cookie<'a>(id: String) -> Cookie<'a> {
    Cookie::build((SESSION_COOKIE_NAME, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

/// Planning session of the current browser, read from the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        jar.get(SESSION_COOKIE_NAME)
            .map(|cookie| cookie.value().trim())
            .filter(|value| !value.is_empty())
            .map(|value| Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for SessionId {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state).await?;

        Ok(Self::from_jar(&jar).unwrap_or_else(|| Self(ANONYMOUS_SESSION.to_owned())))
    }
}
