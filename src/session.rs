//! Defines the anonymous session identity carried by a cookie.
//!
//! A client is identified by an opaque token in the `sessionId` cookie. The
//! token is minted on the first write and doubles as the ownership key for
//! every row the client creates: possession of the token is the only
//! credential, and there is no revocation mechanism. This is a deliberate
//! simplification, not an oversight.

use std::fmt::{self, Display};

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use time::Duration;
use uuid::Uuid;

use crate::Error;

pub(crate) const COOKIE_SESSION: &str = "sessionId";
/// How long the session cookie stays valid on the client.
pub(crate) const SESSION_COOKIE_DURATION: Duration = Duration::days(7);

/// The opaque token that scopes every transaction to one anonymous client.
///
/// Tokens minted by the server are UUIDs, but any non-empty token presented
/// by a client is accepted unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a token presented by a client.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Mint a fresh, globally unique session token.
    pub(crate) fn mint() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The token as a string slice, e.g. for use as an SQL parameter.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extracting a [SessionId] requires the request to present a session cookie.
///
/// Requests without one are rejected with a 401 response before the handler
/// body (and therefore any database access) runs. Handlers that must not set
/// up a session for new clients take `SessionId` as an argument; the create
/// path uses [ensure_session] instead.
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        get_session_from_cookies(&jar).ok_or(Error::Unauthorized)
    }
}

/// Return the session token from `jar`, minting one if the client did not
/// present one.
///
/// A freshly minted token is attached to the returned jar as a persistent
/// cookie with path `/` and a seven day max-age. A jar that already carries a
/// token is returned unchanged, so no `Set-Cookie` header reaches returning
/// clients.
pub(crate) fn ensure_session(jar: CookieJar) -> (CookieJar, SessionId) {
    if let Some(session_id) = get_session_from_cookies(&jar) {
        return (jar, session_id);
    }

    let session_id = SessionId::mint();
    let jar = jar.add(
        Cookie::build((COOKIE_SESSION, session_id.to_string()))
            .path("/")
            .max_age(SESSION_COOKIE_DURATION),
    );

    (jar, session_id)
}

fn get_session_from_cookies(jar: &CookieJar) -> Option<SessionId> {
    jar.get(COOKIE_SESSION)
        .map(|cookie| cookie.value_trimmed())
        .filter(|value| !value.is_empty())
        .map(SessionId::new)
}
