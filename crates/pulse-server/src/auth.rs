//! Authorization gate.
//!
//! Callers send HTTP Basic credentials: the user name is their identity, the
//! password is the shared secret. The secret is checked here, before any
//! handler runs; role checks happen in the handlers, before any write.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use pulse_core::role::Role;

use crate::app::AppState;
use crate::http::error::ApiError;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub identity: String,
    pub role: Role,
}

/// Split a `Basic` authorization header into identity and password.
#[must_use]
pub fn parse_basic(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (identity, password) = text.split_once(':')?;
    Some((identity.to_string(), password.to_string()))
}

/// Compare without short-circuiting on the first differing byte.
fn secrets_match(given: &str, expected: &str) -> bool {
    let (given, expected) = (given.as_bytes(), expected.as_bytes());
    given.len() == expected.len()
        && given
            .iter()
            .zip(expected)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Validate an authorization header against the shared secret.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the header is missing or malformed
/// or the secret does not match. Any identity is accepted, including an empty
/// one; it only decides the caller's role.
pub fn authenticate(header: Option<&str>, shared_secret: &str) -> Result<Caller, ApiError> {
    let (identity, password) = header.and_then(parse_basic).ok_or(ApiError::Unauthorized)?;
    if !secrets_match(&password, shared_secret) {
        tracing::debug!(identity, "credential rejected");
        return Err(ApiError::Unauthorized);
    }
    let role = Role::from_identity(&identity);
    Ok(Caller { identity, role })
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        authenticate(header, state.shared_secret())
    }
}
