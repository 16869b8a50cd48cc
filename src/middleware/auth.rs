// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase ID token authentication middleware.

use crate::services::IdentityError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Cookie the frontend may use instead of the Authorization header.
pub const AUTH_COOKIE_NAME: &str = "ora_token";

/// Authenticated user extracted from the ID token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Firebase uid, used as the owner of stored activities
    pub uid: String,
    pub email: Option<String>,
}

/// Middleware that requires a valid Firebase ID token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Try cookie first, then header
    let token = match jar.get(AUTH_COOKIE_NAME) {
        Some(cookie) => cookie.value().to_string(),
        None => bearer_token(request.headers()).ok_or(StatusCode::UNAUTHORIZED)?,
    };

    let user = state
        .identity_verifier
        .verify_id_token(&token)
        .await
        .map_err(|e| match e {
            IdentityError::Rejected(reason) => {
                tracing::debug!(reason = %reason, "Rejected ID token");
                StatusCode::UNAUTHORIZED
            }
            IdentityError::Transient(reason) => {
                tracing::error!(reason = %reason, "Could not verify ID token");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    request.extensions_mut().insert(AuthUser {
        uid: user.uid,
        email: user.email,
    });

    Ok(next.run(request).await)
}

/// Token from an `Authorization: Bearer` header, if present and non-empty.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);
    }
}
