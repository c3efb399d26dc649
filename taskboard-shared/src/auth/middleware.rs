/// Principal resolution for Axum
///
/// The API's auth layer validates the bearer token once per request and
/// stores the resulting [`Principal`] in the request extensions; handlers
/// then take `Principal` as an extractor argument. The resource layer only
/// ever sees the opaque `user_id`.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::middleware::Principal;
///
/// async fn handler(principal: Principal) -> String {
///     format!("hello, {}", principal.user_id)
/// }
/// ```

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_access_token, JwtError};

/// The authenticated account identity for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Account id from the token's `sub` claim
    pub user_id: Uuid,
}

impl Principal {
    /// Resolves a principal from request headers
    ///
    /// Expects `Authorization: Bearer <access token>` signed with `secret`.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing header, a non-Bearer scheme, or a
    /// token that fails validation.
    pub fn resolve(headers: &HeaderMap, secret: &str) -> Result<Self, AuthError> {
        let auth_header = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::MissingCredentials)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::InvalidFormat("expected Bearer token".to_string()))?;

        let claims = validate_access_token(token, secret).map_err(|e| match e {
            JwtError::Expired => AuthError::InvalidToken("token expired".to_string()),
            other => AuthError::InvalidToken(other.to_string()),
        })?;

        Ok(Principal {
            user_id: claims.sub,
        })
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .ok_or(AuthError::MissingCredentials)
    }
}

/// Error type for principal resolution
#[derive(Debug)]
pub enum AuthError {
    /// No Authorization header
    MissingCredentials,

    /// Header present but not a Bearer token
    InvalidFormat(String),

    /// Token failed validation
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_token, Claims, TokenType};
    use axum::http::HeaderValue;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn headers_with_token(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_resolve_valid_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(&Claims::new(user_id, TokenType::Access), SECRET).unwrap();

        let principal = Principal::resolve(&headers_with_token(&token), SECRET).unwrap();
        assert_eq!(principal.user_id, user_id);
    }

    #[test]
    fn test_resolve_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            Principal::resolve(&headers, SECRET),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_resolve_rejects_non_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert!(matches!(
            Principal::resolve(&headers, SECRET),
            Err(AuthError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_refresh_token() {
        let token =
            create_token(&Claims::new(Uuid::new_v4(), TokenType::Refresh), SECRET).unwrap();
        assert!(matches!(
            Principal::resolve(&headers_with_token(&token), SECRET),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
