//! JWT authentication and the admin route guard.
//!
//! ## The Guard Decision Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      /admin/* Route Guard                               │
//! │                                                                         │
//! │  Path           Token           Action                                  │
//! │  ─────────────  ──────────────  ─────────────────────────────────────   │
//! │  /admin/login   valid admin     redirect → /admin/inventar              │
//! │  /admin/login   anything else   pass through (show the login page)      │
//! │  /admin/*       none/invalid    redirect → /admin/login                 │
//! │  /admin/*       valid customer  redirect → /                            │
//! │  /admin/*       valid admin     pass through                            │
//! │                                                                         │
//! │  The token is read from `Authorization: Bearer <jwt>` first, then       │
//! │  from the `auth_token` cookie. An invalid or expired token behaves      │
//! │  exactly like a missing one.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use rost_core::UserRole;

/// Cookie holding the auth token for browser clients.
pub const AUTH_COOKIE: &str = "auth_token";

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (login name or customer email)
    pub sub: String,

    /// Role driving the admin guard
    pub role: UserRole,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// JWT token manager.
pub struct JwtManager {
    secret: String,
    access_lifetime_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(secret: String, access_lifetime_secs: i64) -> Self {
        JwtManager {
            secret,
            access_lifetime_secs,
        }
    }

    /// Generate an access token for a subject with a role.
    pub fn generate_token(&self, subject: &str, role: UserRole) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_lifetime_secs);

        let claims = Claims {
            sub: subject.to_string(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::default();

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| ApiError::AuthFailed(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Extract a named cookie value from a `Cookie` header.
fn extract_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Pulls the token out of request headers: Authorization first, then the
/// auth cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    if let Some(auth) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        if let Some(token) = extract_bearer_token(auth) {
            return Some(token);
        }
    }

    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| extract_cookie(cookies, AUTH_COOKIE))
}

/// Validates the request token and returns the claims.
///
/// Used by handlers that require authentication (e.g. `/api/orders/user`).
pub fn require_claims(state: &AppState, headers: &HeaderMap) -> Result<Claims, ApiError> {
    let token = token_from_headers(headers)
        .ok_or_else(|| ApiError::AuthFailed("Missing auth token".to_string()))?;
    state.jwt.validate_token(token)
}

/// Middleware guarding the `/admin` subtree.
pub async fn admin_guard(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    let is_login_page = path == "/admin/login";

    // Invalid tokens fall through to None
    let role = token_from_headers(request.headers())
        .and_then(|token| state.jwt.validate_token(token).ok())
        .map(|claims| claims.role);

    match role {
        Some(UserRole::Admin) => {
            // Logged-in admins have no business on the login page; the
            // credential POST itself still goes through.
            if is_login_page && request.method() == Method::GET {
                Redirect::temporary("/admin/inventar").into_response()
            } else {
                next.run(request).await
            }
        }
        Some(UserRole::Customer) if !is_login_page => {
            Redirect::temporary("/").into_response()
        }
        None if !is_login_page => Redirect::temporary("/admin/login").into_response(),
        _ => next.run(request).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test-secret".to_string(), 3600);

        let token = manager.generate_token("admin", UserRole::Admin).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, UserRole::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = JwtManager::new("test-secret".to_string(), 3600);
        let other = JwtManager::new("other-secret".to_string(), 3600);

        let token = manager.generate_token("admin", UserRole::Admin).unwrap();
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = JwtManager::new("test-secret".to_string(), -120);

        let token = manager.generate_token("admin", UserRole::Admin).unwrap();
        assert!(manager.validate_token(&token).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("Basic abc123"), None);
        assert_eq!(extract_bearer_token(""), None);
    }

    #[test]
    fn test_extract_cookie() {
        let header = "theme=dark; auth_token=tok-1; lang=ro";
        assert_eq!(extract_cookie(header, "auth_token"), Some("tok-1"));
        assert_eq!(extract_cookie(header, "theme"), Some("dark"));
        assert_eq!(extract_cookie(header, "missing"), None);
    }
}
