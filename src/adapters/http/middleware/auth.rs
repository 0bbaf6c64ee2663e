//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates Bearer tokens and injects the caller into extensions
//! - `RequireAuth` - Extractor that requires an authenticated caller
//! - `OptionalAuth` - Extractor for routes where the access table decides
//!
//! The middleware only establishes identity. Roles are resolved later from
//! the operator directory, per operation.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → OptionalAuth / RequireAuth reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

use super::super::error::ErrorResponse;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Authentication middleware that validates Bearer tokens.
///
/// A missing token passes through without a caller; a present but invalid
/// token is rejected with 401 before reaching any handler.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            let (status, message) = match &e {
                AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
                AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
                AuthError::ServiceUnavailable(msg) => {
                    tracing::error!("Auth service unavailable: {}", msg);
                    (StatusCode::SERVICE_UNAVAILABLE, "Authentication service unavailable")
                }
            };
            tracing::debug!(error = %e, "Bearer token rejected");
            (status, Json(ErrorResponse::new(message, "AUTH_ERROR"))).into_response()
        }
    }
}

fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extractor that requires authentication.
///
/// Rejects with 401 when the auth middleware did not attach a caller.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor for optional authentication.
///
/// Most routes take this and let the access table decide whether an
/// anonymous caller is acceptable.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts.extensions.get::<AuthenticatedUser>().cloned();
            Ok(OptionalAuth(user))
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Authentication required", "UNAUTHENTICATED")),
            )
                .into_response(),
        }
    }
}
