//! Request extractors that reject with the API error body.
//!
//! axum's own `Json`, `Path` and `Query` reject with plain-text 4xx
//! responses. These wrappers turn a rejection into a `ValidationFailed`
//! `ApiError` so every failure carries `{"error", "code"}`.
//!
//! Every route that takes a body, a path id or query parameters needs a
//! caller, so an anonymous request whose input is also malformed is
//! reported as unauthenticated rather than invalid.

use async_trait::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::Extensions;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::membership::MembershipError;

use super::error::ApiError;

fn rejected(extensions: &Extensions, field: &str, message: String) -> ApiError {
    if extensions.get::<AuthenticatedUser>().is_none() {
        return ApiError(MembershipError::Unauthenticated);
    }
    ApiError(MembershipError::validation(field, message))
}

/// JSON request body.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let anonymous = req.extensions().get::<AuthenticatedUser>().is_none();
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(_) if anonymous => Err(ApiError(MembershipError::Unauthenticated)),
            Err(rejection) => Err(ApiError(MembershipError::validation(
                "body",
                rejection.body_text(),
            ))),
        }
    }
}

/// Path parameters.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejected(&parts.extensions, "path", rejection.body_text())),
        }
    }
}

/// Query string parameters.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejected(&parts.extensions, "query", rejection.body_text())),
        }
    }
}
