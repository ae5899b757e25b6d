//! Request extractors that reject with [`ApiError`]
//!
//! axum's own extractors answer malformed input with plain-text bodies; these
//! wrappers keep every failure inside the JSON error envelope.

use async_trait::async_trait;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::{error::ApiError, validation::ValidationErrors};

/// JSON request body; a malformed body is a 400
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::Validation(ValidationErrors::message(
                rejection.body_text(),
            ))),
        }
    }
}

/// Query string parameters; a malformed query string is a 400
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::Validation(ValidationErrors::message(
                rejection.body_text(),
            ))),
        }
    }
}

/// Resource identifiers taken from the path
///
/// An identifier that does not parse cannot name an existing resource, so it
/// is answered like any other miss.
pub struct ResourceId<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ResourceId<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(|_| ApiError::NotFound)
    }
}
