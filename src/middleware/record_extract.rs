use axum::{
    Form,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::RosterError;

/// URL-encoded form body whose decoding failures surface as
/// [`RosterError::Validation`] instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct RecordForm<T>(pub T);

impl<S, T> FromRequest<S> for RecordForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = RosterError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(RecordForm(value)),
            Err(rejection) => Err(RosterError::validation(rejection.body_text())),
        }
    }
}

/// Integer record id taken from the single `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = RosterError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(RecordId(id)),
            Err(rejection) => Err(RosterError::validation(rejection.body_text())),
        }
    }
}
