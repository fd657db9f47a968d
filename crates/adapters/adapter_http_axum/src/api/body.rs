use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use plughub_domain::error::ValidationError;

use crate::error::ApiError;

/// JSON body that may be missing entirely.
///
/// An empty (or blank) body and a literal `null` both yield `T::default()`.
/// The `Content-Type` header is not checked, so clients that send a bare
/// JSON string without it are still understood.
pub struct OptionalJson<T>(pub T);

impl<S, T> FromRequest<S> for OptionalJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|err| ValidationError::MalformedBody(err.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }
        let value: Option<T> = serde_json::from_slice(&bytes)
            .map_err(|err| ValidationError::MalformedBody(err.to_string()))?;
        Ok(Self(value.unwrap_or_default()))
    }
}
