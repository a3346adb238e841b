//! URL building and response handling shared by the endpoint clients.

use crate::error::{ClientError, Result, GENERIC_REQUEST_FAILURE};
use crate::types::ApiError;
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

/// Append path segments to the API base URL.
///
/// Segments are percent-encoded, so opaque ids cannot escape their position
/// in the path.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Decode a successful response, or turn a failed one into
/// [`ClientError::Request`].
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    if !response.status().is_success() {
        return Err(request_error(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Parse(format!("Failed to parse {}: {}", what, e)))
}

/// Build a request error carrying the server-provided message.
pub(crate) async fn request_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ApiError>(&body)
        .ok()
        .and_then(ApiError::into_message)
        .unwrap_or_else(|| GENERIC_REQUEST_FAILURE.to_string());

    warn!(status, error = %message, "Request rejected by server");

    ClientError::Request { status, message }
}
