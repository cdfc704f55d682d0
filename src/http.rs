//! Outcome classification for reqwest calls.
//!
//! Maps every way a request can go wrong onto the [`ApiError`] taxonomy, in
//! priority order: connection, timeout, HTTP status, generic transport.

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Body excerpt length carried on client status errors.
const CLIENT_BODY_EXCERPT: usize = 500;
/// Body excerpt length carried on server status errors.
const SERVER_BODY_EXCERPT: usize = 200;

/// Classify a transport-level failure (the request never produced a status).
pub(crate) fn classify_request_error(error: reqwest::Error) -> ApiError {
    if error.is_connect() {
        ApiError::connection(error.to_string())
    } else if error.is_timeout() {
        ApiError::timeout(error.to_string())
    } else {
        ApiError::transport(error.to_string())
    }
}

/// Turn a non-2xx response into a status error carrying a body excerpt.
pub(crate) async fn error_from_response(response: reqwest::Response) -> ApiError {
    let code = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "failed to read error response".to_string());
    let excerpt_len = if code >= 500 {
        SERVER_BODY_EXCERPT
    } else {
        CLIENT_BODY_EXCERPT
    };
    let excerpt: String = body.chars().take(excerpt_len).collect();
    ApiError::status(code, excerpt)
}

/// Send a request and decode the JSON response body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, ApiError> {
    let response = request.send().await.map_err(classify_request_error)?;

    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::transport(format!("invalid response body: {e}")))
}
