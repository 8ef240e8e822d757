//! JSON client for the clinic backend.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod errors;

pub use errors::{ApiError, ApiResult, GENERIC_ERROR_MESSAGE};

/// Default backend origin and prefix.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/Backoffice/api";

/// Thin wrapper around [`reqwest::Client`] bound to the backend base URL.
///
/// There is no retry, timeout or cancellation: every call issues exactly one
/// request and resolves once the backend answers or the connection fails.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            bearer_token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a client that attaches `Authorization: Bearer <token>` to every call.
    ///
    /// The underlying connection pool is shared with `self`.
    pub fn with_bearer_token(&self, token: Option<&str>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            bearer_token: token.filter(|t| !t.is_empty()).map(str::to_string),
        }
    }

    /// Issues one call and decodes the JSON answer into `T`.
    ///
    /// A `204 No Content` answer decodes the empty object `{}`.
    pub async fn request<T, B>(&self, path: &str, method: Method, body: Option<&B>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("API request: {method} {url}");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(|err| {
            log::error!("API request {method} {url} failed: {err}");
            ApiError::from(err)
        })?;

        let status = response.status();
        log::debug!("API response: {status} for {method} {url}");

        if !status.is_success() {
            let raw = response.bytes().await.unwrap_or_default();
            let err = ApiError::from_status(status.as_u16(), error_message(status, &raw));
            log::error!("API error on {method} {url}: {err}");
            return Err(err);
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(serde_json::from_value(Value::Object(Default::default()))?);
        }

        response.json::<T>().await.map_err(|err| {
            log::error!("Failed to decode response of {method} {url}: {err}");
            ApiError::Decode(err.to_string())
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request::<T, Value>(path, Method::GET, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, Method::POST, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, Method::PUT, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.request::<Value, Value>(path, Method::DELETE, None).await
    }
}

/// Extracts the user-facing message from an error body.
///
/// JSON bodies yield their `message` field (or the generic message when it is
/// missing); anything else falls back to the status code and reason.
pub fn error_message(status: StatusCode, body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(json) => json
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .unwrap_or(GENERIC_ERROR_MESSAGE)
            .to_string(),
        Err(_) => format!(
            "Erreur {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_field_wins() {
        let message = error_message(StatusCode::NOT_FOUND, br#"{"message":"X"}"#);
        assert_eq!(message, "X");
    }

    #[test]
    fn json_without_message_uses_generic_text() {
        let message = error_message(StatusCode::BAD_REQUEST, br#"{"error":"bad"}"#);
        assert_eq!(message, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn non_json_body_reports_status() {
        let message = error_message(StatusCode::INTERNAL_SERVER_ERROR, b"<html>boom</html>");
        assert_eq!(message, "Erreur 500: Internal Server Error");
    }

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8080/Backoffice/api/");
        assert_eq!(client.base_url(), "http://localhost:8080/Backoffice/api");
    }
}
