//! HTTP client for the idea box REST API.

use std::borrow::Cow;
use std::collections::HashMap;
use std::time::Instant;

use metrics::{counter, histogram};
use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::error::{ErrorCode, ErrorDetails, IdeaBoxError, Result};

/// Success envelope: `{"data": ..., "message": ...}`. Only `data` is read.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error body. The API uses either `message` or `error`, plus per-field
/// messages on validation failures.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: HashMap<String, Vec<String>>,
}

impl ErrorBody {
    fn summary(self) -> (Option<String>, HashMap<String, Vec<String>>) {
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .or(self.error.filter(|m| !m.trim().is_empty()));
        (message, self.errors)
    }
}

/// Reply to an action endpoint that returns no record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Acknowledgement {
    pub message: Option<String>,
}

impl Acknowledgement {
    /// Server message, or `fallback` when the reply carried none.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
    }
}

/// HTTP client for the idea box API.
///
/// Every operation names a default error message; it is used whenever the
/// server does not supply one of its own.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a client from configuration. Uses the configured token, if any.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("ideabox/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                IdeaBoxError::with_internal(
                    ErrorCode::ConfigurationError,
                    "Failed to create HTTP client",
                    e.to_string(),
                )
                .with_source(e)
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Use a bearer token for every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    /// Return the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Typed helpers used by the resource modules
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, default: &'static str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path), default).await?;
        read_data(response, default).await
    }

    /// GET a paginated list (`{"data": [...], "meta": {...}}`).
    pub(crate) async fn get_page<Q, T>(
        &self,
        path: &str,
        query: &Q,
        default: &'static str,
    ) -> Result<crate::model::Page<T>>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::GET, path).query(query), default)
            .await?;
        read_json(response, default).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B, default: &'static str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body), default)
            .await?;
        read_data(response, default).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B, default: &'static str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::PUT, path).json(body), default)
            .await?;
        read_data(response, default).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        default: &'static str,
    ) -> Result<T> {
        let response = self
            .send(self.request(Method::POST, path).multipart(form), default)
            .await?;
        read_data(response, default).await
    }

    pub(crate) async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        default: &'static str,
    ) -> Result<T> {
        let response = self
            .send(self.request(Method::PUT, path).multipart(form), default)
            .await?;
        read_data(response, default).await
    }

    /// POST to an action endpoint, optionally with a JSON body.
    pub(crate) async fn post_action<B>(
        &self,
        path: &str,
        body: Option<&B>,
        default: &'static str,
    ) -> Result<Acknowledgement>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(Method::POST, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = self.send(builder, default).await?;
        read_acknowledgement(response, default).await
    }

    pub(crate) async fn delete(&self, path: &str, default: &'static str) -> Result<Acknowledgement> {
        let response = self.send(self.request(Method::DELETE, path), default).await?;
        read_acknowledgement(response, default).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transport
    // ─────────────────────────────────────────────────────────────────────────

    async fn send(&self, builder: RequestBuilder, default: &'static str) -> Result<Response> {
        let request = builder.build().map_err(|e| transport_error(e, default))?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let started = Instant::now();
        let result = self.client.execute(request).await;
        let elapsed = started.elapsed();

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                counter!("ideabox_api_requests_total", "method" => method.to_string(), "status" => "error")
                    .increment(1);
                tracing::warn!(%method, %path, error = %e, "API request failed");
                return Err(transport_error(e, default));
            }
        };

        let status = response.status();
        counter!(
            "ideabox_api_requests_total",
            "method" => method.to_string(),
            "status" => status.as_u16().to_string(),
        )
        .increment(1);
        histogram!("ideabox_api_request_duration_seconds", "method" => method.to_string())
            .record(elapsed.as_secs_f64());
        tracing::debug!(%method, %path, status = status.as_u16(), elapsed_ms = elapsed.as_millis() as u64, "API request completed");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, &body, default).with_internal_message(format!("{method} {path} returned {status}")))
    }
}

/// Build the error for a non-success response, preferring the server's message.
fn api_error(status: StatusCode, body: &str, default: &'static str) -> IdeaBoxError {
    let (message, fields) = serde_json::from_str::<ErrorBody>(body)
        .unwrap_or_default()
        .summary();

    let message: Cow<'static, str> = match message {
        Some(message) => Cow::Owned(message),
        None => Cow::Borrowed(default),
    };

    let mut details = ErrorDetails::new().with_status(status.as_u16());
    if !fields.is_empty() {
        details = details.with_fields(fields);
    }

    IdeaBoxError::new(ErrorCode::from_status(status), message).with_details(details)
}

fn transport_error(error: reqwest::Error, default: &'static str) -> IdeaBoxError {
    let code = if error.is_timeout() {
        ErrorCode::RequestTimeout
    } else if error.is_builder() {
        ErrorCode::InvalidInput
    } else {
        ErrorCode::NetworkError
    };
    IdeaBoxError::with_internal(code, default, error.to_string()).with_source(error)
}

async fn read_json<T: DeserializeOwned>(response: Response, default: &'static str) -> Result<T> {
    let bytes = response.bytes().await.map_err(|e| transport_error(e, default))?;
    serde_json::from_slice(&bytes).map_err(|e| {
        IdeaBoxError::with_internal(ErrorCode::DeserializationError, default, e.to_string()).with_source(e)
    })
}

async fn read_data<T: DeserializeOwned>(response: Response, default: &'static str) -> Result<T> {
    let envelope: Envelope<T> = read_json(response, default).await?;
    Ok(envelope.data)
}

async fn read_acknowledgement(response: Response, default: &'static str) -> Result<Acknowledgement> {
    let bytes = response.bytes().await.map_err(|e| transport_error(e, default))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Acknowledgement::default());
    }

    let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
        IdeaBoxError::with_internal(ErrorCode::DeserializationError, default, e.to_string()).with_source(e)
    })?;
    Ok(Acknowledgement {
        message: value.get("message").and_then(|m| m.as_str()).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_prefers_message() {
        let error = api_error(
            StatusCode::CONFLICT,
            r#"{"message": "Department already exists", "error": "conflict"}"#,
            "Failed to create department",
        );
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.user_message(), "Department already exists");
        assert_eq!(error.details().http_status, Some(409));
    }

    #[test]
    fn test_api_error_falls_back_to_error_field() {
        let error = api_error(StatusCode::FORBIDDEN, r#"{"error": "Banned"}"#, "Failed to vote");
        assert_eq!(error.user_message(), "Banned");
    }

    #[test]
    fn test_api_error_uses_default_for_unreadable_body() {
        let error = api_error(StatusCode::BAD_GATEWAY, "<html>oops</html>", "Failed to load ideas");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        assert_eq!(error.user_message(), "Failed to load ideas");

        let error = api_error(StatusCode::BAD_REQUEST, r#"{"message": "  "}"#, "Failed to load ideas");
        assert_eq!(error.user_message(), "Failed to load ideas");
    }

    #[test]
    fn test_api_error_carries_field_messages() {
        let error = api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message": "The email has already been taken.", "errors": {"email": ["The email has already been taken."]}}"#,
            "Failed to create user",
        );
        assert_eq!(error.code(), ErrorCode::ValidationError);
        assert_eq!(error.details().fields["email"].len(), 1);
    }

    #[test]
    fn test_debug_hides_token() {
        let client = ApiClient::new(&ApiConfig::default()).unwrap().with_token("secret-token");
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-token"));
        assert!(client.is_authenticated());
    }
}
