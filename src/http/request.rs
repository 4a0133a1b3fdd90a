use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::client::send_request;
use super::error::RequestError;
use super::method::HttpMethod;
use super::response::ApiResponse;

/// Accumulated configuration for a single call, executed by [`Request::send`].
///
/// ```no_run
/// # async fn run() -> Result<(), userapi_e2e::http::RequestError> {
/// use userapi_e2e::http::{HttpMethod, Request};
///
/// let response = Request::new("http://localhost:3000/users/login")?
///     .method(HttpMethod::Post)
///     .body(&serde_json::json!({ "email": "test@test.com", "password": "123456" }))
///     .send()
///     .await?;
/// assert_eq!(response.status_code, 200);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Request {
    url: reqwest::Url,
    method: Option<HttpMethod>,
    token: Option<String>,
    headers: Vec<(String, String)>,
    body: Option<Result<Value, serde_json::Error>>,
    timeout: Option<Duration>,
}

impl Request {
    pub fn new(url: impl AsRef<str>) -> Result<Self, RequestError> {
        let raw = url.as_ref().trim();
        let invalid = |reason: &str| RequestError::InvalidUrl {
            url: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("URL is empty"));
        }

        let url = reqwest::Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }

        Ok(Self {
            url,
            method: None,
            token: None,
            headers: Vec::new(),
            body: None,
            timeout: None,
        })
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Sends `Authorization: Bearer <token>`. A blank token leaves the request unauthenticated.
    pub fn auth(mut self, token: impl AsRef<str>) -> Self {
        let token = token.as_ref().trim();
        self.token = (!token.is_empty()).then(|| token.to_string());
        self
    }

    pub fn body<T: Serialize + ?Sized>(mut self, payload: &T) -> Self {
        self.body = Some(serde_json::to_value(payload));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn url(&self) -> &reqwest::Url {
        &self.url
    }

    pub fn http_method(&self) -> Option<HttpMethod> {
        self.method
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub async fn send(self) -> Result<ApiResponse, RequestError> {
        let method = self.method.ok_or_else(|| RequestError::MissingMethod {
            url: self.url.to_string(),
        })?;
        let body = self.body.transpose()?;

        send_request(PreparedRequest {
            method,
            url: self.url,
            token: self.token,
            headers: self.headers,
            body,
            timeout: self.timeout,
        })
        .await
    }
}

/// A request whose method is known and whose body serialized cleanly.
#[derive(Debug)]
pub(crate) struct PreparedRequest {
    pub method: HttpMethod,
    pub url: reqwest::Url,
    pub token: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Option<Duration>,
}
