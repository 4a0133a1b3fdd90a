use reqwest::header::{ACCEPT, HeaderName, HeaderValue};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::error::RequestError;
use super::request::PreparedRequest;
use super::response::{ApiResponse, ResponseBody};

pub(crate) async fn send_request(request: PreparedRequest) -> Result<ApiResponse, RequestError> {
    let url = request.url.to_string();

    let mut client_builder = reqwest::Client::builder();
    if let Some(timeout) = request.timeout {
        client_builder = client_builder.timeout(timeout);
    }
    let client = client_builder
        .build()
        .map_err(|source| RequestError::Transport {
            url: url.clone(),
            source,
        })?;

    let mut req_builder = client
        .request(request.method.into(), request.url)
        .header(ACCEPT, "application/json");
    req_builder = apply_headers(req_builder, &request.headers)?;
    if let Some(token) = &request.token {
        req_builder = req_builder.bearer_auth(token);
    }

    match request.body {
        Some(body) if request.method.allows_body() => {
            req_builder = req_builder.json(&body);
        }
        Some(_) => warn!(method = %request.method, %url, "dropping body on a method that does not carry one"),
        None => {}
    }

    debug!(
        method = %request.method,
        %url,
        authenticated = request.token.is_some(),
        "sending request"
    );

    let started = Instant::now();
    let response = req_builder
        .send()
        .await
        .map_err(|source| RequestError::Transport {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|source| RequestError::Transport {
            url: url.clone(),
            source,
        })?;
    let elapsed = started.elapsed();

    info!(
        method = %request.method,
        %url,
        status = status.as_u16(),
        elapsed_ms = elapsed.as_millis() as u64,
        "request completed"
    );

    Ok(ApiResponse {
        status_code: status.as_u16(),
        body: ResponseBody::parse(&text),
        elapsed,
    })
}

fn apply_headers(
    mut req_builder: reqwest::RequestBuilder,
    headers: &[(String, String)],
) -> Result<reqwest::RequestBuilder, RequestError> {
    for (key, value) in headers {
        let key = key.trim();
        if key.is_empty() {
            return Err(RequestError::InvalidHeader {
                name: key.to_string(),
                reason: "header name is empty".to_string(),
            });
        }

        let header_name =
            HeaderName::from_bytes(key.as_bytes()).map_err(|e| RequestError::InvalidHeader {
                name: key.to_string(),
                reason: e.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value.trim()).map_err(|e| RequestError::InvalidHeader {
                name: key.to_string(),
                reason: e.to_string(),
            })?;
        req_builder = req_builder.header(header_name, header_value);
    }

    Ok(req_builder)
}
