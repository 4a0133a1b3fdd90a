//! Admin login against `POST /users/login`.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::config::ApiConfig;
use crate::error::ScenarioError;
use crate::http::{HttpMethod, Request};

/// Bearer token returned by the login endpoint.
///
/// `Debug` and `Display` show at most the first half of the token, capped at six characters.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn redacted(&self) -> String {
        let visible = (self.0.chars().count() / 2).min(6);
        let prefix: String = self.0.chars().take(visible).collect();
        format!("{prefix}…")
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&self.redacted()).finish()
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Logs in with the admin credentials from `config`.
pub async fn login(config: &ApiConfig) -> Result<AuthToken, ScenarioError> {
    login_with(
        config,
        &Credentials {
            email: &config.admin_email,
            password: &config.admin_password,
        },
    )
    .await
}

pub async fn login_with(
    config: &ApiConfig,
    credentials: &Credentials<'_>,
) -> Result<AuthToken, ScenarioError> {
    let mut request = Request::new(config.login_url())?
        .method(HttpMethod::Post)
        .body(credentials);
    if let Some(timeout) = config.timeout {
        request = request.timeout(timeout);
    }
    let resp = request.send().await?;

    let token = resp
        .get_str("token")
        .filter(|token| resp.is_success() && !token.is_empty())
        .map(AuthToken::new)
        .ok_or_else(|| ScenarioError::LoginFailed {
            status: resp.status_code,
            body: resp.body.text(),
        })?;

    info!(email = credentials.email, %token, "admin was logged in");
    Ok(token)
}
