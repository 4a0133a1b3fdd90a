//! Typed calls against the user-management endpoints, and the per-scenario context that
//! carries the admin token and the created user between steps.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::{self, AuthToken};
use crate::config::ApiConfig;
use crate::error::ScenarioError;
use crate::http::{ApiResponse, HttpMethod, Request, RequestError};

/// Body of `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A user created during the scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedUser {
    pub id: String,
    pub email: String,
}

/// Builds and sends the user API calls. Without a token every call is anonymous.
#[derive(Debug, Clone)]
pub struct UserClient {
    config: ApiConfig,
    token: Option<AuthToken>,
}

impl UserClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            token: None,
        }
    }

    pub fn with_token(mut self, token: AuthToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn anonymous(&self) -> Self {
        Self {
            config: self.config.clone(),
            token: None,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn create(&self, user: &NewUser) -> Result<ApiResponse, RequestError> {
        self.request(HttpMethod::Post, self.config.users_url())?
            .body(user)
            .send()
            .await
    }

    pub async fn get(&self, id: &str) -> Result<ApiResponse, RequestError> {
        self.request(HttpMethod::Get, self.config.user_url(id))?
            .send()
            .await
    }

    pub async fn list(&self) -> Result<ApiResponse, RequestError> {
        self.request(HttpMethod::Get, self.config.users_url())?
            .send()
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<ApiResponse, RequestError> {
        self.request(HttpMethod::Delete, self.config.user_url(id))?
            .send()
            .await
    }

    pub async fn current(&self) -> Result<ApiResponse, RequestError> {
        self.request(HttpMethod::Get, self.config.current_user_url())?
            .send()
            .await
    }

    fn request(&self, method: HttpMethod, url: String) -> Result<Request, RequestError> {
        let mut request = Request::new(url)?.method(method);
        if let Some(token) = &self.token {
            request = request.auth(token);
        }
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }
        Ok(request)
    }
}

/// State shared by the steps of one scenario group.
#[derive(Debug)]
pub struct ScenarioContext {
    pub client: UserClient,
    pub created: Option<CreatedUser>,
}

impl ScenarioContext {
    /// Logs in as admin and returns a context whose client is authenticated.
    pub async fn login(config: ApiConfig) -> Result<Self, ScenarioError> {
        let token = auth::login(&config).await?;
        Ok(Self {
            client: UserClient::new(config).with_token(token),
            created: None,
        })
    }

    pub fn remember(&mut self, user: CreatedUser) {
        debug!(id = %user.id, email = %user.email, "remembering created user");
        self.created = Some(user);
    }

    pub fn created(&self) -> Result<&CreatedUser, ScenarioError> {
        self.created
            .as_ref()
            .ok_or(ScenarioError::MissingContext("a created user"))
    }
}
