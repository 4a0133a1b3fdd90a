//! Target server and admin credentials.
//!
//! Values come from the process environment, then from a `.env` file when one is found. A
//! `.env` file that exists but does not parse is an error.
//!
//! | Variable | Default |
//! |---|---|
//! | `USER_API_BASE_URL` | `http://ip-5236.sunline.net.ua:30020` |
//! | `USER_API_ADMIN_EMAIL` | `test@test.com` |
//! | `USER_API_ADMIN_PASSWORD` | `123456` |
//! | `USER_API_TIMEOUT_MS` | `30000` |
//! | `USER_API_LOG` | `info` |

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://ip-5236.sunline.net.ua:30020";
pub const DEFAULT_ADMIN_EMAIL: &str = "test@test.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "123456";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid base URL `{value}`: {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("Invalid value `{value}` for {key}: expected a positive number of milliseconds")]
    InvalidTimeout { key: &'static str, value: String },

    #[error("Failed to read .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub admin_email: String,
    pub admin_password: String,
    pub timeout: Option<Duration>,
    pub log_level: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url.into())?,
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        })
    }

    /// Reads `USER_API_*` from the process environment, falling back to the nearest `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let file = read_dotenv(dotenvy::dotenv_iter())?;
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| file.get(key).cloned()))
    }

    /// Like [`ApiConfig::from_env`], with the `.env` file at `path`.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = read_dotenv(dotenvy::from_path_iter(path))?;
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| file.get(key).cloned()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::new(read("USER_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))?;
        if let Some(email) = read("USER_API_ADMIN_EMAIL") {
            config.admin_email = email;
        }
        if let Some(password) = read("USER_API_ADMIN_PASSWORD") {
            config.admin_password = password;
        }
        if let Some(level) = read("USER_API_LOG") {
            config.log_level = level;
        }
        if let Some(raw) = read("USER_API_TIMEOUT_MS") {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::InvalidTimeout {
                    key: "USER_API_TIMEOUT_MS",
                    value: raw.clone(),
                })?;
            config.timeout = Some(Duration::from_millis(millis));
        }

        Ok(config)
    }

    pub fn with_admin(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.admin_email = email.into();
        self.admin_password = password.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn login_url(&self) -> String {
        self.endpoint("users/login")
    }

    pub fn users_url(&self) -> String {
        self.endpoint("api/users")
    }

    pub fn user_url(&self, id: &str) -> String {
        self.endpoint(&format!("api/users/{id}"))
    }

    /// The logged-in user, `/api/user` (singular).
    pub fn current_user_url(&self) -> String {
        self.endpoint("api/user")
    }
}

/// Collects every entry of a `.env` file without touching the process environment.
/// A missing file yields no entries; a malformed line fails the whole file.
fn read_dotenv<R: Read>(
    iter: Result<dotenvy::Iter<R>, dotenvy::Error>,
) -> Result<HashMap<String, String>, ConfigError> {
    match iter {
        Ok(entries) => Ok(entries.collect::<Result<HashMap<_, _>, _>>()?),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(e.into()),
    }
}

fn normalize_base_url(raw: String) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        value: raw.clone(),
        reason,
    };

    let parsed = reqwest::Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https".to_string()));
    }

    Ok(trimmed.to_string())
}
