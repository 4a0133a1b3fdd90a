use thiserror::Error;

use crate::config::ConfigError;
use crate::http::RequestError;
use crate::testing::AssertionFailure;

/// Anything that aborts a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Assertion failed: {0}")]
    Assertion(#[from] AssertionFailure),

    #[error("Login failed with status {status}: {body}")]
    LoginFailed { status: u16, body: String },

    #[error("Scenario step needs {0}, but an earlier step did not provide it")]
    MissingContext(&'static str),
}
