//! End-to-end scenarios for a user-management HTTP API.
//!
//! [`http::Request`] is the fluent builder every scenario goes through; the remaining modules
//! supply configuration, admin login, typed user calls, generated data and response assertions.

pub mod auth;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod logging;
pub mod testing;
pub mod users;

pub use config::ApiConfig;
pub use error::ScenarioError;
pub use http::{ApiResponse, HttpMethod, Request, RequestError, ResponseBody};
