//! # Response assertions
//!
//! Checks evaluated against an [`ApiResponse`]. Each check returns
//! `Result<(), AssertionFailure>` so scenario steps can chain them with `?`; the failure
//! carries the expected and actual values for the runner's report.
//!
//! Key checks on an array body apply to its first element, which is how the listing
//! endpoint is checked for its `{_id, username}` shape.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::http::{ApiResponse, ResponseBody};

/// A failed check: what was being verified, and the expected/actual values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{context}\n  expected: {expected}\n    actual: {actual}")]
pub struct AssertionFailure {
    pub context: String,
    pub expected: String,
    pub actual: String,
}

impl AssertionFailure {
    fn new(context: &str, expected: impl fmt::Display, actual: impl fmt::Display) -> Self {
        Self {
            context: context.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

pub type AssertionResult = Result<(), AssertionFailure>;

pub fn expect_status(resp: &ApiResponse, expected: u16, context: &str) -> AssertionResult {
    if resp.status_code == expected {
        return Ok(());
    }
    Err(AssertionFailure::new(
        context,
        expected,
        format!("{} (body: {})", resp.status_code, resp.body.text()),
    ))
}

pub fn expect_success(resp: &ApiResponse, context: &str) -> AssertionResult {
    if resp.is_success() {
        return Ok(());
    }
    Err(AssertionFailure::new(
        context,
        "2xx",
        format!("{} (body: {})", resp.status_code, resp.body.text()),
    ))
}

/// Value at a JSON pointer (`/emails/0/address`) must equal `expected`.
pub fn expect_eq(
    resp: &ApiResponse,
    pointer: &str,
    expected: impl Into<Value>,
    context: &str,
) -> AssertionResult {
    let expected = expected.into();
    match resp.pointer(pointer) {
        Some(actual) if *actual == expected => Ok(()),
        Some(actual) => Err(AssertionFailure::new(context, &expected, actual)),
        None => Err(AssertionFailure::new(
            context,
            &expected,
            format!("<missing {pointer}> in {}", resp.body.text()),
        )),
    }
}

pub fn expect_object(resp: &ApiResponse, context: &str) -> AssertionResult {
    match resp.json() {
        Some(Value::Object(_)) => Ok(()),
        _ => Err(AssertionFailure::new(context, "a JSON object", resp.body.text())),
    }
}

/// The object's key set must be exactly `keys`.
pub fn expect_all_keys(resp: &ApiResponse, keys: &[&str], context: &str) -> AssertionResult {
    let actual = key_set(resp, context)?;
    let expected: BTreeSet<String> = keys.iter().map(|k| k.to_string()).collect();
    if actual == expected {
        return Ok(());
    }
    Err(AssertionFailure::new(
        context,
        format!("keys {expected:?}"),
        format!("keys {actual:?}"),
    ))
}

/// The object must contain every key in `keys`, and may contain others.
pub fn expect_includes_keys(resp: &ApiResponse, keys: &[&str], context: &str) -> AssertionResult {
    let actual = key_set(resp, context)?;
    let missing: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| !actual.contains(*key))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(AssertionFailure::new(
        context,
        format!("keys including {keys:?}"),
        format!("keys {actual:?} (missing {missing:?})"),
    ))
}

pub fn expect_body_contains(resp: &ApiResponse, needle: &str, context: &str) -> AssertionResult {
    let text = resp.body.text();
    if text.contains(needle) {
        return Ok(());
    }
    Err(AssertionFailure::new(
        context,
        format!("body containing `{needle}`"),
        text,
    ))
}

pub fn expect_body_not_contains(
    resp: &ApiResponse,
    needle: &str,
    context: &str,
) -> AssertionResult {
    let text = resp.body.text();
    if !text.contains(needle) {
        return Ok(());
    }
    Err(AssertionFailure::new(
        context,
        format!("body without `{needle}`"),
        text,
    ))
}

/// The resource is gone: 404/410, or an empty body.
pub fn expect_absent(resp: &ApiResponse, context: &str) -> AssertionResult {
    if matches!(resp.status_code, 404 | 410) || resp.is_empty() {
        return Ok(());
    }
    Err(AssertionFailure::new(
        context,
        "404/410 or an empty body",
        format!("{} {}", resp.status_code, resp.body.text()),
    ))
}

fn key_set(resp: &ApiResponse, context: &str) -> Result<BTreeSet<String>, AssertionFailure> {
    let value = match &resp.body {
        ResponseBody::Json(Value::Array(items)) => items.first(),
        ResponseBody::Json(value) => Some(value),
        ResponseBody::Text(_) => None,
    };

    match value {
        Some(Value::Object(map)) => Ok(map.keys().cloned().collect()),
        _ => Err(AssertionFailure::new(
            context,
            "a JSON object",
            resp.body.text(),
        )),
    }
}
