use std::time::Duration;

use serde_json::Value;

/// Body of a completed call: parsed JSON when possible, the raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return ResponseBody::Text(raw.to_string());
        }
        match serde_json::from_str(raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw.to_string()),
        }
    }

    pub fn json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    /// `null`, `{}`, `[]`, `""` and whitespace-only text all count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            ResponseBody::Json(Value::Null) => true,
            ResponseBody::Json(Value::Object(map)) => map.is_empty(),
            ResponseBody::Json(Value::Array(items)) => items.is_empty(),
            ResponseBody::Json(Value::String(s)) => s.is_empty(),
            ResponseBody::Json(_) => false,
            ResponseBody::Text(text) => text.trim().is_empty(),
        }
    }

    /// Compact textual form, used for containment checks over the whole body.
    pub fn text(&self) -> String {
        match self {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Text(text) => text.clone(),
        }
    }
}

/// Normalized outcome of a call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: ResponseBody,
    pub elapsed: Duration,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn json(&self) -> Option<&Value> {
        self.body.json()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.json().and_then(|value| value.get(key))
    }

    /// RFC 6901 lookup, e.g. `/emails/0/address`.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.json().and_then(|value| value.pointer(pointer))
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
