pub mod browse;
pub mod delete;
pub mod edit;
pub mod view;

use crate::errors::{AppError, AppResult};
use serde_json::Value;

pub fn required_str<'a>(params: &'a Value, key: &str) -> AppResult<&'a str> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| AppError::ToolError(format!("missing {key}")))
}

pub fn optional_str<'a>(params: &'a Value, key: &str) -> AppResult<Option<&'a str>> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(AppError::ToolError(format!("{key} must be a string"))),
    }
}

/// Integers may arrive as JSON numbers or as numeric strings.
pub fn optional_int(params: &Value, key: &str) -> AppResult<Option<i64>> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => as_int(v)
            .map(Some)
            .ok_or_else(|| AppError::ToolError(format!("{key} must be an integer"))),
    }
}

pub fn as_int(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}
