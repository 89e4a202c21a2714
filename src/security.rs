use crate::config::Config;
use crate::errors::AppError;
use axum::http::HeaderMap;
use std::collections::{BTreeMap, BTreeSet};

/// Decides whether a caller identity may use the file manager at all.
pub trait PermissionOracle: Send + Sync {
    fn is_allowed(&self, identity: &str) -> bool;
}

/// Allowed when listed explicitly or when the identity's privilege level is high enough.
#[derive(Debug, Clone)]
pub struct AllowListOracle {
    allowed: BTreeSet<String>,
    levels: BTreeMap<String, u8>,
    min_level: u8,
}

impl AllowListOracle {
    pub fn new(allowed: BTreeSet<String>, levels: BTreeMap<String, u8>, min_level: u8) -> Self {
        Self { allowed, levels, min_level }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            cfg.manager.allowed_identities.clone(),
            cfg.permissions.levels.clone(),
            cfg.permissions.min_level,
        )
    }

    pub fn level(&self, identity: &str) -> u8 {
        self.levels.get(identity).copied().unwrap_or(0)
    }
}

impl PermissionOracle for AllowListOracle {
    fn is_allowed(&self, identity: &str) -> bool {
        self.allowed.contains(identity) || self.level(identity) >= self.min_level
    }
}

pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

pub fn require_bearer(headers: &HeaderMap, expected: &str) -> Result<(), AppError> {
    let token = extract_bearer(headers).ok_or(AppError::Unauthorized)?;
    if token != expected {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

pub fn check_origin(headers: &HeaderMap, allowed: &[String]) -> Result<(), AppError> {
    let origin = headers
        .get("Origin")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::OriginDenied)?;
    if allowed.iter().any(|o| o == origin) {
        Ok(())
    } else {
        Err(AppError::OriginDenied)
    }
}

pub fn content_length_ok(headers: &HeaderMap, max_kb: usize) -> Result<(), AppError> {
    if let Some(len) = headers
        .get(axum::http::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<usize>().ok())
    {
        if len > max_kb * 1024 {
            return Err(AppError::RequestTooLarge);
        }
    }
    Ok(())
}
