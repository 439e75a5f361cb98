// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures of a call against the tracker backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected locally, no request was sent.
    #[error("{0}")]
    Validation(String),

    /// The backend answered 401. Always treated as an expired session.
    #[error("Session expired. Please log in again.")]
    Unauthorized,

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds a status error, preferring the backend's `detail` message.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| match v.get("detail") {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(other) if !other.is_null() => Some(other.to_string()),
                _ => None,
            })
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        ApiError::Status { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
