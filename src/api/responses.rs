//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{state::EngineSnapshot, view::ViewSnapshot};

/// Form submission for a new countdown. Missing fields read as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
}

/// API response structure for state change endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub countdown: EngineSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, countdown: EngineSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            countdown,
        }
    }

    /// Create a success response
    pub fn ok(message: String, countdown: EngineSnapshot) -> Self {
        Self::new("ok".to_string(), message, countdown)
    }

    /// Create a rejected-input response
    pub fn invalid(message: String, countdown: EngineSnapshot) -> Self {
        Self::new("invalid".to_string(), message, countdown)
    }

    /// Create an error response
    pub fn error(message: String, countdown: EngineSnapshot) -> Self {
        Self::new("error".to_string(), message, countdown)
    }
}

/// Full widget status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub countdown: EngineSnapshot,
    pub view: ViewSnapshot,
    /// Earliest date the form accepts, `YYYY-MM-DD`
    pub min_date: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
