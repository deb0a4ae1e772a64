// SPDX-License-Identifier: AGPL-3.0
// Voyara Core - Type definitions

use serde::{Deserialize, Serialize};

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A trip form saved locally before it is submitted.
///
/// Drafts never leave the device. Dates, budget and traveler count are kept
/// exactly as typed so an edit session can be restored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDraft {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    /// Free-form, not guaranteed to be numeric
    #[serde(default)]
    pub budget: String,
    #[serde(default = "default_travelers")]
    pub number_of_travelers: String,
    #[serde(default = "default_trip_type")]
    pub selected_trip_type: String,
    #[serde(default)]
    pub cover_photo_url: String,
    #[serde(default = "now_millis")]
    pub created_at: i64,
    #[serde(default = "now_millis")]
    pub updated_at: i64,
}

fn default_travelers() -> String {
    "1".to_string()
}

fn default_trip_type() -> String {
    "Leisure".to_string()
}

impl TripDraft {
    /// Create a fresh draft with a newly generated id
    pub fn new(name: &str, start_date: &str, end_date: &str, description: &str) -> Self {
        Self::with_id(
            &uuid::Uuid::new_v4().to_string(),
            name,
            start_date,
            end_date,
            description,
        )
    }

    /// Create a draft that reuses an existing id, for re-saving an edited draft
    pub fn with_id(
        id: &str,
        name: &str,
        start_date: &str,
        end_date: &str,
        description: &str,
    ) -> Self {
        let now = now_millis();
        Self {
            id: id.to_string(),
            name: name.to_string(),
            destination: String::new(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            description: description.to_string(),
            budget: String::new(),
            number_of_travelers: default_travelers(),
            selected_trip_type: default_trip_type(),
            cover_photo_url: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Error types for the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("File I/O error: {0}")]
    FileIo(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Validation(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileIo(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
