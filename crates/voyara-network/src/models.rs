// SPDX-License-Identifier: AGPL-3.0
// Voyara Network - Wire models
//
// Auth bodies are camelCase, trip and suggestion bodies are snake_case.
// Unknown fields are ignored everywhere.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// AUTH
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    /// Not always returned by the backend
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Structured error body some endpoints return
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.is_empty())
            .or(self.error.filter(|e| !e.is_empty()))
    }
}

// ============================================================================
// TRIPS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub name: String,
    pub description: String,
    /// YYYY-MM-DD
    pub start_date: String,
    /// YYYY-MM-DD
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTripResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub cover_photo: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Lifecycle of a submitted trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripStatus {
    Planning,
    Ongoing,
    Completed,
    Cancelled,
    Other(String),
}

impl TripStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Planning => "planning",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for TripStatus {
    fn from(s: &str) -> Self {
        match s {
            "planning" => Self::Planning,
            "ongoing" => Self::Ongoing,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Trip {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub stops: Vec<Stop>,
    pub cover_photo: Option<String>,
    pub budget: Option<f64>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Trip {
    pub fn status(&self) -> Option<TripStatus> {
        self.status.as_deref().map(TripStatus::from)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    #[serde(default)]
    pub id: Option<String>,
    pub city_name: String,
    pub arrival_date: String,
    pub departure_date: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub cost: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: String,
}

// ============================================================================
// SUGGESTIONS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct VegaAiRequest {
    pub trip_id: String,
    pub city: String,
    pub country: String,
    pub day: u32,
    pub time_slot: String,
    pub total_budget: f64,
    pub remaining_budget: f64,
    pub preferences: Vec<String>,
    pub adults: u32,
    pub children: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VegaAiResponse {
    pub success: bool,
    pub trip_id: String,
    pub city: String,
    pub country: String,
    pub day: u32,
    pub time_slot: String,
    pub adults: u32,
    pub children: u32,
    pub total_budget: f64,
    pub remaining_budget: f64,
    pub suggestions: Vec<Suggestion>,
    pub message: String,
}

/// Suggestion exactly as the service sends it; several fields have aliases
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSuggestion {
    name: Option<String>,
    place_name: Option<String>,
    title: Option<String>,
    subtitle: Option<String>,
    description: String,
    highlights: Vec<String>,
    recommendation_reason: Option<String>,
    reason: Option<String>,
    category: Option<String>,
    estimated_cost: Option<f64>,
    cost: Option<f64>,
    duration: Option<String>,
    time: Option<String>,
}

const UNKNOWN_PLACE: &str = "Unknown Place";

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A recommended place or activity, with aliases resolved at decode time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub name: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub highlights: Vec<String>,
    pub reason: Option<String>,
    pub category: Option<String>,
    pub cost: Option<f64>,
    pub duration: Option<String>,
}

impl<'de> Deserialize<'de> for Suggestion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawSuggestion::deserialize(deserializer).map(Suggestion::resolve)
    }
}

impl Suggestion {
    fn resolve(raw: RawSuggestion) -> Self {
        let name = non_blank(raw.name)
            .or_else(|| non_blank(raw.place_name))
            .or_else(|| non_blank(raw.title))
            .unwrap_or_else(|| UNKNOWN_PLACE.to_string());

        Self {
            name,
            subtitle: raw.subtitle,
            description: raw.description,
            highlights: raw.highlights,
            reason: raw.recommendation_reason.or(raw.reason),
            category: raw.category,
            cost: raw.estimated_cost.or(raw.cost),
            duration: raw.duration.or(raw.time),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    pub fn display_cost(&self) -> Option<f64> {
        self.cost
    }

    pub fn display_reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn display_duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }
}
