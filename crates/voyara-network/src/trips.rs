// SPDX-License-Identifier: AGPL-3.0
// Voyara Network - Trip service
//
// Both endpoints need a bearer token from the caller; no refresh happens here.

use crate::client::{bearer, ApiClient};
use crate::error::{normalize, structured_message, ApiError, ErrorKind, ErrorMessages, Failure};
use crate::models::{CreateTripRequest, CreateTripResponse, Trip};

const UNAUTHORIZED: &str = "Unauthorized. Please login again.";

const CREATE_MESSAGES: ErrorMessages = ErrorMessages {
    operation: "create trip",
    timeout: "Connection timeout. Please check your internet connection and try again.",
    client_fallback: "Failed to create trip",
    server: "Server error. Please try again later.",
    other_fallback: "Failed to create trip. Please try again.",
    passthrough: &["timeout", "Unauthorized", "Invalid", "Server error", "Failed to parse"],
};

const FETCH_MESSAGES: ErrorMessages = ErrorMessages {
    operation: "fetch trips",
    timeout: "Connection timeout. Please check your internet connection.",
    client_fallback: "Failed to fetch trips",
    server: "Server error. Please try again later.",
    other_fallback: "Failed to fetch trips",
    passthrough: &["timeout", "Unauthorized", "Server error", "Failed to parse", "Failed to fetch"],
};

/// Create and list trips on the trips API
#[derive(Debug, Clone)]
pub struct TripService {
    client: ApiClient,
    base_url: String,
}

impl TripService {
    pub fn new(client: ApiClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn create_trip(
        &self,
        request: CreateTripRequest,
        auth_token: &str,
    ) -> Result<CreateTripResponse, ApiError> {
        tracing::info!(
            "Creating trip '{}' ({} to {}), token {} chars",
            request.name,
            request.start_date,
            request.end_date,
            auth_token.len()
        );
        let url = format!("{}/api/trips", self.base_url);

        let result = async {
            let response = self
                .client
                .execute(|c| bearer(c.post(&url), auth_token).json(&request))
                .await?;
            ApiClient::read_json::<CreateTripResponse>(response).await
        }
        .await;

        match result {
            Ok(trip) => {
                tracing::info!("Trip created: {} ({})", trip.id, trip.name);
                Ok(trip)
            }
            Err(failure) => Err(Self::create_error(failure)),
        }
    }

    fn create_error(failure: Failure) -> ApiError {
        match failure {
            Failure::Status { status: 401, .. } => {
                tracing::warn!("Create trip unauthorized, token may be expired");
                ApiError::new(ErrorKind::Unauthorized, UNAUTHORIZED)
            }
            Failure::Status { status, body } if (400..=499).contains(&status) => {
                tracing::warn!("Create trip rejected with HTTP {}: {}", status, body);
                let detail = structured_message(&body)
                    .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()));
                let message = match (status, detail) {
                    (400, Some(detail)) => format!("Invalid trip data: {}", detail),
                    (400, None) => "Invalid trip data".to_string(),
                    (_, Some(detail)) => detail,
                    (_, None) => CREATE_MESSAGES.client_fallback.to_string(),
                };
                ApiError::new(ErrorKind::from_status(status), message)
            }
            other => normalize(other, &CREATE_MESSAGES),
        }
    }

    /// List the caller's trips, optionally filtered by status
    pub async fn fetch_trips(
        &self,
        status: Option<&str>,
        auth_token: &str,
    ) -> Result<Vec<Trip>, ApiError> {
        tracing::info!(
            "Fetching trips (status: {}), token {} chars",
            status.unwrap_or("any"),
            auth_token.len()
        );
        let url = format!("{}/api/trips", self.base_url);

        let result = async {
            let response = self
                .client
                .execute(|c| {
                    let builder = bearer(c.get(&url), auth_token);
                    match status {
                        Some(status) => builder.query(&[("status", status)]),
                        None => builder,
                    }
                })
                .await?;
            ApiClient::read_json::<Vec<Trip>>(response).await
        }
        .await;

        match result {
            Ok(trips) => {
                tracing::info!("Fetched {} trips", trips.len());
                Ok(trips)
            }
            Err(failure) => Err(Self::fetch_error(failure)),
        }
    }

    fn fetch_error(failure: Failure) -> ApiError {
        match failure {
            Failure::Status { status: 401, .. } => {
                tracing::warn!("Fetch trips unauthorized, token may be expired");
                ApiError::new(ErrorKind::Unauthorized, UNAUTHORIZED)
            }
            Failure::Status { status: 404, .. } => {
                ApiError::new(ErrorKind::NotFound, "No trips found")
            }
            Failure::Status { status, .. } if (400..=499).contains(&status) => ApiError::new(
                ErrorKind::from_status(status),
                format!("Failed to fetch trips: HTTP {}", status),
            ),
            Failure::Status { status, body } if status >= 500 => {
                tracing::error!("Fetch trips failed with HTTP {}: {}", status, body);
                ApiError::new(
                    ErrorKind::Server,
                    format!("Server error ({}). Please try again later.", status),
                )
            }
            Failure::Decode(detail) => {
                tracing::error!("Failed to parse trips: {}", detail);
                ApiError::new(
                    ErrorKind::Decode,
                    format!("Failed to parse trips data: {}", detail),
                )
            }
            Failure::Transport(detail)
                if !FETCH_MESSAGES.passthrough.iter().any(|p| detail.contains(p))
                    && !detail.to_lowercase().contains("timed out") =>
            {
                tracing::error!("Fetch trips failed: {}", detail);
                ApiError::new(
                    ErrorKind::Other,
                    format!("Failed to fetch trips: {}", detail),
                )
            }
            other => normalize(other, &FETCH_MESSAGES),
        }
    }
}
