// SPDX-License-Identifier: AGPL-3.0
// Voyara Network - Vega AI suggestion service
//
// The AI backend sleeps when idle, so timeouts and 5xx get cold-start wording.

use crate::client::ApiClient;
use crate::error::{normalize, ApiError, ErrorMessages};
use crate::models::{VegaAiRequest, VegaAiResponse};

pub const COLD_START_MESSAGE: &str = "AI service is warming up (first time may take 60-90 seconds).\n\nThis is normal for the first request. Please try again in a moment!";

const SUGGEST_MESSAGES: ErrorMessages = ErrorMessages {
    operation: "AI suggestions",
    timeout: COLD_START_MESSAGE,
    client_fallback: "Invalid request data",
    server: "AI service encountered an error. Please try again in a moment.",
    other_fallback: "Failed to get AI suggestions. Please try again.",
    passthrough: &["Invalid", "AI service"],
};

/// Itinerary suggestions from the Vega AI service
#[derive(Debug, Clone)]
pub struct VegaAiService {
    client: ApiClient,
    base_url: String,
}

impl VegaAiService {
    pub fn new(client: ApiClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn get_suggestions(&self, request: VegaAiRequest) -> Result<VegaAiResponse, ApiError> {
        tracing::info!(
            "Requesting suggestions for {}, {} day {} ({})",
            request.city,
            request.country,
            request.day,
            request.time_slot
        );
        let url = format!("{}/api/ai/vega/suggest", self.base_url);

        let result = async {
            let response = self.client.execute(|c| c.post(&url).json(&request)).await?;
            ApiClient::read_json::<VegaAiResponse>(response).await
        }
        .await;

        match result {
            Ok(response) => {
                tracing::info!("Received {} suggestions", response.suggestions.len());
                Ok(response)
            }
            Err(failure) => Err(normalize(failure, &SUGGEST_MESSAGES)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::{fast_client, serve};
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::time::Duration;

    async fn vega_with(router: Router) -> VegaAiService {
        VegaAiService::new(fast_client(), &serve(router).await)
    }

    fn request() -> VegaAiRequest {
        VegaAiRequest {
            trip_id: "t1".to_string(),
            city: "Jaipur".to_string(),
            country: "India".to_string(),
            day: 2,
            time_slot: "morning".to_string(),
            total_budget: 20000.0,
            remaining_budget: 15000.0,
            preferences: vec!["history".to_string(), "food".to_string()],
            adults: 2,
            children: 1,
        }
    }

    #[tokio::test]
    async fn test_suggestions_resolve_aliases() {
        let router = Router::new().route(
            "/api/ai/vega/suggest",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["time_slot"], "morning");
                assert_eq!(body["preferences"][1], "food");
                Json(json!({
                    "success": true,
                    "trip_id": body["trip_id"],
                    "city": "Jaipur",
                    "country": "India",
                    "day": 2,
                    "time_slot": "morning",
                    "adults": 2,
                    "children": 1,
                    "total_budget": 20000.0,
                    "remaining_budget": 15000.0,
                    "suggestions": [
                        {"place_name": "Amber Fort", "cost": 500.0, "reason": "iconic"},
                        {"name": "Hawa Mahal", "estimated_cost": 200.0, "time": "1h"}
                    ],
                    "message": "2 suggestions"
                }))
            }),
        );
        let vega = vega_with(router).await;

        let response = vega.get_suggestions(request()).await.unwrap();
        assert_eq!(response.suggestions.len(), 2);
        assert_eq!(response.suggestions[0].display_name(), "Amber Fort");
        assert_eq!(response.suggestions[0].display_reason(), Some("iconic"));
        assert_eq!(response.suggestions[1].display_cost(), Some(200.0));
        assert_eq!(response.suggestions[1].display_duration(), Some("1h"));
    }

    #[tokio::test]
    async fn test_timeout_explains_cold_start() {
        let router = Router::new().route(
            "/api/ai/vega/suggest",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                StatusCode::OK
            }),
        );
        let vega = vega_with(router).await;

        let err = vega.get_suggestions(request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert!(err.message().contains("warming up"));
        assert_ne!(
            err.message(),
            "Connection timeout. The server may be starting up. Please wait a moment and try again."
        );
    }

    #[tokio::test]
    async fn test_server_error_wording() {
        let router = Router::new().route(
            "/api/ai/vega/suggest",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let vega = vega_with(router).await;

        let err = vega.get_suggestions(request()).await.unwrap_err();
        assert_eq!(
            err.message(),
            "AI service encountered an error. Please try again in a moment."
        );
    }

    #[tokio::test]
    async fn test_client_error_body_and_fallback() {
        let router = Router::new().route(
            "/api/ai/vega/suggest",
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"message": "day must be positive"})),
                )
            }),
        );
        let vega = vega_with(router).await;
        let err = vega.get_suggestions(request()).await.unwrap_err();
        assert_eq!(err.message(), "day must be positive");

        let router = Router::new().route(
            "/api/ai/vega/suggest",
            post(|| async { StatusCode::BAD_REQUEST }),
        );
        let vega = vega_with(router).await;
        let err = vega.get_suggestions(request()).await.unwrap_err();
        assert_eq!(err.message(), "Invalid request data");
    }
}
