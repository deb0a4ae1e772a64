// SPDX-License-Identifier: AGPL-3.0
// Voyara App - Vega AI suggestions view-model

use crate::state::{StateHolder, TaskScope, UiState};
use crate::validation::{SuggestionForm, SuggestionParams};
use tokio::runtime::Handle;
use voyara_network::{VegaAiRequest, VegaAiResponse, VegaAiService};

pub struct VegaAiViewModel {
    vega: VegaAiService,
    state: StateHolder<VegaAiResponse>,
    tasks: TaskScope,
}

impl VegaAiViewModel {
    pub fn new(vega: VegaAiService, runtime: Handle) -> Self {
        Self {
            vega,
            state: StateHolder::new(),
            tasks: TaskScope::new(runtime),
        }
    }

    pub fn state(&self) -> &StateHolder<VegaAiResponse> {
        &self.state
    }

    /// Validate the screen inputs and request suggestions
    pub fn submit(&self, form: &SuggestionForm) {
        match form.validate() {
            Ok(params) => self.get_suggestions(params),
            Err(e) => self.state.set(UiState::Error(e.to_string())),
        }
    }

    pub fn get_suggestions(&self, params: SuggestionParams) {
        self.state.set(UiState::Loading);

        let request = VegaAiRequest {
            trip_id: params.trip_id,
            city: params.city,
            country: params.country,
            day: params.day,
            time_slot: params.time_slot.to_lowercase(),
            total_budget: params.total_budget,
            remaining_budget: params.remaining_budget,
            preferences: params.preferences,
            adults: params.adults,
            children: params.children,
        };
        let vega = self.vega.clone();
        let state = self.state.clone();

        self.tasks.spawn(async move {
            match vega.get_suggestions(request).await {
                Ok(response) => state.set(UiState::Success(response)),
                Err(e) => {
                    tracing::warn!("Suggestions failed: {}", e);
                    state.set(UiState::Error(e.message().to_string()));
                }
            }
        });
    }

    pub fn reset(&self) {
        self.state.set(UiState::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fast_client, serve};
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    fn form() -> SuggestionForm {
        SuggestionForm {
            trip_id: "t1".to_string(),
            city: "Jaipur".to_string(),
            country: "India".to_string(),
            day: "1".to_string(),
            time_slot: "Evening".to_string(),
            total_budget: "10000".to_string(),
            remaining_budget: "8000".to_string(),
            preferences: vec!["food".to_string()],
            ..SuggestionForm::default()
        }
    }

    #[tokio::test]
    async fn test_time_slot_lowercased_and_defaults_applied() {
        let router = Router::new().route(
            "/api/ai/vega/suggest",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["time_slot"], "evening");
                assert_eq!(body["adults"], 1);
                assert_eq!(body["children"], 0);
                Json(json!({
                    "success": true, "trip_id": "t1", "city": "Jaipur", "country": "India",
                    "day": 1, "time_slot": "evening", "adults": 1, "children": 0,
                    "total_budget": 10000.0, "remaining_budget": 8000.0,
                    "suggestions": [{"title": "Chokhi Dhani"}],
                    "message": "ok"
                }))
            }),
        );
        let vm = VegaAiViewModel::new(
            VegaAiService::new(fast_client(), &serve(router).await),
            Handle::current(),
        );

        vm.submit(&form());
        let state = vm.state().settled().await;
        let response = state.success().unwrap();
        assert_eq!(response.suggestions[0].display_name(), "Chokhi Dhani");
    }

    #[tokio::test]
    async fn test_invalid_form_never_loads() {
        let router = Router::new().route(
            "/api/ai/vega/suggest",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let vm = VegaAiViewModel::new(
            VegaAiService::new(fast_client(), &serve(router).await),
            Handle::current(),
        );

        vm.submit(&SuggestionForm {
            remaining_budget: "-1".to_string(),
            ..form()
        });
        assert_eq!(
            vm.state().get().error(),
            Some("Remaining budget must be a non-negative number")
        );
    }

    #[tokio::test]
    async fn test_server_error_published() {
        let router = Router::new().route(
            "/api/ai/vega/suggest",
            post(|| async { StatusCode::BAD_GATEWAY }),
        );
        let vm = VegaAiViewModel::new(
            VegaAiService::new(fast_client(), &serve(router).await),
            Handle::current(),
        );

        vm.submit(&form());
        assert_eq!(
            vm.state().settled().await.error(),
            Some("AI service encountered an error. Please try again in a moment.")
        );
    }
}
