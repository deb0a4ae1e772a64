// SPDX-License-Identifier: AGPL-3.0
// Voyara App - Trip creation and trip list view-models

use crate::state::{StateHolder, TaskScope, UiState};
use crate::validation::{parse_budget, TripForm};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use voyara_core::{format_date_for_api, SessionStore};
use voyara_network::{CreateTripRequest, CreateTripResponse, Trip, TripService};

pub const DEFAULT_STATUS_FILTER: &str = "planning";

/// Outcome of a successful trip submission
#[derive(Debug, Clone)]
pub struct CreatedTrip {
    pub message: String,
    pub response: CreateTripResponse,
}

fn stored_token(session: &SessionStore) -> Option<String> {
    session.access_token().filter(|t| !t.trim().is_empty())
}

pub struct CreateTripViewModel {
    trips: TripService,
    session: Arc<SessionStore>,
    state: StateHolder<CreatedTrip>,
    tasks: TaskScope,
}

impl CreateTripViewModel {
    pub fn new(trips: TripService, session: Arc<SessionStore>, runtime: Handle) -> Self {
        Self {
            trips,
            session,
            state: StateHolder::new(),
            tasks: TaskScope::new(runtime),
        }
    }

    pub fn state(&self) -> &StateHolder<CreatedTrip> {
        &self.state
    }

    /// Validate the whole form, then submit it
    pub fn submit(&self, form: &TripForm) {
        if let Err(e) = form.validate() {
            self.state.set(UiState::Error(e.to_string()));
            return;
        }
        self.create_trip(
            &form.name,
            &form.description,
            &form.start_date,
            &form.end_date,
            form.cover_photo().as_deref(),
            Some(form.budget.as_str()),
        );
    }

    /// Submit a trip. Dates are DD/MM/YYYY as entered.
    pub fn create_trip(
        &self,
        name: &str,
        description: &str,
        start_date: &str,
        end_date: &str,
        cover_photo: Option<&str>,
        budget: Option<&str>,
    ) {
        self.state.set(UiState::Loading);

        let Some(token) = stored_token(&self.session) else {
            tracing::warn!("Create trip attempted without a session");
            self.state
                .set(UiState::Error("Please login to create a trip".to_string()));
            return;
        };

        let request = CreateTripRequest {
            name: name.to_string(),
            description: description.to_string(),
            start_date: format_date_for_api(start_date),
            end_date: format_date_for_api(end_date),
            cover_photo: cover_photo.map(str::to_string),
            budget: budget.and_then(parse_budget),
        };
        let trips = self.trips.clone();
        let state = self.state.clone();

        self.tasks.spawn(async move {
            match trips.create_trip(request, &token).await {
                Ok(response) => {
                    let message = format!("Trip '{}' created successfully!", response.name);
                    tracing::info!("{}", message);
                    state.set(UiState::Success(CreatedTrip { message, response }));
                }
                Err(e) => {
                    tracing::warn!("Create trip failed: {}", e);
                    state.set(UiState::Error(e.message().to_string()));
                }
            }
        });
    }

    pub fn reset(&self) {
        self.state.set(UiState::Idle);
    }
}

/// The user's trips, filtered by status
pub struct TripsListViewModel {
    trips: TripService,
    session: Arc<SessionStore>,
    selected_status: Arc<Mutex<String>>,
    state: StateHolder<Vec<Trip>>,
    tasks: TaskScope,
}

impl TripsListViewModel {
    pub fn new(trips: TripService, session: Arc<SessionStore>, runtime: Handle) -> Self {
        Self::with_default_status(trips, session, DEFAULT_STATUS_FILTER, runtime)
    }

    pub fn with_default_status(
        trips: TripService,
        session: Arc<SessionStore>,
        status: &str,
        runtime: Handle,
    ) -> Self {
        Self {
            trips,
            session,
            selected_status: Arc::new(Mutex::new(status.to_string())),
            state: StateHolder::new(),
            tasks: TaskScope::new(runtime),
        }
    }

    pub fn state(&self) -> &StateHolder<Vec<Trip>> {
        &self.state
    }

    pub fn selected_status(&self) -> String {
        self.selected_status
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn fetch_trips(&self, status: &str) {
        self.state.set(UiState::Loading);
        *self.selected_status.lock().unwrap_or_else(|e| e.into_inner()) = status.to_string();

        let Some(token) = stored_token(&self.session) else {
            self.state
                .set(UiState::Error("Please login to view trips".to_string()));
            return;
        };

        let trips = self.trips.clone();
        let state = self.state.clone();
        let status = status.to_string();

        self.tasks.spawn(async move {
            match trips.fetch_trips(Some(&status), &token).await {
                Ok(list) => {
                    tracing::info!("Loaded {} {} trip(s)", list.len(), status);
                    state.set(UiState::Success(list));
                }
                Err(e) => {
                    tracing::warn!("Fetching trips failed: {}", e);
                    state.set(UiState::Error(e.message().to_string()));
                }
            }
        });
    }

    /// Refetch with the currently selected filter
    pub fn refresh(&self) {
        let status = self.selected_status();
        self.fetch_trips(&status);
    }

    /// Switch filter; a no-op when `status` is already selected
    pub fn change_status_filter(&self, status: &str) {
        if status != self.selected_status() {
            self.fetch_trips(status);
        }
    }

    pub fn reset(&self) {
        self.state.set(UiState::Idle);
    }
}
