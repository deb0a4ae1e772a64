// SPDX-License-Identifier: AGPL-3.0
// Voyara App - Screen logic shared by every frontend
//
// View-models validate input, call voyara-network or the local stores,
// and publish a UiState. Rendering is left to the frontend.

pub mod context;
pub mod state;
pub mod validation;
pub mod viewmodels;

pub use context::AppContext;
pub use state::{StateHolder, TaskScope, UiState};
pub use validation::{SuggestionForm, SuggestionParams, TripForm};
pub use viewmodels::{
    CreateTripViewModel, CreatedTrip, DraftsViewModel, LoginViewModel, SignupViewModel,
    TripsListViewModel, VegaAiViewModel,
};
