// SPDX-License-Identifier: AGPL-3.0
// Voyara App - View-models module

mod auth;
mod drafts;
mod trips;
mod vega;

pub use auth::{LoginViewModel, SignupViewModel};
pub use drafts::DraftsViewModel;
pub use trips::{CreateTripViewModel, CreatedTrip, TripsListViewModel};
pub use vega::VegaAiViewModel;
