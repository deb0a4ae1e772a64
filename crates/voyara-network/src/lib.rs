// SPDX-License-Identifier: AGPL-3.0
// Voyara Network - API gateway
//
// One shared HTTP client, three stateless services on top of it.
// Every failure leaves this crate as an ApiError carrying a display message.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod trips;
pub mod vega;

pub use auth::AuthService;
pub use client::{ApiClient, HttpConfig, RetryPolicy};
pub use error::{ApiError, ErrorKind};
pub use models::{
    Activity, CreateTripRequest, CreateTripResponse, ErrorResponse, LoginRequest, LoginResponse,
    SignupRequest, SignupResponse, Stop, Suggestion, Trip, TripStatus, User, VegaAiRequest,
    VegaAiResponse,
};
pub use trips::TripService;
pub use vega::VegaAiService;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::client::{ApiClient, HttpConfig, RetryPolicy};
    use std::time::Duration;

    /// Serve `router` on an ephemeral local port and return its base URL
    pub async fn serve(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Client with short timeouts and near-instant retries
    pub fn fast_client() -> ApiClient {
        ApiClient::new(HttpConfig {
            request_timeout: Duration::from_millis(300),
            connect_timeout: Duration::from_millis(300),
            socket_timeout: Duration::from_millis(300),
            retry: RetryPolicy {
                max_retries: 1,
                base_delay: Duration::from_millis(5),
                multiplier: 1.5,
            },
        })
        .unwrap()
    }
}
