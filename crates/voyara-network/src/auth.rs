// SPDX-License-Identifier: AGPL-3.0
// Voyara Network - Auth service

use crate::client::ApiClient;
use crate::error::{normalize, ApiError, ErrorMessages};
use crate::models::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};

const COLD_START_TIMEOUT: &str =
    "Connection timeout. The server may be starting up. Please wait a moment and try again.";
const SERVER_ERROR: &str = "Server error. Please try again later.";

const LOGIN_MESSAGES: ErrorMessages = ErrorMessages {
    operation: "login",
    timeout: COLD_START_TIMEOUT,
    client_fallback: "Invalid credentials",
    server: SERVER_ERROR,
    other_fallback: "Login failed. Please try again.",
    passthrough: &["Invalid", "Connection", "Server error"],
};

const SIGNUP_MESSAGES: ErrorMessages = ErrorMessages {
    operation: "signup",
    timeout: COLD_START_TIMEOUT,
    client_fallback: "Email already exists or invalid data",
    server: SERVER_ERROR,
    other_fallback: "Signup failed. Please try again.",
    passthrough: &["timeout", "already exists", "invalid data", "Server error"],
};

/// Login and signup against the auth API
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
    base_url: String,
}

impl AuthService {
    pub fn new(client: ApiClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        tracing::info!("Logging in {}", email);
        let url = format!("{}/api/auth/login", self.base_url);
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let result = async {
            let response = self.client.execute(|c| c.post(&url).json(&request)).await?;
            ApiClient::read_json::<LoginResponse>(response).await
        }
        .await;

        result.map_err(|failure| normalize(failure, &LOGIN_MESSAGES))
    }

    pub async fn signup(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignupResponse, ApiError> {
        tracing::info!("Signing up {}", email);
        let url = format!("{}/api/auth/signup", self.base_url);
        let request = SignupRequest {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let result = async {
            let response = self.client.execute(|c| c.post(&url).json(&request)).await?;
            ApiClient::read_json::<SignupResponse>(response).await
        }
        .await;

        result.map_err(|failure| normalize(failure, &SIGNUP_MESSAGES))
    }
}
