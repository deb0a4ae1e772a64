// SPDX-License-Identifier: AGPL-3.0
// Voyara App - Login and signup view-models

use crate::state::{StateHolder, TaskScope, UiState};
use crate::validation::{validate_login, validate_signup};
use std::sync::Arc;
use tokio::runtime::Handle;
use voyara_core::SessionStore;
use voyara_network::{AuthService, LoginResponse, User};

/// Sign-in screen. A successful login replaces the stored session.
pub struct LoginViewModel {
    auth: AuthService,
    session: Arc<SessionStore>,
    state: StateHolder<String>,
    last_response: Arc<std::sync::Mutex<Option<LoginResponse>>>,
    tasks: TaskScope,
}

impl LoginViewModel {
    pub fn new(auth: AuthService, session: Arc<SessionStore>, runtime: Handle) -> Self {
        Self {
            auth,
            session,
            state: StateHolder::new(),
            last_response: Arc::new(std::sync::Mutex::new(None)),
            tasks: TaskScope::new(runtime),
        }
    }

    pub fn state(&self) -> &StateHolder<String> {
        &self.state
    }

    /// Response of the most recent successful login
    pub fn last_response(&self) -> Option<LoginResponse> {
        self.last_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn login(&self, email: &str, password: &str) {
        if let Err(e) = validate_login(email, password) {
            self.state.set(UiState::Error(e.to_string()));
            return;
        }

        self.state.set(UiState::Loading);
        let auth = self.auth.clone();
        let session = Arc::clone(&self.session);
        let state = self.state.clone();
        let last_response = Arc::clone(&self.last_response);
        let email = email.to_string();
        let password = password.to_string();

        self.tasks.spawn(async move {
            let response = match auth.login(&email, &password).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    state.set(UiState::Error(e.message().to_string()));
                    return;
                }
            };

            let user = &response.user;
            if let Err(e) = session.save_login(
                &response.access_token,
                &response.refresh_token,
                &user.id,
                &user.email,
                &user.full_name,
            ) {
                tracing::error!("Failed to persist session: {}", e);
                state.set(UiState::Error(e.to_string()));
                return;
            }

            let message = response.message.clone();
            *last_response.lock().unwrap_or_else(|e| e.into_inner()) = Some(response);
            state.set(UiState::Success(message));
        });
    }

    pub fn reset(&self) {
        self.state.set(UiState::Idle);
    }
}

/// Account creation screen. Signing up does not sign the user in.
pub struct SignupViewModel {
    auth: AuthService,
    state: StateHolder<User>,
    tasks: TaskScope,
}

impl SignupViewModel {
    pub fn new(auth: AuthService, runtime: Handle) -> Self {
        Self {
            auth,
            state: StateHolder::new(),
            tasks: TaskScope::new(runtime),
        }
    }

    pub fn state(&self) -> &StateHolder<User> {
        &self.state
    }

    pub fn signup(&self, full_name: &str, email: &str, password: &str) {
        if let Err(e) = validate_signup(full_name, email, password) {
            self.state.set(UiState::Error(e.to_string()));
            return;
        }

        self.state.set(UiState::Loading);
        let auth = self.auth.clone();
        let state = self.state.clone();
        let full_name = full_name.to_string();
        let email = email.to_string();
        let password = password.to_string();

        self.tasks.spawn(async move {
            match auth.signup(&full_name, &email, &password).await {
                Ok(response) => {
                    tracing::info!("Account created for {}", response.user.email);
                    state.set(UiState::Success(response.user));
                }
                Err(e) => {
                    tracing::warn!("Signup failed: {}", e);
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
    use crate::test_support::{fast_client, memory_session, serve, unreachable_url};
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn login_router() -> Router {
        Router::new().route(
            "/api/auth/login",
            post(|| async {
                Json(json!({
                    "message": "Welcome back",
                    "accessToken": "acc-1",
                    "refreshToken": "ref-1",
                    "user": {"id": "u1", "email": "ana@example.com", "fullName": "Ana Lima"}
                }))
            }),
        )
    }

    #[tokio::test]
    async fn test_login_saves_session() {
        let session = memory_session();
        let auth = AuthService::new(fast_client(), &serve(login_router()).await);
        let vm = LoginViewModel::new(auth, session.clone(), Handle::current());

        vm.login("ana@example.com", "secret");
        assert!(vm.state().get().is_loading());

        let state = vm.state().settled().await;
        assert_eq!(state, UiState::Success("Welcome back".to_string()));
        assert_eq!(session.access_token().as_deref(), Some("acc-1"));
        assert_eq!(session.refresh_token().as_deref(), Some("ref-1"));
        assert_eq!(session.user_full_name().as_deref(), Some("Ana Lima"));
        assert_eq!(vm.last_response().map(|r| r.user.id), Some("u1".to_string()));
    }

    #[tokio::test]
    async fn test_login_validation_skips_network() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/api/auth/login",
            post(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { StatusCode::OK }
            }),
        );
        let auth = AuthService::new(fast_client(), &serve(router).await);
        let vm = LoginViewModel::new(auth, memory_session(), Handle::current());

        vm.login("", "secret");
        assert_eq!(vm.state().get().error(), Some("Fields cannot be empty"));

        vm.login("ana.example.com", "secret");
        assert_eq!(vm.state().get().error(), Some("Invalid email format"));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_login_error_leaves_session_empty() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "Bad password"}))) }),
        );
        let session = memory_session();
        let auth = AuthService::new(fast_client(), &serve(router).await);
        let vm = LoginViewModel::new(auth, session.clone(), Handle::current());

        vm.login("ana@example.com", "wrong");
        assert_eq!(vm.state().settled().await.error(), Some("Bad password"));
        assert!(!session.has_valid_token());

        vm.reset();
        assert_eq!(vm.state().get(), UiState::Idle);
    }

    #[tokio::test]
    async fn test_signup_validation_and_success() {
        let router = Router::new().route(
            "/api/auth/signup",
            post(|| async {
                (
                    StatusCode::CREATED,
                    Json(json!({
                        "message": "created",
                        "user": {"id": "u2", "email": "bo@example.com", "fullName": "Bo"}
                    })),
                )
            }),
        );
        let auth = AuthService::new(fast_client(), &serve(router).await);
        let vm = SignupViewModel::new(auth, Handle::current());

        vm.signup("Bo", "bo@example.com", "short");
        assert_eq!(
            vm.state().get().error(),
            Some("Password must be at least 8 characters")
        );

        vm.signup("Bo", "bo@example.com", "long enough");
        let state = vm.state().settled().await;
        assert_eq!(state.success().map(|u| u.id.as_str()), Some("u2"));
    }

    #[tokio::test]
    async fn test_signup_unreachable_server() {
        let auth = AuthService::new(fast_client(), &unreachable_url().await);
        let vm = SignupViewModel::new(auth, Handle::current());

        vm.signup("Bo", "bo@example.com", "long enough");
        let state = vm.state().settled().await;
        assert!(state.error().is_some());
    }

    #[test]
    fn test_login_started_from_plain_thread() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        let url = runtime.block_on(serve(login_router()));
        let session = memory_session();
        let vm = LoginViewModel::new(
            AuthService::new(fast_client(), &url),
            session.clone(),
            runtime.handle().clone(),
        );

        vm.login("ana@example.com", "secret");
        let state = runtime.block_on(vm.state().settled());
        assert_eq!(state, UiState::Success("Welcome back".to_string()));
        assert_eq!(session.access_token().as_deref(), Some("acc-1"));
        drop(vm);
    }
}
