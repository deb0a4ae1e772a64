// SPDX-License-Identifier: AGPL-3.0
// Voyara App - Application context
//
// Built once at startup; every view-model gets its collaborators from here.
// The context owns the async runtime, so view-model actions can be called
// from any thread.

use crate::viewmodels::{
    CreateTripViewModel, DraftsViewModel, LoginViewModel, SignupViewModel, TripsListViewModel,
    VegaAiViewModel,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::{Handle, Runtime};
use voyara_core::{
    default_data_dir, AppConfig, AppError, DraftStore, KeyValueStore, SessionStore, SettingsStore,
};
use voyara_network::{ApiClient, AuthService, HttpConfig, TripService, VegaAiService};

const DRAFTS_NAMESPACE: &str = "drafts";
const SESSION_NAMESPACE: &str = "session";
const WORKER_THREADS: usize = 2;

/// Shared services and stores
pub struct AppContext {
    pub config: AppConfig,
    pub auth: AuthService,
    pub trips: TripService,
    pub vega: VegaAiService,
    pub drafts: Arc<DraftStore>,
    pub session: Arc<SessionStore>,
    runtime: Arc<Runtime>,
    data_dir: Option<PathBuf>,
}

impl AppContext {
    /// Open the on-disk stores in `dir`, or the platform config directory
    pub fn open(dir: Option<&Path>) -> Result<Self, AppError> {
        let dir = match dir {
            Some(dir) => dir.to_path_buf(),
            None => default_data_dir()?,
        };
        let config = AppConfig::load_or_init(&dir)?;
        let drafts = SettingsStore::open_in(&dir, DRAFTS_NAMESPACE)?;
        let session = SettingsStore::open_in(&dir, SESSION_NAMESPACE)?;
        tracing::info!("Data directory: {}", dir.display());

        let mut context = Self::with_stores(config, Arc::new(drafts), Arc::new(session))?;
        context.data_dir = Some(dir);
        Ok(context)
    }

    /// Wire services over caller-supplied stores
    pub fn with_stores(
        config: AppConfig,
        drafts: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let client = ApiClient::new(HttpConfig::from(&config))
            .map_err(|e| AppError::Network(e.to_string()))?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(WORKER_THREADS)
            .enable_all()
            .build()
            .map_err(|e| AppError::Runtime(format!("Failed to create Tokio runtime: {}", e)))?;

        Ok(Self {
            auth: AuthService::new(client.clone(), &config.auth_base_url),
            trips: TripService::new(client.clone(), &config.trip_base_url),
            vega: VegaAiService::new(client, &config.ai_base_url),
            drafts: Arc::new(DraftStore::new(drafts)),
            session: Arc::new(SessionStore::new(session)),
            config,
            runtime: Arc::new(runtime),
            data_dir: None,
        })
    }

    /// The runtime every view-model task runs on
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn handle(&self) -> Handle {
        self.runtime.handle().clone()
    }

    /// Where config and stores live; None for in-memory contexts
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn login_view_model(&self) -> LoginViewModel {
        LoginViewModel::new(self.auth.clone(), Arc::clone(&self.session), self.handle())
    }

    pub fn signup_view_model(&self) -> SignupViewModel {
        SignupViewModel::new(self.auth.clone(), self.handle())
    }

    pub fn create_trip_view_model(&self) -> CreateTripViewModel {
        CreateTripViewModel::new(
            self.trips.clone(),
            Arc::clone(&self.session),
            self.handle(),
        )
    }

    pub fn trips_list_view_model(&self) -> TripsListViewModel {
        TripsListViewModel::with_default_status(
            self.trips.clone(),
            Arc::clone(&self.session),
            &self.config.default_trip_status,
            self.handle(),
        )
    }

    pub fn vega_view_model(&self) -> VegaAiViewModel {
        VegaAiViewModel::new(self.vega.clone(), self.handle())
    }

    pub fn drafts_view_model(&self) -> DraftsViewModel {
        DraftsViewModel::new(Arc::clone(&self.drafts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fast_client, serve};
    use crate::validation::TripForm;
    use axum::{routing::post, Json, Router};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_config_and_persists_stores() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("voyara");
        {
            let ctx = AppContext::open(Some(&dir)).unwrap();
            assert_eq!(ctx.data_dir(), Some(dir.as_path()));
            assert!(dir.join("config.json").exists());
            ctx.session
                .save_login("tok", "ref", "u1", "a@b.co", "Ana")
                .unwrap();
            ctx.drafts_view_model().save(
                &TripForm {
                    name: "Porto".to_string(),
                    ..TripForm::default()
                },
                None,
            );
        }

        let ctx = AppContext::open(Some(&dir)).unwrap();
        assert_eq!(ctx.session.access_token().as_deref(), Some("tok"));
        assert_eq!(ctx.drafts.get_all_drafts()[0].name, "Porto");
        assert!(dir.join("drafts.json").exists());
        assert!(dir.join("session.json").exists());
    }

    #[test]
    fn test_trips_list_uses_configured_status() {
        let tmp = TempDir::new().unwrap();
        let config = AppConfig {
            default_trip_status: "ongoing".to_string(),
            ..AppConfig::default()
        };
        config.save(tmp.path()).unwrap();

        let ctx = AppContext::open(Some(tmp.path())).unwrap();
        assert_eq!(ctx.trips_list_view_model().selected_status(), "ongoing");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = AppConfig {
            trip_base_url: "ftp://example.com".to_string(),
            ..AppConfig::default()
        };
        let memory = || -> Arc<dyn KeyValueStore> { Arc::new(voyara_core::MemoryStore::new()) };
        assert!(matches!(
            AppContext::with_stores(config, memory(), memory()),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_view_model_runs_on_owned_runtime() {
        let ctx = AppContext::with_stores(
            AppConfig::default(),
            Arc::new(voyara_core::MemoryStore::new()),
            Arc::new(voyara_core::MemoryStore::new()),
        )
        .unwrap();
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async {
                Json(json!({
                    "message": "Welcome back",
                    "accessToken": "acc-1",
                    "refreshToken": "ref-1",
                    "user": {"id": "u1", "email": "ana@example.com", "fullName": "Ana"}
                }))
            }),
        );
        let url = ctx.runtime().block_on(serve(router));
        let vm = LoginViewModel::new(
            AuthService::new(fast_client(), &url),
            Arc::clone(&ctx.session),
            ctx.handle(),
        );

        // Called from the test thread, which is not a runtime worker
        vm.login("ana@example.com", "secret");
        let state = ctx.runtime().block_on(vm.state().settled());
        assert_eq!(state.success().map(String::as_str), Some("Welcome back"));
        assert_eq!(ctx.session.user_full_name().as_deref(), Some("Ana"));
        drop(vm);
    }
}
