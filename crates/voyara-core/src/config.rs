// SPDX-License-Identifier: AGPL-3.0
// Voyara Core - Application configuration
//
// Endpoints and HTTP tuning, stored as config.json next to the other stores.

use crate::types::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "config.json";

/// Application configuration (GUI-agnostic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Base URL of the auth API
    #[serde(default = "default_api_base")]
    pub auth_base_url: String,
    /// Base URL of the trips API
    #[serde(default = "default_api_base")]
    pub trip_base_url: String,
    /// Base URL of the suggestion service
    #[serde(default = "default_ai_base")]
    pub ai_base_url: String,
    /// Whole-request timeout; generous because the AI backend cold-starts
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum gap between received packets
    #[serde(default = "default_socket_timeout_ms")]
    pub socket_timeout_ms: u64,
    /// Retries for 5xx and transport failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_multiplier")]
    pub retry_multiplier: f64,
    /// Status filter used when listing trips without an explicit one
    #[serde(default = "default_trip_status")]
    pub default_trip_status: String,
}

fn default_api_base() -> String {
    "https://voyara.onrender.com".to_string()
}

fn default_ai_base() -> String {
    "https://vegaai-auhl.onrender.com".to_string()
}

fn default_request_timeout_ms() -> u64 {
    90_000
}

fn default_connect_timeout_ms() -> u64 {
    30_000
}

fn default_socket_timeout_ms() -> u64 {
    60_000
}

fn default_max_retries() -> u32 {
    1
}

fn default_retry_base_delay_ms() -> u64 {
    1000
}

fn default_retry_multiplier() -> f64 {
    1.5
}

fn default_trip_status() -> String {
    "planning".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth_base_url: default_api_base(),
            trip_base_url: default_api_base(),
            ai_base_url: default_ai_base(),
            request_timeout_ms: default_request_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            socket_timeout_ms: default_socket_timeout_ms(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_multiplier: default_retry_multiplier(),
            default_trip_status: default_trip_status(),
        }
    }
}

impl AppConfig {
    /// Load config from `dir`, writing defaults on first run
    pub fn load_or_init(dir: &Path) -> Result<Self, AppError> {
        let file_path = dir.join(CONFIG_FILE);
        tracing::info!("Config file path: {:?}", file_path);

        if !file_path.exists() {
            tracing::info!("No config file found, creating defaults");
            let config = Self::default();
            config.save(dir)?;
            return Ok(config);
        }

        let content = fs::read_to_string(&file_path)
            .map_err(|e| AppError::FileIo(format!("Failed to read config: {}", e)))?;

        let config: Self = serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse config, using defaults: {}", e);
            Self::default()
        });
        config.validate()?;
        Ok(config)
    }

    /// Persist config to `dir`
    pub fn save(&self, dir: &Path) -> Result<(), AppError> {
        fs::create_dir_all(dir)
            .map_err(|e| AppError::FileIo(format!("Failed to create config dir: {}", e)))?;

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Serialization(format!("Failed to serialize config: {}", e)))?;

        fs::write(dir.join(CONFIG_FILE), content)
            .map_err(|e| AppError::FileIo(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), AppError> {
        for url in [&self.auth_base_url, &self.trip_base_url, &self.ai_base_url] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::InvalidConfig(format!("Not an http(s) URL: {}", url)));
            }
        }
        if self.retry_multiplier < 1.0 {
            return Err(AppError::InvalidConfig(
                "retryMultiplier must be at least 1.0".to_string(),
            ));
        }
        Ok(())
    }
}
