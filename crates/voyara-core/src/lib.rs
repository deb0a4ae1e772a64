// SPDX-License-Identifier: AGPL-3.0
// Voyara Core - Shared logic for all frontends
//
// This crate provides:
// - AppConfig, AppError and the TripDraft record
// - SettingsStore, a namespaced key-value store persisted as JSON
// - DraftStore for unsent trip drafts
// - SessionStore for the signed-in user's tokens
// - Date helpers for the form/API boundary
//
// Network access lives in voyara-network.

pub mod config;
pub mod dates;
pub mod drafts;
pub mod session;
pub mod settings;
pub mod types;

// Re-export commonly used items
pub use config::AppConfig;
pub use dates::{format_date_for_api, format_picker_date};
pub use drafts::DraftStore;
pub use session::SessionStore;
pub use settings::{KeyValueStore, MemoryStore, SettingsStore};
pub use types::{now_millis, AppError, TripDraft};

/// Directory holding all Voyara files on this machine
pub fn default_data_dir() -> Result<std::path::PathBuf, AppError> {
    let dir = directories::ProjectDirs::from("com", "ebf", "voyara")
        .ok_or_else(|| AppError::FileIo("Could not determine config directory".to_string()))?
        .config_dir()
        .to_path_buf();

    // Ensure the directory exists
    std::fs::create_dir_all(&dir)
        .map_err(|e| AppError::FileIo(format!("Failed to create config dir: {}", e)))?;

    Ok(dir)
}
