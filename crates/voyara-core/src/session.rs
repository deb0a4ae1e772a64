// SPDX-License-Identifier: AGPL-3.0
// Voyara Core - Session persistence
//
// Tokens and user info are discrete string entries in their own namespace.
// One session at a time: a login overwrites it, a logout clears it.

use crate::settings::KeyValueStore;
use crate::types::AppError;
use std::sync::Arc;

const KEY_ACCESS_TOKEN: &str = "access_token";
const KEY_REFRESH_TOKEN: &str = "refresh_token";
const KEY_USER_ID: &str = "user_id";
const KEY_USER_EMAIL: &str = "user_email";
const KEY_USER_FULL_NAME: &str = "user_full_name";

/// Signed-in user's credentials
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn get(&self, key: &str) -> Option<String> {
        self.store.get_string(key).unwrap_or_else(|e| {
            tracing::warn!("Failed to read session key {}: {}", key, e);
            None
        })
    }

    pub fn save_access_token(&self, token: &str) -> Result<(), AppError> {
        tracing::debug!("Saving access token ({} chars)", token.len());
        self.store.put_string(KEY_ACCESS_TOKEN, token)
    }

    pub fn save_refresh_token(&self, token: &str) -> Result<(), AppError> {
        self.store.put_string(KEY_REFRESH_TOKEN, token)
    }

    pub fn access_token(&self) -> Option<String> {
        self.get(KEY_ACCESS_TOKEN)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.get(KEY_REFRESH_TOKEN)
    }

    pub fn has_valid_token(&self) -> bool {
        self.access_token().is_some_and(|t| !t.is_empty())
    }

    pub fn save_user_info(&self, user_id: &str, email: &str, full_name: &str) -> Result<(), AppError> {
        self.store.put_many(&[
            (KEY_USER_ID, user_id),
            (KEY_USER_EMAIL, email),
            (KEY_USER_FULL_NAME, full_name),
        ])
    }

    pub fn user_id(&self) -> Option<String> {
        self.get(KEY_USER_ID)
    }

    pub fn user_email(&self) -> Option<String> {
        self.get(KEY_USER_EMAIL)
    }

    pub fn user_full_name(&self) -> Option<String> {
        self.get(KEY_USER_FULL_NAME)
    }

    /// Replace the whole session with freshly issued credentials.
    ///
    /// All five fields land in one write; a failed write keeps the old session.
    pub fn save_login(
        &self,
        access_token: &str,
        refresh_token: &str,
        user_id: &str,
        email: &str,
        full_name: &str,
    ) -> Result<(), AppError> {
        tracing::debug!("Saving access token ({} chars)", access_token.len());
        self.store.put_many(&[
            (KEY_ACCESS_TOKEN, access_token),
            (KEY_REFRESH_TOKEN, refresh_token),
            (KEY_USER_ID, user_id),
            (KEY_USER_EMAIL, email),
            (KEY_USER_FULL_NAME, full_name),
        ])?;
        tracing::info!("Session saved for user {}", user_id);
        Ok(())
    }

    pub fn clear_tokens(&self) -> Result<(), AppError> {
        self.store.remove(KEY_ACCESS_TOKEN)?;
        self.store.remove(KEY_REFRESH_TOKEN)
    }

    pub fn clear_user_info(&self) -> Result<(), AppError> {
        self.store.remove(KEY_USER_ID)?;
        self.store.remove(KEY_USER_EMAIL)?;
        self.store.remove(KEY_USER_FULL_NAME)
    }

    /// Drop every session field
    pub fn logout(&self) -> Result<(), AppError> {
        self.clear_tokens()?;
        self.clear_user_info()?;
        tracing::info!("Session cleared");
        Ok(())
    }
}
