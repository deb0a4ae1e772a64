// SPDX-License-Identifier: AGPL-3.0
// Voyara Core - Trip draft persistence
//
// All drafts are stored as one JSON array under a single key.
// Failures are logged and reported as false / empty / None, never raised.

use crate::settings::KeyValueStore;
use crate::types::{now_millis, AppError, TripDraft};
use std::sync::{Arc, Mutex, MutexGuard};

/// Storage key holding the serialized draft collection
pub const DRAFTS_KEY: &str = "trip_drafts";

/// Local CRUD over unsent trip drafts
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
    /// Serializes every read-modify-write of the collection
    write_lock: Mutex<()>,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> Result<Vec<TripDraft>, AppError> {
        match self.store.get_string(DRAFTS_KEY)? {
            Some(json) if !json.trim().is_empty() => Ok(serde_json::from_str(&json)?),
            _ => Ok(Vec::new()),
        }
    }

    fn write(&self, drafts: &[TripDraft]) -> Result<(), AppError> {
        let json = serde_json::to_string(drafts)?;
        self.store.put_string(DRAFTS_KEY, &json)
    }

    fn try_save(&self, draft: TripDraft) -> Result<(), AppError> {
        let _guard = self.lock();
        let mut drafts = self.load()?;

        match drafts.iter().position(|d| d.id == draft.id) {
            Some(index) => {
                let previous = drafts[index].updated_at;
                let updated_at = now_millis().max(previous);
                drafts[index] = TripDraft { updated_at, ..draft };

                // Collapse any stray duplicates behind the replaced entry
                let id = drafts[index].id.clone();
                let mut seen = false;
                drafts.retain(|d| {
                    if d.id != id {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => drafts.push(draft),
        }

        self.write(&drafts)
    }

    /// Save a new draft or replace an existing one with the same id
    pub fn save_draft(&self, draft: TripDraft) -> bool {
        let id = draft.id.clone();
        match self.try_save(draft) {
            Ok(()) => {
                tracing::info!("Draft saved: {}", id);
                true
            }
            Err(e) => {
                tracing::error!("Failed to save draft {}: {}", id, e);
                false
            }
        }
    }

    /// All drafts, most recently modified first
    pub fn get_all_drafts(&self) -> Vec<TripDraft> {
        match self.load() {
            Ok(mut drafts) => {
                drafts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                drafts
            }
            Err(e) => {
                tracing::warn!("Failed to read drafts, returning none: {}", e);
                Vec::new()
            }
        }
    }

    pub fn get_draft_by_id(&self, id: &str) -> Option<TripDraft> {
        self.get_all_drafts().into_iter().find(|d| d.id == id)
    }

    fn try_delete(&self, id: &str) -> Result<bool, AppError> {
        let _guard = self.lock();
        let mut drafts = self.load()?;
        let original_len = drafts.len();
        drafts.retain(|d| d.id != id);

        if drafts.len() == original_len {
            return Ok(false);
        }
        self.write(&drafts)?;
        Ok(true)
    }

    /// Delete a draft; true only if something was removed
    pub fn delete_draft(&self, id: &str) -> bool {
        match self.try_delete(id) {
            Ok(true) => {
                tracing::info!("Draft deleted: {}", id);
                true
            }
            Ok(false) => {
                tracing::debug!("Draft not found: {}", id);
                false
            }
            Err(e) => {
                tracing::error!("Failed to delete draft {}: {}", id, e);
                false
            }
        }
    }

    pub fn delete_all_drafts(&self) -> bool {
        let _guard = self.lock();
        match self.store.remove(DRAFTS_KEY) {
            Ok(()) => {
                tracing::info!("All drafts deleted");
                true
            }
            Err(e) => {
                tracing::error!("Failed to delete drafts: {}", e);
                false
            }
        }
    }

    pub fn get_draft_count(&self) -> usize {
        self.get_all_drafts().len()
    }
}
