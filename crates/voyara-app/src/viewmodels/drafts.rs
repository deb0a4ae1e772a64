// SPDX-License-Identifier: AGPL-3.0
// Voyara App - Drafts view-model
//
// Draft storage is local and synchronous, so no tasks are spawned here.

use crate::state::{StateHolder, UiState};
use crate::validation::TripForm;
use std::sync::Arc;
use voyara_core::{DraftStore, TripDraft};

pub struct DraftsViewModel {
    drafts: Arc<DraftStore>,
    state: StateHolder<Vec<TripDraft>>,
}

impl DraftsViewModel {
    pub fn new(drafts: Arc<DraftStore>) -> Self {
        Self {
            drafts,
            state: StateHolder::new(),
        }
    }

    /// Newest first
    pub fn state(&self) -> &StateHolder<Vec<TripDraft>> {
        &self.state
    }

    pub fn load(&self) {
        self.state.set(UiState::Success(self.drafts.get_all_drafts()));
    }

    /// Save the form as a draft and return the draft id
    pub fn save(&self, form: &TripForm, existing_id: Option<&str>) -> Option<String> {
        let draft = form.to_draft(existing_id);
        let id = draft.id.clone();
        if !self.drafts.save_draft(draft) {
            self.state.set(UiState::Error("Failed to save draft".to_string()));
            return None;
        }
        self.load();
        Some(id)
    }

    /// Form contents for editing a stored draft
    pub fn open(&self, id: &str) -> Option<TripForm> {
        self.drafts.get_draft_by_id(id).map(|d| TripForm::from_draft(&d))
    }

    pub fn delete(&self, id: &str) -> bool {
        let removed = self.drafts.delete_draft(id);
        self.load();
        removed
    }

    pub fn delete_all(&self) -> bool {
        let cleared = self.drafts.delete_all_drafts();
        self.load();
        cleared
    }

    pub fn count(&self) -> usize {
        self.drafts.get_draft_count()
    }
}
