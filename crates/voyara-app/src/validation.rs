// SPDX-License-Identifier: AGPL-3.0
// Voyara App - Form validation
//
// Every check runs before any network call. The first failing rule wins.

use once_cell::sync::Lazy;
use regex::Regex;
use voyara_core::{AppError, TripDraft};

static EMAIL_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .map_err(|e| tracing::error!("Email pattern failed to compile: {}", e))
        .ok()
});

pub const MIN_PASSWORD_LEN: usize = 8;

fn invalid(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

pub fn validate_login(email: &str, password: &str) -> Result<(), AppError> {
    if is_blank(email) || is_blank(password) {
        return Err(invalid("Fields cannot be empty"));
    }
    if !is_valid_email(email) {
        return Err(invalid("Invalid email format"));
    }
    Ok(())
}

pub fn validate_signup(full_name: &str, email: &str, password: &str) -> Result<(), AppError> {
    if is_blank(full_name) || is_blank(email) || is_blank(password) {
        return Err(invalid("All fields are required"));
    }
    if !is_valid_email(email) {
        return Err(invalid("Invalid email format"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(invalid("Password must be at least 8 characters"));
    }
    Ok(())
}

/// The create-trip form as typed by the user
#[derive(Debug, Clone, PartialEq)]
pub struct TripForm {
    pub name: String,
    pub destination: String,
    /// DD/MM/YYYY
    pub start_date: String,
    /// DD/MM/YYYY
    pub end_date: String,
    pub description: String,
    pub budget: String,
    pub number_of_travelers: String,
    pub trip_type: String,
    pub cover_photo_url: String,
}

impl Default for TripForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            destination: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
            budget: String::new(),
            number_of_travelers: "1".to_string(),
            trip_type: "Leisure".to_string(),
            cover_photo_url: String::new(),
        }
    }
}

impl TripForm {
    /// Restore a form from a saved draft
    pub fn from_draft(draft: &TripDraft) -> Self {
        Self {
            name: draft.name.clone(),
            destination: draft.destination.clone(),
            start_date: draft.start_date.clone(),
            end_date: draft.end_date.clone(),
            description: draft.description.clone(),
            budget: draft.budget.clone(),
            number_of_travelers: draft.number_of_travelers.clone(),
            trip_type: draft.selected_trip_type.clone(),
            cover_photo_url: draft.cover_photo_url.clone(),
        }
    }

    /// Submission checks. Saving as a draft skips these.
    pub fn validate(&self) -> Result<(), AppError> {
        if is_blank(&self.name) {
            return Err(invalid("Please enter a trip name"));
        }
        if is_blank(&self.destination) {
            return Err(invalid("Please enter a destination"));
        }
        if is_blank(&self.start_date) {
            return Err(invalid("Please select start date"));
        }
        if is_blank(&self.end_date) {
            return Err(invalid("Please select end date"));
        }
        if self.number_of_travelers.trim().parse::<i32>().is_err() {
            return Err(invalid("Please enter number of travelers"));
        }
        Ok(())
    }

    /// Budget as sent to the API; blank or non-numeric input is dropped
    pub fn budget_value(&self) -> Option<f64> {
        parse_budget(&self.budget)
    }

    pub fn cover_photo(&self) -> Option<String> {
        (!is_blank(&self.cover_photo_url)).then(|| self.cover_photo_url.clone())
    }

    /// Snapshot the form as a draft, keeping `existing_id` when re-saving
    pub fn to_draft(&self, existing_id: Option<&str>) -> TripDraft {
        let mut draft = match existing_id {
            Some(id) => TripDraft::with_id(
                id,
                &self.name,
                &self.start_date,
                &self.end_date,
                &self.description,
            ),
            None => TripDraft::new(
                &self.name,
                &self.start_date,
                &self.end_date,
                &self.description,
            ),
        };
        draft.destination = self.destination.clone();
        draft.budget = self.budget.clone();
        draft.number_of_travelers = self.number_of_travelers.clone();
        draft.selected_trip_type = self.trip_type.clone();
        draft.cover_photo_url = self.cover_photo_url.clone();
        draft
    }
}

pub(crate) fn parse_budget(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|b| b.is_finite())
}

/// Inputs of the "ask Vega" screen before they are turned into a request
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionForm {
    pub trip_id: String,
    pub city: String,
    pub country: String,
    pub day: String,
    pub time_slot: String,
    pub total_budget: String,
    pub remaining_budget: String,
    pub preferences: Vec<String>,
    pub adults: String,
    pub children: String,
}

impl Default for SuggestionForm {
    fn default() -> Self {
        Self {
            trip_id: String::new(),
            city: String::new(),
            country: String::new(),
            day: String::new(),
            time_slot: "Morning".to_string(),
            total_budget: String::new(),
            remaining_budget: String::new(),
            preferences: Vec::new(),
            adults: "1".to_string(),
            children: "0".to_string(),
        }
    }
}

/// Parsed and range-checked suggestion inputs
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionParams {
    pub trip_id: String,
    pub city: String,
    pub country: String,
    pub day: u32,
    pub time_slot: String,
    pub total_budget: f64,
    pub remaining_budget: f64,
    pub preferences: Vec<String>,
    pub adults: u32,
    pub children: u32,
}

impl SuggestionForm {
    pub fn validate(&self) -> Result<SuggestionParams, AppError> {
        let required = [
            &self.trip_id,
            &self.city,
            &self.country,
            &self.day,
            &self.total_budget,
            &self.remaining_budget,
        ];
        if required.iter().any(|field| is_blank(field)) {
            return Err(invalid("Please fill all required fields"));
        }

        let day = match self.day.trim().parse::<i64>() {
            Ok(day) if day > 0 => u32::try_from(day)
                .map_err(|_| invalid("Day must be a positive number"))?,
            _ => return Err(invalid("Day must be a positive number")),
        };
        let total_budget = match parse_budget(&self.total_budget) {
            Some(budget) if budget > 0.0 => budget,
            _ => return Err(invalid("Total budget must be a positive number")),
        };
        let remaining_budget = match parse_budget(&self.remaining_budget) {
            Some(budget) if budget >= 0.0 => budget,
            _ => return Err(invalid("Remaining budget must be a non-negative number")),
        };

        // Unparsable counts fall back to one adult and no children
        let adults = self.adults.trim().parse::<i64>().unwrap_or(1);
        if adults <= 0 {
            return Err(invalid("Number of adults must be at least 1"));
        }
        let children = self.children.trim().parse::<u32>().unwrap_or(0);

        Ok(SuggestionParams {
            trip_id: self.trip_id.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            day,
            time_slot: self.time_slot.clone(),
            total_budget,
            remaining_budget,
            preferences: self.preferences.clone(),
            adults: u32::try_from(adults).unwrap_or(u32::MAX),
            children,
        })
    }
}
