// SPDX-License-Identifier: AGPL-3.0
// Voyara Core - Date helpers
//
// Forms speak DD/MM/YYYY, the trips API speaks YYYY-MM-DD.

use chrono::{DateTime, Utc};

/// Convert `DD/MM/YYYY` to `YYYY-MM-DD`.
///
/// Anything that is not exactly three slash-separated parts is returned
/// unchanged; the server gets the final say on validity.
pub fn format_date_for_api(date: &str) -> String {
    let parts: Vec<&str> = date.split('/').collect();
    match parts.as_slice() {
        [day, month, year] => format!("{}-{:0>2}-{:0>2}", year, month, day),
        _ => date.to_string(),
    }
}

/// Render a date picker selection (UTC epoch millis) as `DD/MM/YYYY`
pub fn format_picker_date(epoch_millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(epoch_millis).map(|dt| dt.format("%d/%m/%Y").to_string())
}
