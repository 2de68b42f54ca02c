use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MSG_SUCCESS: &str = "Thành công";
pub const MSG_INCOMPLETE: &str = "Thiếu thông tin";

/// Completeness at or above which an extraction counts as successful.
pub const SUCCESS_THRESHOLD: f32 = 0.75;

/// The structured result for one receipt image.
///
/// Missing fields are empty strings (or `0` for the total) rather than
/// `Option`s: absence is an expected outcome and is scored by `completeness`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedReceipt {
    pub store_name: String,
    /// Always `dd/mm/yyyy` when non-empty.
    pub date: String,
    /// Whole currency units; `0` when not found.
    pub total_amount: i64,
    pub address: String,
    /// Fraction of the four fields above that were populated (k/4).
    pub completeness: f32,
    pub success: bool,
    pub message: String,
}

impl ExtractedReceipt {
    /// Build a record from extracted fields, deriving completeness, success and message.
    pub fn from_fields(store_name: String, date: String, total_amount: i64, address: String) -> Self {
        let found = [
            !store_name.is_empty(),
            !date.is_empty(),
            total_amount > 0,
            !address.is_empty(),
        ]
        .iter()
        .filter(|f| **f)
        .count();
        let completeness = found as f32 / 4.0;
        let success = completeness >= SUCCESS_THRESHOLD;
        let message = if success { MSG_SUCCESS } else { MSG_INCOMPLETE };

        Self {
            store_name,
            date,
            total_amount,
            address,
            completeness,
            success,
            message: message.to_string(),
        }
    }

    /// Terminal record for an image that could not be processed at all.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            store_name: String::new(),
            date: String::new(),
            total_amount: 0,
            address: String::new(),
            completeness: 0.0,
            success: false,
            message: message.into(),
        }
    }

    /// Calendar view of `date`; `None` when empty or not a real day (e.g. `31/02/2020`).
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%d/%m/%Y").ok()
    }
}
