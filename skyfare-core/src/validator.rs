use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::search::{parse_date, SearchInput};

pub const ORIGIN_TOO_SHORT: &str = "Origin airport must be at least 3 characters";
pub const DESTINATION_TOO_SHORT: &str = "Destination airport must be at least 3 characters";
pub const SAME_AIRPORTS: &str = "Origin and destination airports cannot be the same";
pub const DATE_MISSING: &str = "A travel date must be selected";
pub const DATE_INVALID: &str = "Travel date must be a valid date (YYYY-MM-DD)";
pub const DATE_IN_PAST: &str = "Travel date cannot be in the past";
pub const RETURN_DATE_MISSING: &str = "A return date must be selected for a round trip";
pub const RETURN_BEFORE_DEPARTURE: &str = "Return date cannot be before the departure date";

const MIN_AIRPORT_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check a search input against `today`. Every violation is collected, in
/// field order.
pub fn validate(input: &SearchInput, today: NaiveDate) -> ValidationResult {
    let mut errors = Vec::new();

    let origin = input.origin.trim();
    let destination = input.destination.trim();

    if origin.chars().count() < MIN_AIRPORT_LEN {
        errors.push(ORIGIN_TOO_SHORT.to_string());
    }
    if destination.chars().count() < MIN_AIRPORT_LEN {
        errors.push(DESTINATION_TOO_SHORT.to_string());
    }
    if !origin.is_empty() && !destination.is_empty() && origin.to_lowercase() == destination.to_lowercase() {
        errors.push(SAME_AIRPORTS.to_string());
    }

    let departure = if input.date.trim().is_empty() {
        errors.push(DATE_MISSING.to_string());
        None
    } else {
        match parse_date(&input.date) {
            Some(date) if date < today => {
                errors.push(DATE_IN_PAST.to_string());
                Some(date)
            }
            Some(date) => Some(date),
            None => {
                errors.push(DATE_INVALID.to_string());
                None
            }
        }
    };

    if input.is_round_trip() {
        match input.return_date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            None => errors.push(RETURN_DATE_MISSING.to_string()),
            Some(text) => match parse_date(text) {
                Some(back) => {
                    if departure.is_some_and(|out| back < out) {
                        errors.push(RETURN_BEFORE_DEPARTURE.to_string());
                    }
                }
                None => errors.push(DATE_INVALID.to_string()),
            },
        }
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

/// Same as [`validate`], against the local calendar day.
pub fn validate_now(input: &SearchInput) -> ValidationResult {
    validate(input, Local::now().date_naive())
}
