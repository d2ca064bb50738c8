use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::flight::Flight;
use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
}

/// Raw form values exactly as typed by the user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchInput {
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub trip_type: Option<TripType>,
    pub return_date: Option<String>,
    pub passengers: Option<u32>,
}

impl SearchInput {
    pub fn new(origin: &str, destination: &str, date: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            date: date.to_string(),
            ..Default::default()
        }
    }

    pub fn is_round_trip(&self) -> bool {
        self.trip_type == Some(TripType::RoundTrip)
    }

    /// Build the normalized query. Callers validate first; this only fails
    /// when a date does not parse.
    pub fn normalize(&self) -> CoreResult<SearchQuery> {
        let date = parse_date(&self.date)
            .ok_or_else(|| CoreError::ValidationError(format!("invalid date: {}", self.date)))?;

        let return_date = match (&self.return_date, self.is_round_trip()) {
            (Some(text), true) => Some(
                parse_date(text)
                    .ok_or_else(|| CoreError::ValidationError(format!("invalid return date: {}", text)))?,
            ),
            _ => None,
        };

        Ok(SearchQuery {
            origin: self.origin.trim().to_string(),
            destination: self.destination.trim().to_string(),
            date,
            trip_type: self.trip_type,
            return_date,
            passengers: self.passengers,
        })
    }
}

/// A validated search, ready to hand to a flight source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub trip_type: Option<TripType>,
    pub return_date: Option<NaiveDate>,
    pub passengers: Option<u32>,
}

impl SearchQuery {
    /// Route and date match used to narrow a raw payload: airport codes match
    /// as case-insensitive substrings, the departure day must be equal.
    pub fn matches(&self, flight: &Flight) -> bool {
        let origin = self.origin.to_lowercase();
        let destination = self.destination.to_lowercase();

        let origin_match = origin.is_empty() || flight.origin.to_lowercase().contains(&origin);
        let destination_match =
            destination.is_empty() || flight.destination.to_lowercase().contains(&destination);

        origin_match && destination_match && flight.departure_date() == self.date
    }
}

/// Envelope every flight source must produce.
#[derive(Debug, Serialize, Deserialize)]
pub struct FlightSearchResponse {
    pub flights: Vec<Flight>,
}

impl FlightSearchResponse {
    /// Decode and check a raw source payload. Anything other than a top-level
    /// object with a `flights` array of valid records is malformed.
    pub fn from_payload(payload: serde_json::Value) -> CoreResult<Self> {
        if !payload.get("flights").is_some_and(|f| f.is_array()) {
            return Err(CoreError::MalformedPayload("missing `flights` array".to_string()));
        }

        let response: FlightSearchResponse = serde_json::from_value(payload)
            .map_err(|e| CoreError::MalformedPayload(e.to_string()))?;

        for flight in &response.flights {
            flight.check()?;
        }

        Ok(response)
    }
}

/// Parse a `YYYY-MM-DD` form date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}
