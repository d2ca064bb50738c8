use std::sync::LazyLock;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

static DURATION_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)h\s*(\d+)m").expect("duration pattern is valid"));

fn default_currency() -> String {
    "TRY".to_string()
}

/// A single bookable itinerary as delivered by a flight source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    #[serde(alias = "departureAirport")]
    pub origin: String,
    #[serde(alias = "arrivalAirport")]
    pub destination: String,
    pub stops: u32,
    pub aircraft: String,
    pub policy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baggage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_seats: Option<u32>,
    /// Free-text duration such as `"1h 40m"`, present in the static data set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopover: Option<String>,
    #[serde(default, rename = "class", skip_serializing_if = "Option::is_none")]
    pub cabin_class: Option<String>,
}

impl Flight {
    pub fn is_direct(&self) -> bool {
        self.stops == 0
    }

    /// Calendar day of departure, in UTC.
    pub fn departure_date(&self) -> NaiveDate {
        self.departure.date_naive()
    }

    /// Time in the air. Falls back to the free-text duration when the
    /// instants do not describe a positive span. Flights decoded through
    /// [`FlightSearchResponse::from_payload`](crate::FlightSearchResponse::from_payload)
    /// have already passed [`check`](Self::check), so the fallback only
    /// applies to records assembled in code.
    pub fn elapsed(&self) -> Option<Duration> {
        let span = self.arrival - self.departure;
        if span > Duration::zero() {
            return Some(span);
        }
        self.duration.as_deref().and_then(parse_duration)
    }

    /// Enforce the record invariants: non-negative finite price and
    /// departure strictly before arrival.
    pub fn check(&self) -> CoreResult<()> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CoreError::InvalidFlight {
                id: self.id.clone(),
                reason: format!("price must be a non-negative amount, got {}", self.price),
            });
        }
        if self.departure >= self.arrival {
            return Err(CoreError::InvalidFlight {
                id: self.id.clone(),
                reason: "departure must be before arrival".to_string(),
            });
        }
        Ok(())
    }
}

/// Parse an `XhYm` duration string. Returns `None` when the text does not
/// contain both an hour and a minute component.
pub fn parse_duration(text: &str) -> Option<Duration> {
    let caps = DURATION_TEXT.captures(text)?;
    let hours: i64 = caps.get(1)?.as_str().parse().ok()?;
    let minutes: i64 = caps.get(2)?.as_str().parse().ok()?;
    Some(Duration::minutes(hours * 60 + minutes))
}
