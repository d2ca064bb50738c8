//! View-models for the search screen. Everything here is a pure function of
//! data; rendering adapters only print what these produce.

use chrono::{FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use skyfare_core::format::{self, format_duration, format_price};
use skyfare_core::Flight;
use skyfare_filter::{FilterCriteria, FilterFacets, SortKey};

use crate::orchestrator::{SearchOrchestrator, SearchState};

pub const NO_RESULTS: &str = "No flights found for this route and date.";
pub const NO_FILTER_MATCHES: &str = "No flights match the selected filters.";

#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    pub offset: FixedOffset,
    /// Reference day for "days until departure".
    pub today: NaiveDate,
}

impl DisplayOptions {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            today: Utc::now().with_timezone(&offset).date_naive(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyTone {
    Refundable,
    Changeable,
    Restricted,
}

impl PolicyTone {
    pub fn of(policy: &str) -> Self {
        let policy = policy.trim().to_lowercase();
        match policy.as_str() {
            "refundable" => PolicyTone::Refundable,
            "changeable" => PolicyTone::Changeable,
            _ => PolicyTone::Restricted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightCardView {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub aircraft: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub departure_date: String,
    pub route: String,
    pub duration: String,
    pub stops: String,
    pub price: String,
    pub policy: String,
    pub policy_tone: PolicyTone,
    pub baggage: Option<String>,
    pub seats: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightDetailView {
    pub card: FlightCardView,
    pub departure: String,
    pub arrival: String,
    pub origin: String,
    pub destination: String,
    pub stopover: Option<String>,
    pub cabin_class: Option<String>,
    pub days_until_departure: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterPanelView {
    pub sort_options: Vec<SortOption>,
    pub stops: String,
    /// `"all"` followed by every carrier in the result set.
    pub airlines: Vec<String>,
    pub selected_airline: String,
    pub min_price: f64,
    pub max_price: f64,
    pub price_ceiling: Option<f64>,
    pub price_ceiling_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PageView {
    Idle,
    Loading,
    Results {
        count: usize,
        total: usize,
        cards: Vec<FlightCardView>,
        filters: Option<FilterPanelView>,
        notice: Option<String>,
    },
    Empty {
        message: String,
    },
    Error {
        message: String,
    },
}

pub fn card(flight: &Flight, options: &DisplayOptions) -> FlightCardView {
    let duration = flight
        .elapsed()
        .map(format_duration)
        .or_else(|| flight.duration.clone())
        .unwrap_or_else(|| "-".to_string());

    FlightCardView {
        id: flight.id.clone(),
        airline: flight.airline.clone(),
        flight_number: flight.flight_number.clone(),
        aircraft: flight.aircraft.clone(),
        departure_time: format::format_time(flight.departure, options.offset),
        arrival_time: format::format_time(flight.arrival, options.offset),
        departure_date: format::format_date(flight.departure, options.offset),
        route: format!("{} → {}", flight.origin, flight.destination),
        duration,
        stops: format::stops_label(flight.stops),
        price: format_price(flight.price, &flight.currency),
        policy: flight.policy.clone(),
        policy_tone: PolicyTone::of(&flight.policy),
        baggage: flight.baggage.clone(),
        seats: flight.available_seats.map(|n| format!("{} seats", n)),
    }
}

pub fn detail(flight: &Flight, options: &DisplayOptions) -> FlightDetailView {
    let departure_day = flight.departure.with_timezone(&options.offset).date_naive();

    FlightDetailView {
        card: card(flight, options),
        departure: format::format_long_date(flight.departure, options.offset),
        arrival: format::format_long_date(flight.arrival, options.offset),
        origin: flight.origin.clone(),
        destination: flight.destination.clone(),
        stopover: flight.stopover.clone(),
        cabin_class: flight.cabin_class.clone(),
        days_until_departure: format::days_until(departure_day, options.today),
    }
}

pub fn filter_panel(facets: &FilterFacets, criteria: &FilterCriteria, currency: &str) -> FilterPanelView {
    let sort_options = SortKey::ALL
        .into_iter()
        .map(|key| SortOption {
            value: key.as_str(),
            label: key.label(),
            selected: key == criteria.sort,
        })
        .collect();

    let mut airlines = vec!["all".to_string()];
    airlines.extend(facets.airlines.iter().cloned());

    let price_ceiling_label = match criteria.max_price {
        Some(max) => format_price(max, currency),
        None => "-".to_string(),
    };

    FilterPanelView {
        sort_options,
        stops: criteria.stops.to_string(),
        airlines,
        selected_airline: criteria.airline.clone().unwrap_or_else(|| "all".to_string()),
        min_price: facets.min_price,
        max_price: facets.max_price,
        price_ceiling: criteria.max_price,
        price_ceiling_label,
    }
}

/// Snapshot the whole search screen.
pub fn page(orchestrator: &SearchOrchestrator, options: &DisplayOptions) -> PageView {
    match orchestrator.state() {
        SearchState::Idle => PageView::Idle,
        SearchState::Loading => PageView::Loading,
        SearchState::Empty => PageView::Empty {
            message: NO_RESULTS.to_string(),
        },
        SearchState::Error(message) => PageView::Error {
            message: message.clone(),
        },
        SearchState::Results => {
            let displayed = orchestrator.displayed();
            let currency = orchestrator
                .matched()
                .first()
                .map(|f| f.currency.as_str())
                .unwrap_or("TRY");

            PageView::Results {
                count: displayed.len(),
                total: orchestrator.matched().len(),
                cards: displayed.iter().map(|f| card(f, options)).collect(),
                filters: orchestrator
                    .facets()
                    .map(|facets| filter_panel(facets, orchestrator.criteria(), currency)),
                notice: displayed.is_empty().then(|| NO_FILTER_MATCHES.to_string()),
            }
        }
    }
}
