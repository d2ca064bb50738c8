use std::cmp::Ordering;

use chrono::Duration;
use skyfare_core::Flight;

use crate::criteria::{FilterCriteria, SortKey};

/// Filter `flights` by `criteria`, then order the survivors by its sort key.
/// The input is never modified and ties keep their input order.
pub fn apply(flights: &[Flight], criteria: &FilterCriteria) -> Vec<Flight> {
    let mut selected: Vec<Flight> = flights
        .iter()
        .filter(|flight| criteria.admits(flight))
        .cloned()
        .collect();

    sort(&mut selected, criteria.sort);
    selected
}

/// Stable in-place sort by `key`.
pub fn sort(flights: &mut [Flight], key: SortKey) {
    match key {
        SortKey::PriceAsc => flights.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => flights.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::DepartureAsc => flights.sort_by_key(|f| f.departure),
        SortKey::DepartureDesc => flights.sort_by(|a, b| b.departure.cmp(&a.departure)),
        SortKey::DurationAsc => flights.sort_by(|a, b| compare_elapsed(a.elapsed(), b.elapsed())),
    }
}

// Flights without a usable duration go after every timed flight.
fn compare_elapsed(a: Option<Duration>, b: Option<Duration>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
