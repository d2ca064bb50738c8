use std::collections::BTreeSet;

use serde::Serialize;
use skyfare_core::Flight;

use crate::criteria::FilterCriteria;

/// Choices the filter panel offers for the current result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterFacets {
    /// Distinct carriers, alphabetical.
    pub airlines: Vec<String>,
    pub min_price: f64,
    pub max_price: f64,
}

impl FilterFacets {
    /// `None` for an empty result set.
    pub fn from_flights(flights: &[Flight]) -> Option<Self> {
        if flights.is_empty() {
            return None;
        }

        let airlines: BTreeSet<&str> = flights.iter().map(|f| f.airline.as_str()).collect();
        let min_price = flights.iter().map(|f| f.price).fold(f64::INFINITY, f64::min);
        let max_price = flights.iter().map(|f| f.price).fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            airlines: airlines.into_iter().map(str::to_string).collect(),
            min_price,
            max_price,
        })
    }

    /// Adjust criteria after a new fetch: the price ceiling opens up to the
    /// most expensive flight, held at `cap` when one is configured, and a
    /// carrier selection survives only if that carrier is still offered.
    /// Sort and stop selection are kept.
    pub fn reconcile(&self, criteria: &FilterCriteria, cap: Option<f64>) -> FilterCriteria {
        let airline = criteria
            .airline
            .as_ref()
            .filter(|name| self.airlines.iter().any(|a| a == *name))
            .cloned();

        FilterCriteria {
            airline,
            max_price: Some(cap.map_or(self.max_price, |cap| cap.min(self.max_price))),
            ..criteria.clone()
        }
    }
}
