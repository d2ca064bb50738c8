use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use skyfare_core::Flight;

use crate::FilterError;

/// Stop-count class selected in the filter panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopFilter {
    #[default]
    All,
    Direct,
    WithStops,
}

impl StopFilter {
    pub fn admits(&self, stops: u32) -> bool {
        match self {
            StopFilter::All => true,
            StopFilter::Direct => stops == 0,
            StopFilter::WithStops => stops > 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StopFilter::All => "all",
            StopFilter::Direct => "direct",
            StopFilter::WithStops => "with-stops",
        }
    }
}

impl FromStr for StopFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StopFilter::All),
            "direct" => Ok(StopFilter::Direct),
            "with-stops" => Ok(StopFilter::WithStops),
            other => Err(FilterError::UnknownStopFilter(other.to_string())),
        }
    }
}

impl fmt::Display for StopFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    PriceAsc,
    PriceDesc,
    DepartureAsc,
    DepartureDesc,
    DurationAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::DepartureAsc,
        SortKey::DepartureDesc,
        SortKey::DurationAsc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::DepartureAsc => "departure-asc",
            SortKey::DepartureDesc => "departure-desc",
            SortKey::DurationAsc => "duration-asc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::PriceAsc => "Price (low to high)",
            SortKey::PriceDesc => "Price (high to low)",
            SortKey::DepartureAsc => "Departure (earliest first)",
            SortKey::DepartureDesc => "Departure (latest first)",
            SortKey::DurationAsc => "Duration (shortest first)",
        }
    }
}

impl FromStr for SortKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| FilterError::UnknownSortKey(s.to_string()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-selected constraints applied to a fetched result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub stops: StopFilter,
    /// `None` means every carrier.
    pub airline: Option<String>,
    /// `None` means no ceiling.
    pub max_price: Option<f64>,
    pub sort: SortKey,
}

impl FilterCriteria {
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_stops(mut self, stops: StopFilter) -> Self {
        self.stops = stops;
        self
    }

    /// Accepts `"all"` as the explicit no-filter token.
    pub fn with_airline(mut self, airline: &str) -> Self {
        self.airline = match airline {
            "" | "all" => None,
            name => Some(name.to_string()),
        };
        self
    }

    pub fn with_max_price(mut self, max_price: Option<f64>) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn admits(&self, flight: &Flight) -> bool {
        self.stops.admits(flight.stops)
            && self.airline.as_ref().is_none_or(|name| &flight.airline == name)
            && self.max_price.is_none_or(|max| flight.price <= max)
    }
}
