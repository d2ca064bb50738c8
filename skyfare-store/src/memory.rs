use skyfare_core::Flight;
use skyfare_filter::{pipeline, FilterCriteria};

/// Holds the result set of the latest search and the subset currently on
/// screen. A new search replaces both wholesale.
#[derive(Debug, Default)]
pub struct FlightStore {
    fetched: Vec<Flight>,
    displayed: Vec<Flight>,
}

impl FlightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the fetched set. The displayed subset is emptied until the
    /// next [`refresh`](Self::refresh).
    pub fn replace(&mut self, flights: Vec<Flight>) {
        self.fetched = flights;
        self.displayed.clear();
    }

    /// Re-run the pipeline over the fetched set.
    pub fn refresh(&mut self, criteria: &FilterCriteria) -> &[Flight] {
        self.displayed = pipeline::apply(&self.fetched, criteria);
        &self.displayed
    }

    pub fn clear(&mut self) {
        self.fetched.clear();
        self.displayed.clear();
    }

    pub fn fetched(&self) -> &[Flight] {
        &self.fetched
    }

    pub fn displayed(&self) -> &[Flight] {
        &self.displayed
    }

    pub fn find(&self, id: &str) -> Option<&Flight> {
        self.fetched.iter().find(|f| f.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.fetched.is_empty()
    }
}
