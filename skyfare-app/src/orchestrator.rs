use std::sync::Arc;

use async_trait::async_trait;
use skyfare_core::{Flight, FlightSearchResponse, FlightSource, SearchQuery};
use skyfare_filter::{FilterCriteria, FilterFacets};
use skyfare_store::FlightStore;
use tokio::sync::watch;
use uuid::Uuid;

use crate::form::SubmitHandler;
use crate::AppError;

pub const LOAD_FAILED: &str = "Flights could not be loaded. Please try again.";

/// Where the search screen currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Loading,
    Results,
    /// The source answered, but nothing flies this route on this day.
    Empty,
    Error(String),
}

/// Owns the search screen state: runs a search against the flight source,
/// narrows the payload to the query, and keeps the displayed list in step
/// with the filter criteria.
pub struct SearchOrchestrator {
    source: Arc<dyn FlightSource>,
    store: FlightStore,
    criteria: FilterCriteria,
    /// Configured price ceiling; each new result set starts at or below it.
    price_cap: Option<f64>,
    facets: Option<FilterFacets>,
    query: Option<SearchQuery>,
    search_id: Option<Uuid>,
    state: SearchState,
    state_tx: watch::Sender<SearchState>,
}

impl SearchOrchestrator {
    /// `criteria` are the starting filters. Their price ceiling, if any, stays
    /// the cap for every later search.
    pub fn new(source: Arc<dyn FlightSource>, criteria: FilterCriteria) -> Self {
        let (state_tx, _) = watch::channel(SearchState::Idle);
        Self {
            source,
            store: FlightStore::new(),
            price_cap: criteria.max_price,
            criteria,
            facets: None,
            query: None,
            search_id: None,
            state: SearchState::Idle,
            state_tx,
        }
    }

    /// Receive every state transition, including `Loading`.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn facets(&self) -> Option<&FilterFacets> {
        self.facets.as_ref()
    }

    pub fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    pub fn search_id(&self) -> Option<Uuid> {
        self.search_id
    }

    /// Flights on screen, filtered and sorted.
    pub fn displayed(&self) -> &[Flight] {
        self.store.displayed()
    }

    /// Route/date matches of the latest search, before filtering.
    pub fn matched(&self) -> &[Flight] {
        self.store.fetched()
    }

    pub fn flight(&self, id: &str) -> Option<&Flight> {
        self.store.find(id)
    }

    fn transition(&mut self, next: SearchState) {
        self.state = next.clone();
        self.state_tx.send_replace(next);
    }

    /// Run a search. Failures never escape: they land in
    /// [`SearchState::Error`] with the previous results cleared.
    pub async fn search(&mut self, query: SearchQuery) -> &SearchState {
        let search_id = Uuid::new_v4();
        self.search_id = Some(search_id);
        self.transition(SearchState::Loading);

        tracing::info!(
            "[{}] Searching {} -> {} on {} via {} source",
            search_id,
            query.origin,
            query.destination,
            query.date,
            self.source.name()
        );

        let outcome = self.load(&query).await;
        self.query = Some(query);

        match outcome {
            Ok(flights) if flights.is_empty() => {
                tracing::info!("[{}] No flights match the route and date", search_id);
                self.store.clear();
                self.facets = None;
                self.transition(SearchState::Empty);
            }
            Ok(flights) => {
                if let Some(facets) = FilterFacets::from_flights(&flights) {
                    self.criteria = facets.reconcile(&self.criteria, self.price_cap);
                    self.facets = Some(facets);
                }
                self.store.replace(flights);
                let shown = self.store.refresh(&self.criteria).len();
                tracing::info!(
                    "[{}] {} flights matched, {} shown",
                    search_id,
                    self.store.fetched().len(),
                    shown
                );
                self.transition(SearchState::Results);
            }
            Err(err) => {
                tracing::warn!("[{}] Flight search failed: {}", search_id, err);
                self.store.clear();
                self.facets = None;
                self.transition(SearchState::Error(LOAD_FAILED.to_string()));
            }
        }

        &self.state
    }

    async fn load(&self, query: &SearchQuery) -> Result<Vec<Flight>, AppError> {
        let payload = self.source.fetch(query).await?;
        let response = FlightSearchResponse::from_payload(payload)?;

        Ok(response
            .flights
            .into_iter()
            .filter(|flight| query.matches(flight))
            .collect())
    }

    /// Apply new filter criteria. Only a Results screen is re-filtered; in
    /// any other state the criteria are stored for the next search.
    pub fn update_criteria(&mut self, criteria: FilterCriteria) -> &[Flight] {
        self.criteria = criteria;

        if self.state == SearchState::Results {
            let shown = self.store.refresh(&self.criteria).len();
            tracing::debug!(
                "Filters changed ({}, {}), {} of {} flights shown",
                self.criteria.sort,
                self.criteria.stops,
                shown,
                self.store.fetched().len()
            );
        }

        self.store.displayed()
    }
}

#[async_trait]
impl SubmitHandler for SearchOrchestrator {
    async fn on_submit(&mut self, query: SearchQuery) -> Result<(), AppError> {
        self.search(query).await;
        Ok(())
    }
}
