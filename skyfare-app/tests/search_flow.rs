use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate};
use serde_json::json;
use skyfare_app::view::{self, NO_FILTER_MATCHES, NO_RESULTS};
use skyfare_app::{
    ControlId, DetailModal, DisplayOptions, Field, Key, KeyPress, ModalEvent, PageContext, PageView, SearchForm,
    SearchOrchestrator, SearchState, SubmitOutcome,
};
use skyfare_core::{FlightSource, SearchInput, SearchQuery, SourceError};
use skyfare_filter::{FilterCriteria, SortKey, StopFilter};
use skyfare_store::{MockFlightSource, StaticFlightSource};
use tokio::sync::Notify;

const BUNDLED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../mock-data/flights.json");

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
}

fn options() -> DisplayOptions {
    DisplayOptions {
        offset: FixedOffset::east_opt(3 * 3600).unwrap(),
        today: today(),
    }
}

fn orchestrator() -> SearchOrchestrator {
    let source = Arc::new(StaticFlightSource::new(BUNDLED, Duration::ZERO));
    SearchOrchestrator::new(source, FilterCriteria::default())
}

fn form(origin: &str, destination: &str, date: &str) -> SearchForm {
    let mut form = SearchForm::new();
    form.set(Field::Origin, origin);
    form.set(Field::Destination, destination);
    form.set(Field::Date, date);
    form
}

fn card_ids(page: &PageView) -> Vec<String> {
    match page {
        PageView::Results { cards, .. } => cards.iter().map(|c| c.id.clone()).collect(),
        other => panic!("expected results, got {:?}", other),
    }
}

/// Holds every fetch until the test releases it.
struct GatedSource {
    gate: Notify,
}

#[async_trait]
impl FlightSource for GatedSource {
    async fn fetch(&self, _query: &SearchQuery) -> Result<serde_json::Value, SourceError> {
        self.gate.notified().await;
        Ok(json!({ "flights": [] }))
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

#[tokio::test]
async fn test_form_to_results_against_bundled_data() {
    let mut orchestrator = orchestrator();
    let mut form = form("IST", "ADB", "2026-11-02");

    assert_eq!(form.submit(&mut orchestrator, today()).await, SubmitOutcome::Submitted);
    assert_eq!(orchestrator.state(), &SearchState::Results);

    let page = view::page(&orchestrator, &options());
    assert_eq!(card_ids(&page), vec!["PC2240", "PC2210", "XQ7104", "AJ4120", "TK2310", "TK2324"]);

    let PageView::Results { filters: Some(filters), cards, notice, .. } = page else {
        panic!("expected a filter panel");
    };
    assert_eq!(notice, None);
    assert_eq!(filters.airlines, vec!["all", "AnadoluJet", "Pegasus Airlines", "SunExpress", "Turkish Airlines"]);
    assert_eq!(filters.min_price, 760.0);
    assert_eq!(filters.max_price, 1890.0);
    assert_eq!(cards[0].price, "760 ₺");
    assert_eq!(cards[0].departure_time, "22:55");
}

#[tokio::test]
async fn test_filter_changes_after_search() {
    let mut orchestrator = orchestrator();
    form("IST", "ADB", "2026-11-02").submit(&mut orchestrator, today()).await;

    let criteria = orchestrator
        .criteria()
        .clone()
        .with_stops(StopFilter::Direct)
        .with_sort(SortKey::PriceDesc)
        .with_max_price(Some(1300.0));
    orchestrator.update_criteria(criteria);

    let page = view::page(&orchestrator, &options());
    assert_eq!(card_ids(&page), vec!["TK2310", "XQ7104", "PC2210", "PC2240"]);

    let criteria = orchestrator.criteria().clone().with_max_price(Some(500.0));
    orchestrator.update_criteria(criteria);
    match view::page(&orchestrator, &options()) {
        PageView::Results { count, total, notice, .. } => {
            assert_eq!(count, 0);
            assert_eq!(total, 6);
            assert_eq!(notice.as_deref(), Some(NO_FILTER_MATCHES));
        }
        other => panic!("expected results, got {:?}", other),
    }
}

#[tokio::test]
async fn test_configured_ceiling_limits_bundled_results() {
    let source = Arc::new(StaticFlightSource::new(BUNDLED, Duration::ZERO));
    let mut orchestrator = SearchOrchestrator::new(source, FilterCriteria::default().with_max_price(Some(1000.0)));
    form("IST", "ADB", "2026-11-02").submit(&mut orchestrator, today()).await;

    assert_eq!(orchestrator.criteria().max_price, Some(1000.0));
    let page = view::page(&orchestrator, &options());
    assert_eq!(card_ids(&page), vec!["PC2240", "PC2210", "XQ7104"]);
}

#[tokio::test]
async fn test_generated_cards_are_dated_on_searched_day() {
    for seed in 0..20 {
        let source = MockFlightSource::new(Some(seed), 0.0, Duration::ZERO, Duration::ZERO).with_offset(options().offset);
        let mut orchestrator = SearchOrchestrator::new(Arc::new(source), FilterCriteria::default());
        form("IST", "ADB", "2026-11-02").submit(&mut orchestrator, today()).await;

        let PageView::Results { cards, .. } = view::page(&orchestrator, &options()) else {
            panic!("seed {} produced no results", seed);
        };
        for card in cards {
            assert_eq!(card.departure_date, "02.11.2026", "seed {} card {}", seed, card.id);
            assert!(card.departure_time.as_str() >= "06:00", "seed {} card {}", seed, card.id);
        }
    }
}

#[tokio::test]
async fn test_unserved_route_is_empty() {
    let mut orchestrator = orchestrator();
    form("ESB", "TZX", "2026-11-02").submit(&mut orchestrator, today()).await;

    assert_eq!(
        view::page(&orchestrator, &options()),
        PageView::Empty {
            message: NO_RESULTS.to_string()
        }
    );
}

#[tokio::test]
async fn test_invalid_form_never_reaches_source() {
    let mut orchestrator = orchestrator();
    let mut form = form("IST", "ist", "2026-11-02");

    assert_eq!(form.submit(&mut orchestrator, today()).await, SubmitOutcome::Invalid);
    assert_eq!(orchestrator.state(), &SearchState::Idle);
    assert_eq!(view::page(&orchestrator, &options()), PageView::Idle);
}

#[tokio::test]
async fn test_missing_document_is_an_error() {
    let source = Arc::new(StaticFlightSource::new("/nonexistent/flights.json", Duration::ZERO));
    let mut orchestrator = SearchOrchestrator::new(source, FilterCriteria::default());
    let query = SearchInput::new("IST", "ADB", "2026-11-02").normalize().unwrap();

    orchestrator.search(query).await;
    assert!(matches!(view::page(&orchestrator, &options()), PageView::Error { .. }));
}

#[tokio::test]
async fn test_loading_is_observable_while_fetch_is_pending() {
    let source = Arc::new(GatedSource { gate: Notify::new() });
    let mut orchestrator = SearchOrchestrator::new(source.clone(), FilterCriteria::default());
    let mut rx = orchestrator.subscribe();
    let query = SearchInput::new("IST", "ADB", "2026-11-02").normalize().unwrap();

    let observer = async {
        rx.changed().await.unwrap();
        let seen = rx.borrow_and_update().clone();
        source.gate.notify_one();
        seen
    };

    let (state, seen) = tokio::join!(async { orchestrator.search(query).await.clone() }, observer);
    assert_eq!(seen, SearchState::Loading);
    assert_eq!(state, SearchState::Empty);
}

#[tokio::test]
async fn test_detail_dialog_from_results() {
    let mut orchestrator = orchestrator();
    form("IST", "ADB", "2026-11-02").submit(&mut orchestrator, today()).await;

    let flight = orchestrator.flight("AJ4120").cloned().unwrap();
    let detail = view::detail(&flight, &options());
    assert_eq!(detail.card.stops, "1 stop");
    assert_eq!(detail.days_until_departure, 18);

    let mut page = PageContext::default();
    let mut modal = DetailModal::new();
    modal.open(flight, ControlId::new("details-AJ4120"), &mut page);
    assert!(page.scroll_locked);

    modal.handle_key(KeyPress::shifted(Key::Tab), &mut page);
    assert_eq!(
        modal.handle_key(KeyPress::new(Key::Enter), &mut page),
        ModalEvent::BookingRequested("AJ4120".to_string())
    );
    assert_eq!(modal.handle_key(KeyPress::new(Key::Escape), &mut page), ModalEvent::Closed);
    assert_eq!(page.focused, Some(ControlId::new("details-AJ4120")));
    assert!(!page.scroll_locked);
}
