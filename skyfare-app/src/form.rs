use async_trait::async_trait;
use chrono::NaiveDate;
use skyfare_core::validator;
use skyfare_core::{SearchInput, SearchQuery, TripType};

use crate::AppError;

pub const SUBMIT_FAILED: &str = "Something went wrong. Please try again.";

/// Receives normalized queries from a [`SearchForm`].
#[async_trait]
pub trait SubmitHandler: Send {
    async fn on_submit(&mut self, query: SearchQuery) -> Result<(), AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Origin,
    Destination,
    Date,
    ReturnDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; errors are listed on the form.
    Invalid,
    Submitted,
    /// The handler failed; the form shows one generic message.
    Failed,
}

/// Search form state: the typed values and the error list shown under them.
#[derive(Debug, Default)]
pub struct SearchForm {
    input: SearchInput,
    errors: Vec<String>,
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: SearchInput) -> Self {
        Self {
            input,
            errors: Vec::new(),
        }
    }

    /// Typing into any field dismisses the current errors.
    pub fn set(&mut self, field: Field, value: &str) {
        let value = value.to_string();
        match field {
            Field::Origin => self.input.origin = value,
            Field::Destination => self.input.destination = value,
            Field::Date => self.input.date = value,
            Field::ReturnDate => self.input.return_date = Some(value),
        }
        self.errors.clear();
    }

    pub fn set_trip_type(&mut self, trip_type: TripType) {
        self.input.trip_type = Some(trip_type);
        self.errors.clear();
    }

    pub fn set_passengers(&mut self, passengers: u32) {
        self.input.passengers = Some(passengers);
    }

    pub fn input(&self) -> &SearchInput {
        &self.input
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn reset(&mut self) {
        self.input = SearchInput::default();
        self.errors.clear();
    }

    /// Validate against `today` and hand the normalized query to `handler`.
    /// Form and handler stay borrowed until the handler settles, so a second
    /// submit cannot start meanwhile.
    pub async fn submit<H>(&mut self, handler: &mut H, today: NaiveDate) -> SubmitOutcome
    where
        H: SubmitHandler + ?Sized,
    {
        self.errors.clear();

        let result = validator::validate(&self.input, today);
        if !result.valid {
            self.errors = result.errors;
            return SubmitOutcome::Invalid;
        }

        let query = match self.input.normalize() {
            Ok(query) => query,
            Err(err) => {
                self.errors = vec![err.to_string()];
                return SubmitOutcome::Invalid;
            }
        };

        match handler.on_submit(query).await {
            Ok(()) => SubmitOutcome::Submitted,
            Err(err) => {
                tracing::warn!("Search submission failed: {}", err);
                self.errors = vec![SUBMIT_FAILED.to_string()];
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyfare_core::validator::{ORIGIN_TOO_SHORT, SAME_AIRPORTS};

    #[derive(Default)]
    struct Recorder {
        received: Vec<SearchQuery>,
        fail: bool,
    }

    #[async_trait]
    impl SubmitHandler for Recorder {
        async fn on_submit(&mut self, query: SearchQuery) -> Result<(), AppError> {
            self.received.push(query);
            if self.fail {
                return Err(AppError::Handler("backend down".to_string()));
            }
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn filled(origin: &str, destination: &str) -> SearchForm {
        let mut form = SearchForm::new();
        form.set(Field::Origin, origin);
        form.set(Field::Destination, destination);
        form.set(Field::Date, "2026-11-02");
        form
    }

    #[tokio::test]
    async fn test_valid_submit_forwards_normalized_query() {
        let mut form = filled(" IST ", "ADB");
        let mut handler = Recorder::default();

        assert_eq!(form.submit(&mut handler, today()).await, SubmitOutcome::Submitted);
        assert!(form.errors().is_empty());
        assert_eq!(handler.received.len(), 1);
        assert_eq!(handler.received[0].origin, "IST");
    }

    #[tokio::test]
    async fn test_invalid_submit_lists_errors_and_skips_handler() {
        let mut form = filled("IS", "ADB");
        let mut handler = Recorder::default();

        assert_eq!(form.submit(&mut handler, today()).await, SubmitOutcome::Invalid);
        assert_eq!(form.errors(), &[ORIGIN_TOO_SHORT.to_string()]);
        assert!(handler.received.is_empty());
    }

    #[tokio::test]
    async fn test_errors_are_replaced_not_appended() {
        let mut form = filled("IS", "ADB");
        let mut handler = Recorder::default();
        form.submit(&mut handler, today()).await;

        form.input.origin = "ADB".to_string();
        form.submit(&mut handler, today()).await;
        assert_eq!(form.errors(), &[SAME_AIRPORTS.to_string()]);
    }

    #[tokio::test]
    async fn test_editing_clears_errors() {
        let mut form = filled("IS", "ADB");
        let mut handler = Recorder::default();
        form.submit(&mut handler, today()).await;
        assert!(!form.errors().is_empty());

        form.set(Field::Origin, "IST");
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn test_failing_handler_shows_generic_message() {
        let mut form = filled("IST", "ADB");
        let mut handler = Recorder {
            fail: true,
            ..Default::default()
        };

        assert_eq!(form.submit(&mut handler, today()).await, SubmitOutcome::Failed);
        assert_eq!(form.errors(), &[SUBMIT_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn test_round_trip_carries_return_date() {
        let mut form = filled("IST", "ADB");
        form.set_trip_type(TripType::RoundTrip);
        form.set(Field::ReturnDate, "2026-11-09");
        form.set_passengers(2);
        let mut handler = Recorder::default();

        assert_eq!(form.submit(&mut handler, today()).await, SubmitOutcome::Submitted);
        let query = &handler.received[0];
        assert_eq!(query.return_date, NaiveDate::from_ymd_opt(2026, 11, 9));
        assert_eq!(query.passengers, Some(2));
    }

    #[test]
    fn test_reset() {
        let mut form = filled("IST", "ADB");
        form.reset();
        assert!(form.input().origin.is_empty());
    }
}
