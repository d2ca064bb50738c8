pub mod flight;
pub mod search;
pub mod source;
pub mod validator;
pub mod format;

pub use flight::Flight;
pub use search::{FlightSearchResponse, SearchInput, SearchQuery, TripType};
pub use source::{FlightSource, SourceError};
pub use validator::ValidationResult;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    #[error("Invalid flight {id}: {reason}")]
    InvalidFlight { id: String, reason: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
