pub mod orchestrator;
pub mod form;
pub mod modal;
pub mod view;

use skyfare_core::{CoreError, SourceError};

pub use form::{Field, SearchForm, SubmitHandler, SubmitOutcome};
pub use modal::{ControlId, DetailModal, Key, KeyPress, ModalControl, ModalEvent, PageContext};
pub use orchestrator::{SearchOrchestrator, SearchState};
pub use view::{DisplayOptions, FlightCardView, FlightDetailView, PageView};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Search handler failed: {0}")]
    Handler(String),
}
