pub mod criteria;
pub mod pipeline;
pub mod facets;

pub use criteria::{FilterCriteria, SortKey, StopFilter};
pub use facets::FilterFacets;
pub use pipeline::apply;

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Unknown stop filter: {0}")]
    UnknownStopFilter(String),
}
