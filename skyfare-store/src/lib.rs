pub mod app_config;
pub mod json_source;
pub mod mock_source;
pub mod memory;

use std::sync::Arc;
use std::time::Duration;

use skyfare_core::FlightSource;

pub use json_source::StaticFlightSource;
pub use memory::FlightStore;
pub use mock_source::MockFlightSource;

/// Build the flight source selected in configuration. Generated flights are
/// laid out in the display offset.
pub fn build_source(config: &app_config::Config) -> Arc<dyn FlightSource> {
    let source = &config.source;
    match source.kind {
        app_config::SourceKind::Static => Arc::new(StaticFlightSource::new(
            source.flights_path.clone(),
            Duration::from_millis(source.delay_ms),
        )),
        app_config::SourceKind::Mock => Arc::new(
            MockFlightSource::new(
                source.seed,
                source.failure_rate,
                Duration::from_millis(source.min_latency_ms),
                Duration::from_millis(source.max_latency_ms),
            )
            .with_offset(config.display.offset()),
        ),
    }
}
