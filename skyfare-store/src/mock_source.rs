use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as Span, FixedOffset, NaiveTime, Offset, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skyfare_core::{Flight, FlightSearchResponse, FlightSource, SearchQuery, SourceError};

const AIRLINES: [&str; 4] = ["Turkish Airlines", "Pegasus Airlines", "SunExpress", "AnadoluJet"];
const AIRCRAFT: [&str; 4] = ["A320", "B737", "A321", "B738"];
const POLICIES: [&str; 4] = ["Refundable", "Non-refundable", "Changeable", "Partially refundable"];
const BAGGAGE: [&str; 3] = ["15 kg", "20 kg", "30 kg"];
const STOPOVERS: [&str; 3] = ["ESB (1h 10m)", "SAW (55m)", "AYT (1h 30m)"];

const STOP_SURCHARGE: f64 = 200.0;

/// Synthetic flight generator with simulated latency and random failures.
pub struct MockFlightSource {
    rng: Mutex<StdRng>,
    failure_rate: f64,
    min_latency: Duration,
    max_latency: Duration,
    /// Zone the 06:00 to 23:45 departure window is laid out in.
    offset: FixedOffset,
}

impl MockFlightSource {
    pub fn new(seed: Option<u64>, failure_rate: f64, min_latency: Duration, max_latency: Duration) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // NaN survives clamp and makes gen_bool panic.
        let failure_rate = if failure_rate.is_finite() { failure_rate.clamp(0.0, 1.0) } else { 0.0 };

        Self {
            rng: Mutex::new(rng),
            failure_rate,
            min_latency: min_latency.min(max_latency),
            max_latency: max_latency.max(min_latency),
            offset: Utc.fix(),
        }
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sample_latency(&self) -> Duration {
        if self.min_latency == self.max_latency {
            return self.min_latency;
        }
        self.rng().gen_range(self.min_latency..=self.max_latency)
    }

    fn roll(&self, query: &SearchQuery) -> Result<Vec<Flight>, SourceError> {
        let mut rng = self.rng();
        if rng.gen_bool(self.failure_rate) {
            return Err(SourceError::Unavailable("simulated upstream failure".to_string()));
        }
        Ok(generate_flights(&mut *rng, query, self.offset))
    }
}

#[async_trait]
impl FlightSource for MockFlightSource {
    async fn fetch(&self, query: &SearchQuery) -> Result<serde_json::Value, SourceError> {
        let latency = self.sample_latency();
        tokio::time::sleep(latency).await;

        let flights = self.roll(query)?;
        tracing::debug!("Generated {} mock flights after {:?}", flights.len(), latency);

        Ok(serde_json::to_value(FlightSearchResponse { flights })?)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Generate 5 to 8 flights on the query's route and day, cheapest first.
/// Departure clock times are local to `offset`.
pub fn generate_flights<R: Rng + ?Sized>(rng: &mut R, query: &SearchQuery, offset: FixedOffset) -> Vec<Flight> {
    let count = rng.gen_range(5..=8);
    let mut flights: Vec<Flight> = (0..count).map(|_| generate_flight(rng, query, offset)).collect();
    flights.sort_by(|a, b| a.price.total_cmp(&b.price));
    flights
}

fn generate_flight<R: Rng + ?Sized>(rng: &mut R, query: &SearchQuery, offset: FixedOffset) -> Flight {
    let airline = AIRLINES[rng.gen_range(0..AIRLINES.len())];
    let stops = if rng.gen_bool(0.3) { 1 } else { 0 };
    let base_price = 800.0 + rng.gen::<f64>() * 1500.0;

    let hour = rng.gen_range(6..=23);
    let minute = rng.gen_range(0..4) * 15;
    let local = query
        .date
        .and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN));
    let departure = (local - Span::seconds(offset.local_minus_utc().into())).and_utc();

    let flight_hours = rng.gen_range(1..=3);
    let flight_minutes = rng.gen_range(0..4) * 15;
    let arrival = departure + Span::hours(flight_hours) + Span::minutes(flight_minutes);

    let prefix: String = airline.chars().take(2).collect::<String>().to_uppercase();

    Flight {
        id: format!("FL{}", rng.gen_range(1000..=9999)),
        airline: airline.to_string(),
        flight_number: format!("{}{}", prefix, rng.gen_range(100..=999)),
        price: (base_price + stops as f64 * STOP_SURCHARGE).round(),
        currency: "TRY".to_string(),
        departure,
        arrival,
        origin: query.origin.clone(),
        destination: query.destination.clone(),
        stops,
        aircraft: AIRCRAFT[rng.gen_range(0..AIRCRAFT.len())].to_string(),
        policy: POLICIES[rng.gen_range(0..POLICIES.len())].to_string(),
        baggage: Some(BAGGAGE[rng.gen_range(0..BAGGAGE.len())].to_string()),
        available_seats: Some(rng.gen_range(1..=60)),
        duration: Some(format!("{}h {}m", flight_hours, flight_minutes)),
        stopover: (stops > 0).then(|| STOPOVERS[rng.gen_range(0..STOPOVERS.len())].to_string()),
        cabin_class: Some("Economy".to_string()),
    }
}
