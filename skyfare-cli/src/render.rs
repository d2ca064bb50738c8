//! Plain-text terminal output for page and detail views.

use std::io::{self, Write};

use skyfare_app::view::{FilterPanelView, PolicyTone};
use skyfare_app::{FlightCardView, FlightDetailView, PageView};

pub fn page(out: &mut impl Write, page: &PageView) -> io::Result<()> {
    match page {
        PageView::Idle => writeln!(out, "Enter a route and date to search."),
        PageView::Loading => writeln!(out, "Searching flights..."),
        PageView::Empty { message } | PageView::Error { message } => writeln!(out, "{}", message),
        PageView::Results {
            count,
            total,
            cards,
            filters,
            notice,
        } => {
            writeln!(out, "{} of {} flights", count, total)?;
            if let Some(filters) = filters {
                filter_summary(out, filters)?;
            }
            writeln!(out)?;

            for card in cards {
                flight_card(out, card)?;
            }
            if let Some(notice) = notice {
                writeln!(out, "{}", notice)?;
            }
            Ok(())
        }
    }
}

fn filter_summary(out: &mut impl Write, filters: &FilterPanelView) -> io::Result<()> {
    let sort = filters
        .sort_options
        .iter()
        .find(|option| option.selected)
        .map(|option| option.label)
        .unwrap_or("-");

    writeln!(
        out,
        "Sort: {} | Stops: {} | Airline: {} | Max price: {}",
        sort, filters.stops, filters.selected_airline, filters.price_ceiling_label
    )
}

fn flight_card(out: &mut impl Write, card: &FlightCardView) -> io::Result<()> {
    writeln!(
        out,
        "[{}] {} {}  {} - {}  {}  {}  {}",
        card.id,
        card.airline,
        card.flight_number,
        card.departure_time,
        card.arrival_time,
        card.route,
        card.duration,
        card.stops
    )?;
    writeln!(out, "      {}  {}{}", card.price, card.policy, tone_marker(card.policy_tone))
}

fn tone_marker(tone: PolicyTone) -> &'static str {
    match tone {
        PolicyTone::Refundable => " (+)",
        PolicyTone::Changeable => " (~)",
        PolicyTone::Restricted => "",
    }
}

pub fn detail(out: &mut impl Write, detail: &FlightDetailView) -> io::Result<()> {
    let card = &detail.card;

    writeln!(out, "{} {} ({})", card.airline, card.flight_number, card.aircraft)?;
    writeln!(out, "  Departure: {} from {}", detail.departure, detail.origin)?;
    writeln!(out, "  Arrival:   {} at {}", detail.arrival, detail.destination)?;
    writeln!(out, "  Duration:  {} ({})", card.duration, card.stops)?;
    if let Some(stopover) = &detail.stopover {
        writeln!(out, "  Stopover:  {}", stopover)?;
    }
    if let Some(baggage) = &card.baggage {
        writeln!(out, "  Baggage:   {}", baggage)?;
    }
    if let Some(seats) = &card.seats {
        writeln!(out, "  Seats:     {}", seats)?;
    }
    if let Some(cabin) = &detail.cabin_class {
        writeln!(out, "  Class:     {}", cabin)?;
    }
    writeln!(out, "  Policy:    {}", card.policy)?;
    writeln!(out, "  Departs in {} days", detail.days_until_departure)?;
    writeln!(out, "  Total:     {}", card.price)
}
