mod cli;
mod render;

use std::io::{self, Write};

use anyhow::{bail, Context};
use clap::Parser;
use skyfare_app::modal::ControlId;
use skyfare_app::{view, DetailModal, DisplayOptions, Field, PageContext, SearchForm, SearchOrchestrator, SearchState, SubmitOutcome};
use skyfare_core::TripType;
use skyfare_store::app_config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command, SearchArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyfare=info,skyfare_app=info,skyfare_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load_from(&cli.config_dir)
        .with_context(|| format!("Failed to load config from {}", cli.config_dir))?;

    match cli.command {
        Command::Search(args) => search(config, args).await,
    }
}

async fn search(config: Config, args: SearchArgs) -> anyhow::Result<()> {
    let source = skyfare_store::build_source(&config);
    tracing::info!("Using {} flight source", source.name());

    let options = DisplayOptions::new(config.display.offset());
    let mut orchestrator = SearchOrchestrator::new(source, config.filters.criteria());

    let mut rx = orchestrator.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            if *rx.borrow_and_update() == SearchState::Loading {
                eprintln!("Searching flights...");
            }
        }
    });

    let mut form = SearchForm::new();
    form.set(Field::Origin, &args.origin);
    form.set(Field::Destination, &args.destination);
    form.set(Field::Date, &args.date);
    if let Some(return_date) = &args.return_date {
        form.set_trip_type(TripType::RoundTrip);
        form.set(Field::ReturnDate, return_date);
    }
    if let Some(passengers) = args.passengers {
        form.set_passengers(passengers);
    }

    match form.submit(&mut orchestrator, options.today).await {
        SubmitOutcome::Submitted => {}
        SubmitOutcome::Invalid | SubmitOutcome::Failed => {
            for error in form.errors() {
                eprintln!("error: {}", error);
            }
            bail!("search was not submitted");
        }
    }

    let mut criteria = orchestrator.criteria().clone();
    if let Some(sort) = args.sort {
        criteria = criteria.with_sort(sort);
    }
    if let Some(stops) = args.stops {
        criteria = criteria.with_stops(stops);
    }
    if let Some(airline) = &args.airline {
        criteria = criteria.with_airline(airline);
    }
    if args.max_price.is_some() {
        criteria = criteria.with_max_price(args.max_price);
    }
    orchestrator.update_criteria(criteria);

    let page = view::page(&orchestrator, &options);
    let mut out = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &page)?;
        writeln!(out)?;
    } else {
        render::page(&mut out, &page)?;
    }

    if let Some(id) = &args.detail {
        let flight = orchestrator
            .flight(id)
            .cloned()
            .with_context(|| format!("No flight {} in the current results", id))?;

        let mut screen = PageContext::default();
        let mut modal = DetailModal::new();
        modal.open(flight, ControlId::new(format!("details-{}", id)), &mut screen);

        if let Some(flight) = modal.flight() {
            let detail = view::detail(flight, &options);
            writeln!(out)?;
            if args.json {
                serde_json::to_writer_pretty(&mut out, &detail)?;
                writeln!(out)?;
            } else {
                render::detail(&mut out, &detail)?;
            }
        }
        modal.close(&mut screen);
    }

    Ok(())
}
