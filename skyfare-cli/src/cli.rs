use clap::{Args, Parser, Subcommand};
use skyfare_filter::{SortKey, StopFilter};

#[derive(Parser)]
#[command(name = "skyfare")]
#[command(about = "Search, filter and inspect flights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding default.toml and its overlays
    #[arg(long, default_value = "config", global = true)]
    pub config_dir: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search flights on one route and day
    Search(SearchArgs),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Origin airport code or name fragment
    #[arg(long = "from")]
    pub origin: String,

    /// Destination airport code or name fragment
    #[arg(long = "to")]
    pub destination: String,

    /// Departure day, YYYY-MM-DD
    #[arg(long)]
    pub date: String,

    /// Makes the search a round trip
    #[arg(long)]
    pub return_date: Option<String>,

    #[arg(long)]
    pub passengers: Option<u32>,

    /// price-asc, price-desc, departure-asc, departure-desc or duration-asc
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// all, direct or with-stops
    #[arg(long)]
    pub stops: Option<StopFilter>,

    /// Carrier name, or "all"
    #[arg(long)]
    pub airline: Option<String>,

    #[arg(long)]
    pub max_price: Option<f64>,

    /// Open the detail view for this flight id
    #[arg(long)]
    pub detail: Option<String>,

    /// Print the page as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
