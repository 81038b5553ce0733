use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "nestfinder",
    about = "Search student housing listings and nearby services",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter listings and optionally rank them by distance
    Search(SearchArgs),

    /// Find local services (mess, laundry, gym, ...) around a point
    Services(ServicesArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    /// JSON file holding the listing array (defaults to NESTFINDER_LISTINGS)
    #[arg(long)]
    pub listings: Option<PathBuf>,

    /// Read listings from Supabase (SUPABASE_URL / SUPABASE_KEY)
    #[arg(long, conflicts_with = "listings")]
    pub supabase: bool,

    /// Free text matched against title, city, address and colleges
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// pg, hostel, room, flat, apartment or all
    #[arg(long = "type", default_value = "all")]
    pub property_type: String,

    /// Rent bounds as "min-max" or "min-"
    #[arg(long, default_value = "all")]
    pub price: String,

    /// male, female, coed or all
    #[arg(long, default_value = "all")]
    pub gender: String,

    /// Exact city name
    #[arg(long, default_value = "all")]
    pub city: String,

    /// single, double, triple or all
    #[arg(long, default_value = "all")]
    pub sharing: String,

    /// Rank by distance from "lat,lon"
    #[arg(long)]
    pub near: Option<String>,

    /// Store order, e.g. "-created_date" or "rent_amount"
    #[arg(long, default_value = "-created_date")]
    pub sort: String,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ServicesArgs {
    /// JSON file holding the service array (defaults to NESTFINDER_SERVICES)
    #[arg(long)]
    pub services: Option<PathBuf>,

    /// Substring of the city name
    #[arg(long)]
    pub city: Option<String>,

    /// mess_tiffin, laundry, medical, gym, daily_needs or cafe
    #[arg(long)]
    pub category: Option<String>,

    /// Free text matched against name, description and specialties
    #[arg(short, long)]
    pub query: Option<String>,

    /// Rank by distance from "lat,lon"
    #[arg(long)]
    pub near: Option<String>,

    /// Drop services farther than this many km (with --near)
    #[arg(long, default_value_t = 5.0)]
    pub max_distance: f64,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}
