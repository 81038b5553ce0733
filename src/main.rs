mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, SearchArgs, ServicesArgs};
use nestfinder::config::Config;
use nestfinder::geo::{FixedPosition, GoogleGeocoder, NoGeocoder, ReverseGeocoder};
use nestfinder::models::{Coordinate, GenderPreference, PropertyType, ServiceCategory, SharingOption};
use nestfinder::search::{
    find_services, parse_filter, FilterSet, LocateOutcome, PriceRange, RankedListing,
    SearchController, ServiceQuery, SortSpec,
};
use nestfinder::sources::{load_services, JsonFileStore, ListingStore, SupabaseStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Search(args) => run_search(&config, args).await,
        Commands::Services(args) => run_services(&config, args).await,
    }
}

fn http_client(config: &Config) -> Result<Client> {
    Client::builder()
        .timeout(config.http_timeout.max(Duration::from_secs(1)))
        .user_agent(concat!("nestfinder/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}

fn parse_near(near: Option<&str>) -> Result<Option<Coordinate>> {
    near.map(|text| text.parse::<Coordinate>())
        .transpose()
        .context("Invalid --near value")
}

fn filter_set(args: &SearchArgs) -> Result<FilterSet> {
    Ok(FilterSet {
        property_type: parse_filter::<PropertyType>(&args.property_type)?,
        price_range: parse_filter::<PriceRange>(&args.price)?,
        gender_preference: parse_filter::<GenderPreference>(&args.gender)?,
        city: parse_filter::<String>(&args.city)?,
        sharing_option: parse_filter::<SharingOption>(&args.sharing)?,
    })
}

async fn run_search(config: &Config, args: SearchArgs) -> Result<()> {
    let filters = filter_set(&args)?;
    let origin = parse_near(args.near.as_deref())?;
    let sort: SortSpec = args.sort.parse()?;

    let client = http_client(config)?;

    let store: Arc<dyn ListingStore> = if args.supabase {
        let (url, key) = config
            .supabase()
            .context("--supabase needs SUPABASE_URL and SUPABASE_KEY")?;
        Arc::new(SupabaseStore::new(client.clone(), url, key))
    } else {
        let path = args.listings.clone().unwrap_or_else(|| config.listings_path.clone());
        Arc::new(JsonFileStore::new(path))
    };

    let geocoder: Arc<dyn ReverseGeocoder> = match &config.geocode_api_key {
        Some(key) => Arc::new(GoogleGeocoder::with_endpoint(
            client,
            config.geocode_endpoint.clone(),
            key.clone(),
        )),
        None => {
            info!("GEOCODE_API_KEY not set, locality captions disabled");
            Arc::new(NoGeocoder)
        }
    };

    let mut controller = SearchController::new(store, geocoder).with_sort(Some(sort));
    controller.load().await;

    if let Some(origin) = origin {
        match controller.use_my_location(&FixedPosition(origin)).await {
            LocateOutcome::Applied => {}
            LocateOutcome::Failed(e) => anyhow::bail!(e),
            LocateOutcome::Stale => warn!("Location result superseded"),
        }
    }

    // explicit filters still narrow a nearest-first view
    let session = controller.session_mut();
    session.set_term(args.query.clone());
    session.set_filters(filters);

    let session = controller.session();
    let results = session.results();
    let summary = session.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if let Some(label) = session.label() {
        println!("Results for \"{}\"", label);
    }
    println!(
        "{} properties found ({} available, {} featured)\n",
        summary.total, summary.available, summary.featured
    );

    for (i, ranked) in results.iter().enumerate() {
        print_listing(i + 1, ranked);
    }

    Ok(())
}

fn print_listing(position: usize, ranked: &RankedListing<'_>) {
    let listing = ranked.listing;
    println!("{}. {} ({} / month)", position, listing.title, listing.rent_amount);
    println!("   {} in {}, {}", listing.property_type, listing.address, listing.city);
    println!(
        "   For: {}   Status: {}",
        listing.gender_preference, listing.availability_status
    );
    if !listing.sharing_options.is_empty() {
        let sharing: Vec<&str> = listing.sharing_options.iter().map(|s| s.as_str()).collect();
        println!("   Sharing: {}", sharing.join(", "));
    }
    if !listing.nearby_colleges.is_empty() {
        println!("   Near: {}", listing.nearby_colleges.join(", "));
    }
    if let Some(km) = ranked.distance_km {
        println!("   Distance: {:.1} km", km);
    }
    println!("   ID: {}", listing.id);
    println!();
}

async fn run_services(config: &Config, args: ServicesArgs) -> Result<()> {
    let path = args.services.clone().unwrap_or_else(|| config.services_path.clone());
    let services = load_services(&path)
        .await
        .with_context(|| format!("Failed to load services from {}", path.display()))?;

    let query = ServiceQuery {
        city: args.city.clone(),
        category: args
            .category
            .as_deref()
            .map(str::parse::<ServiceCategory>)
            .transpose()?,
        search: args.query.clone(),
        origin: parse_near(args.near.as_deref())?,
        max_distance_km: args.max_distance,
        page: args.page,
        limit: args.limit,
    };

    let page = find_services(&services, &query);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    println!(
        "{} services found (page {} of {})\n",
        page.total, page.current_page, page.pages
    );

    for (i, ranked) in page.services.iter().enumerate() {
        let service = ranked.service;
        let verified = if service.verified { " [verified]" } else { "" };
        println!("{}. {}{} ({})", i + 1, service.name, verified, service.category);
        println!("   {}, {}", service.address, service.city);
        println!("   Rating: {:.1}", service.rating);
        if let Some(km) = ranked.distance_km {
            println!("   Distance: {:.1} km", km);
        }
        println!();
    }

    Ok(())
}
