use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;

use show_map::apis::kopis::KopisClient;
use show_map::apis::naver_geocode::NaverGeocoder;
use show_map::app::discovery_use_case::DiscoveryUseCase;
use show_map::app::venue_use_case::VenueUseCase;
use show_map::common::constants::{label_for, CATEGORIES, DEFAULT_CATEGORY_CODE, REGIONS};
use show_map::config::Config;
use show_map::infra::http_client::ReqwestHttp;
use show_map::logging;
use show_map::pipeline::venue::VenueResolver;
use show_map::{DateInterval, QueryFilter, SortDirection};

#[derive(Parser)]
#[command(name = "show_map")]
#[command(about = "Browse KOPIS performances and locate their venues")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List performances running in a date window
    List {
        /// Genre code (GGGA musical, AAAA theatre, CCCA classical, CCCD popular); empty for all
        #[arg(long, default_value = DEFAULT_CATEGORY_CODE)]
        category: String,
        /// Region code (11 Seoul, 41 Gyeonggi, 26 Busan, ...); empty for all
        #[arg(long, default_value = "")]
        region: String,
        /// Title search text
        #[arg(long, default_value = "")]
        search: String,
        /// First day of the window (YYYY-MM-DD), defaults to today
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day of the window (YYYY-MM-DD), at most 7 days after --from
        #[arg(long)]
        to: Option<NaiveDate>,
        /// ASC or DESC by start date
        #[arg(long, default_value = "ASC")]
        sort: SortDirection,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
    },
    /// Show one performance and resolve its venue
    Detail {
        /// Registry performance id (mt20id)
        id: String,
    },
}

fn build_filter(
    category: String,
    region: String,
    search: String,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    sort: SortDirection,
) -> QueryFilter {
    let today = Local::now().date_naive();
    let mut filter = QueryFilter::default_window(from.unwrap_or(today));
    if let Some(to) = to {
        filter.interval = DateInterval::clamp_week(from.unwrap_or(today), to);
    }
    filter.category_code = category;
    filter.region_code = region;
    filter.search_text = search;
    filter.sort_direction = sort;
    filter
}

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;

    let http = Arc::new(ReqwestHttp::new());
    let registry = Arc::new(
        KopisClient::new(http.clone(), config.registry.api_key.clone())
            .with_base_url(config.registry.base_url.clone())
            .with_rows(config.registry.rows),
    );

    match cli.command {
        Commands::List { category, region, search, from, to, sort, page } => {
            let filter = build_filter(category, region, search, from, to, sort);
            info!(?filter, page, "Listing performances");

            let discovery = DiscoveryUseCase::new(registry).with_page_size(config.paging.page_size);
            let result = discovery.browse(&filter, page).await;

            println!(
                "🎭 {} / {} / {} ~ {}",
                label_for(CATEGORIES, &filter.category_code).unwrap_or(filter.category_code.as_str()),
                label_for(REGIONS, &filter.region_code).unwrap_or(filter.region_code.as_str()),
                filter.interval.start_param(),
                filter.interval.end_param(),
            );
            if result.items.is_empty() {
                println!("   No performances found");
            }
            for item in &result.items {
                println!(
                    "   [{}] {} | {} | {} ~ {}",
                    item.id, item.title, item.venue_name, item.start_date, item.end_date
                );
            }
            println!("   Next page: {}", if result.has_next { "yes" } else { "no" });
        }
        Commands::Detail { id } => {
            let resolver = match config.geocoder.credentials() {
                Some((client_id, secret)) => VenueResolver::new(Arc::new(
                    NaverGeocoder::new(http.clone(), client_id, secret)
                        .with_base_url(config.geocoder.base_url.clone()),
                )),
                None => VenueResolver::offline(),
            };
            let venues = VenueUseCase::new(registry, resolver);

            match venues.open_by_id(&id).await {
                Some(view) => {
                    println!("🎭 {}", view.listing.title);
                    println!("   Venue: {}", view.listing.venue_name);
                    println!("   Dates: {} ~ {}", view.listing.start_date, view.listing.end_date);
                    println!("   Genre: {}", view.listing.genre);
                    if let Some(detail) = &view.detail {
                        for link in &detail.ticketing_links {
                            println!("   Tickets: {} {}", link.name, link.url);
                        }
                    }
                    println!("📍 {}", view.venue.display_address);
                    match (view.venue.coordinate, view.venue.map_url()) {
                        (Some(point), Some(url)) => {
                            println!("   {:.6}, {:.6}", point.latitude, point.longitude);
                            println!("   {}", url);
                        }
                        _ => println!("   Map unavailable"),
                    }
                }
                None => println!("⚠️  No performance found for {}", id),
            }
        }
    }
    Ok(())
}
