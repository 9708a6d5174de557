#![deny(warnings)]

//! Headless CLI for pricing building upgrades against a city snapshot.

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use plan_core::{Catalog, CitySnapshot, PlanRequest, UpgradeQueue};
use plan_engine::{available_at, evaluate, shortfall_transfer, DiscountVector};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

const DEFAULT_CATALOG: &str = "assets/catalog.json";
const DEFAULT_CITY: &str = "assets/city.json";

struct Args {
    catalog: Option<String>,
    city: Option<String>,
    building: Option<String>,
    target: Option<u16>,
    queue: Option<String>,
    now_ms: Option<i64>,
    source: Option<String>,
    list: bool,
    version: bool,
    help: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        catalog: None,
        city: None,
        building: None,
        target: None,
        queue: None,
        now_ms: None,
        source: None,
        list: false,
        version: false,
        help: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--catalog" => args.catalog = it.next(),
            "--city" => args.city = it.next(),
            "--building" => args.building = it.next(),
            "--target" => args.target = it.next().and_then(|s| s.parse().ok()),
            "--queue" => args.queue = it.next(),
            "--now-ms" => args.now_ms = it.next().and_then(|s| s.parse().ok()),
            "--source" => args.source = it.next(),
            "--list" => args.list = true,
            "--version" => args.version = true,
            "--help" | "-h" => args.help = true,
            _ => {}
        }
    }
    args
}

fn print_usage() {
    println!("upgrade cost planner");
    println!();
    println!("Usage: cli [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --building <id>    building to upgrade (range mode)");
    println!("  --target <level>   target level for --building");
    println!("  --queue <path>     price a queue of upgrades from a JSON file");
    println!("  --catalog <path>   cost catalog (default {DEFAULT_CATALOG})");
    println!("  --city <path>      city snapshot (default {DEFAULT_CITY})");
    println!("  --now-ms <ms>      evaluation time, epoch milliseconds (default: now)");
    println!("  --source <city>    suggest shipping missing resources from this city");
    println!("  --list             show catalog and city overview");
    println!("  --version          print build info");
}

fn load_catalog(path: &str) -> Result<Catalog> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    Ok(Catalog::from_json_str(&text)?)
}

fn load_city(path: &str) -> Result<CitySnapshot> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    Ok(CitySnapshot::from_json_str(&text)?)
}

fn load_queue(path: &str) -> Result<UpgradeQueue> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing queue {path}"))
}

fn build_request(args: &Args) -> Result<PlanRequest> {
    if let Some(path) = args.queue.as_deref() {
        return Ok(PlanRequest::Queue(load_queue(path)?));
    }
    let building = args
        .building
        .as_deref()
        .context("pass --building <id> with --target <level>, or --queue <path>, or --list")?;
    let target = args.target.context("missing --target <level>")?;
    Ok(PlanRequest::range(building, target))
}

fn print_overview(catalog: &Catalog, city: &CitySnapshot, now_ms: i64) {
    println!("catalog buildings:");
    for b in catalog.buildings() {
        println!(
            "  {:<12} {:<20} max level {:<3} city level {}",
            b.building_id,
            b.display_name,
            b.max_level(),
            city.building_level(&b.building_id)
        );
    }
    println!("discounts: {}", DiscountVector::for_city(city));
    println!(
        "city {} projected stock: {}",
        city.city_id,
        available_at(city, now_ms)
    );
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args();
    if args.help {
        print_usage();
        return Ok(());
    }
    if args.version {
        println!(
            "upgrade-planner {} ({}, {})",
            env!("CARGO_PKG_VERSION"),
            env!("GIT_SHA"),
            env!("BUILD_DATE")
        );
        return Ok(());
    }

    let catalog_path = args.catalog.as_deref().unwrap_or(DEFAULT_CATALOG);
    let city_path = args.city.as_deref().unwrap_or(DEFAULT_CITY);
    let catalog = load_catalog(catalog_path)?;
    let city = load_city(city_path)?;
    let now_ms = args.now_ms.unwrap_or_else(|| Utc::now().timestamp_millis());
    info!(buildings = catalog.len(), city = %city.city_id, now_ms, "inputs loaded");

    if args.list {
        print_overview(&catalog, &city, now_ms);
        return Ok(());
    }

    let request = build_request(&args)?;
    println!("discounts: {}", DiscountVector::for_city(&city));
    let result = evaluate(&catalog, &city, &request, now_ms);
    println!("{result}");
    if let Some(eta_ms) = result.eta_ms() {
        if let Some(eta) = Utc.timestamp_millis_opt(eta_ms).single() {
            println!("covered by production at ~{}", eta.format("%Y-%m-%d %H:%M UTC"));
        }
    }
    if let Some(source) = args.source.as_deref() {
        match shortfall_transfer(&result, source) {
            Some(t) => println!("ship from {}: {}", t.source_city, t.resources),
            None => println!("nothing to ship from {source}"),
        }
    }

    Ok(())
}
