mod show;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use deliverymap_data::Dataset;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "deliverymap-cli")]
#[command(about = "Restaurant delivery network explorer")]
struct Cli {
    /// Orders export (overrides DELIVERYMAP_ORDERS_PATH)
    #[arg(long, global = true)]
    orders: Option<PathBuf>,

    /// Restaurants export (overrides DELIVERYMAP_RESTAURANTS_PATH)
    #[arg(long, global = true)]
    restaurants: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List zones that have at least one order
    Zones,
    /// List restaurants with orders in a zone
    Restaurants {
        #[arg(long)]
        zone: String,
    },
    /// Show the delivery network and daily trend for one restaurant
    Show {
        #[arg(long)]
        zone: String,
        #[arg(long)]
        restaurant: String,
        /// Print the report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Print row counts for the loaded exports
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let mut config = deliverymap_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("no command given; run `deliverymap-cli --help` for usage");
        return Ok(());
    };

    if let Some(path) = cli.orders {
        config.orders_path = path;
    }
    if let Some(path) = cli.restaurants {
        config.restaurants_path = path;
    }
    let dataset = Dataset::load_shared(&config)?;
    tracing::debug!(?command, env = %config.env, "running command");

    match command {
        Commands::Zones => print_list(
            &dataset.zones(),
            "no zones found; is the orders export empty?",
        ),
        Commands::Restaurants { zone } => print_list(
            &dataset.restaurants_in_zone(&zone),
            &format!("no restaurants with orders in zone '{zone}'"),
        ),
        Commands::Show {
            zone,
            restaurant,
            json,
        } => show::run_show(&dataset, zone, restaurant, json)?,
        Commands::Stats => {
            let stats = dataset.stats();
            println!("orders:      {}", stats.orders);
            println!("restaurants: {}", stats.restaurants);
            println!("joined:      {}", stats.joined);
        }
    }

    Ok(())
}

fn print_list(items: &[String], empty_message: &str) {
    if items.is_empty() {
        eprintln!("{empty_message}");
        return;
    }
    for item in items {
        println!("{item}");
    }
}

#[cfg(test)]
mod tests;
