//! FoodVerse CLI - catalog and cart tools.
//!
//! # Usage
//!
//! ```bash
//! # Query the live menu
//! fv-cli catalog query --term rice --sort price-low
//!
//! # Query a saved product payload
//! fv-cli catalog query --file products.json --filter fruits --sort rating
//!
//! # List the known categories
//! fv-cli catalog categories
//!
//! # Total a list of cart adds
//! fv-cli cart total --file adds.json
//! ```
//!
//! # Commands
//!
//! - `catalog query` - Filter and sort products
//! - `catalog categories` - List categories
//! - `cart total` - Build a cart from a file and print its summary

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fv-cli")]
#[command(author, version, about = "FoodVerse CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Cart calculations
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Filter and sort products
    Query(QueryArgs),
    /// List the known categories
    Categories,
}

#[derive(Args)]
struct QueryArgs {
    /// Read products from a JSON payload instead of the product API
    #[arg(short, long, conflicts_with = "category")]
    file: Option<PathBuf>,

    /// Upstream category to fetch (defaults to `PRODUCT_CATEGORY`)
    #[arg(short, long)]
    category: Option<String>,

    /// Text matched against title and description
    #[arg(short, long, default_value = "")]
    term: String,

    /// Category filter (`all` for none)
    #[arg(long, default_value = "all")]
    filter: String,

    /// Sort key (`featured`, `price-low`, `price-high`, `rating`, `newest`)
    #[arg(short, long, default_value = "featured")]
    sort: String,
}

#[derive(Subcommand)]
enum CartAction {
    /// Build a cart from a JSON list of `{product, quantity}` adds
    Total {
        /// Path to the adds file
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load .env so PRODUCT_API_URL and RUST_LOG apply to every command
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Query(args) => {
                let source = match args.file {
                    Some(path) => commands::catalog::Source::File(path),
                    None => commands::catalog::Source::Api(args.category),
                };
                commands::catalog::query(source, &args.term, &args.filter, &args.sort).await?;
            }
            CatalogAction::Categories => commands::catalog::categories(),
        },
        Commands::Cart { action } => match action {
            CartAction::Total { file } => commands::cart::total(&file)?,
        },
    }
    Ok(())
}
