//! Pazar CLI - Price quotes and cart/order checks against fixtures.
//!
//! # Usage
//!
//! ```bash
//! # Quote a consumer price for a supplier price in a 1.1x region
//! pazar quote --supplier-price 100 --customer-type b2c --multiplier 1.1 --adjustment 5
//!
//! # Check a cart against another region, then apply the changes
//! pazar cart-region --catalog catalog.yaml --cart cart.yaml --region <uuid> --apply
//!
//! # Check whether a past order can be repeated
//! pazar repeat --catalog catalog.yaml --order order.yaml --region <uuid> --business
//!
//! # Describe an order status
//! pazar status preparing
//! ```
//!
//! # Commands
//!
//! - `quote` - Compute a customer price with full breakdown
//! - `cart-region` - Revalidate a cart for a new region
//! - `repeat` - Validate a past order for repetition
//! - `status` - Show the fulfillment transitions for a status

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pazar_core::{CustomerType, OrderStatus, RegionId};

mod commands;
mod fixtures;

#[derive(Parser)]
#[command(name = "pazar")]
#[command(author, version, about = "Pazar pricing and order tools")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a customer price
    Quote {
        /// Supplier base price
        #[arg(long)]
        supplier_price: Decimal,

        /// Customer class (`b2b` or `b2c`)
        #[arg(long)]
        customer_type: CustomerType,

        /// Regional multiplier (defaults to `PAZAR_DEFAULT_REGIONAL_MULTIPLIER`)
        #[arg(long)]
        multiplier: Option<Decimal>,

        /// Variant price delta; repeat for several
        #[arg(long = "adjustment", allow_negative_numbers = true)]
        adjustments: Vec<Decimal>,

        /// Previous final price, to report the change
        #[arg(long)]
        previous: Option<Decimal>,
    },
    /// Revalidate a cart for a new region
    CartRegion {
        /// Catalog fixture (YAML)
        #[arg(long)]
        catalog: PathBuf,

        /// Cart fixture (YAML list of cart items)
        #[arg(long)]
        cart: PathBuf,

        /// Target region id
        #[arg(long)]
        region: RegionId,

        /// Apply the change-set and print the resulting cart
        #[arg(long)]
        apply: bool,
    },
    /// Validate a past order for repetition
    Repeat {
        /// Catalog fixture (YAML)
        #[arg(long)]
        catalog: PathBuf,

        /// Order fixture (YAML with `region_id` and `items`)
        #[arg(long)]
        order: PathBuf,

        /// Region the customer is shopping in now
        #[arg(long)]
        region: RegionId,

        /// Price with business prices where the region has them
        #[arg(long)]
        business: bool,
    },
    /// Describe an order status
    Status {
        /// Order status (`pending`, `confirmed`, ...)
        status: OrderStatus,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present (RUST_LOG and PAZAR_* settings)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pazar=info,pazar_engine=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if cli.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let result: Result<(), Box<dyn std::error::Error>> = run(cli.command).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Quote {
            supplier_price,
            customer_type,
            multiplier,
            adjustments,
            previous,
        } => {
            commands::quote::run(supplier_price, customer_type, multiplier, adjustments, previous)?;
        }
        Commands::CartRegion {
            catalog,
            cart,
            region,
            apply,
        } => commands::cart::region(&catalog, &cart, region, apply).await?,
        Commands::Repeat {
            catalog,
            order,
            region,
            business,
        } => commands::repeat::run(&catalog, &order, region, business).await?,
        Commands::Status { status } => commands::status::describe(status),
    }
    Ok(())
}
