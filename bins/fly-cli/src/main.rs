//! fly-cli: command-line driver for the FlyAnyTrip booking simulator.
//!
//! Lists flights, quotes fees, and runs the full select → connect → pay flow
//! with simulated wallet and blockchain latencies.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use fly_booking::{BookingCoordinator, SimulatorConfig, TokioClock, VirtualClock};
use fly_core::catalog::Catalog;
use fly_core::constants::REWARD_TOKEN_SYMBOL;
use fly_core::fees::{self, FeeBreakdown};
use fly_core::traits::Clock;
use fly_core::types::Speed;
use fly_wallet::StaticProvider;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

/// FlyAnyTrip booking simulator.
#[derive(Parser)]
#[command(name = "fly-cli")]
#[command(version, about = "Book flights with cryptocurrency (simulated).")]
struct Cli {
    /// JSON file with a custom flight list (default: built-in catalog).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json").
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available flights.
    Flights,
    /// Show the fee breakdown for a flight.
    Quote(QuoteArgs),
    /// Book a flight: connect a wallet and pay.
    Book(BookArgs),
}

#[derive(Args)]
struct QuoteArgs {
    /// Flight id.
    #[arg(short, long)]
    flight: u32,

    /// Transaction speed (slow, average, fast).
    #[arg(short, long, default_value = "average")]
    speed: Speed,
}

#[derive(Args)]
struct BookArgs {
    /// Flight id.
    #[arg(short, long)]
    flight: u32,

    /// Transaction speed (slow, average, fast).
    #[arg(short, long, default_value = "average")]
    speed: Speed,

    /// Simulate a host wallet exposing this account instead of using a
    /// demo account.
    #[arg(short, long)]
    account: Option<String>,

    /// Seed for demo-account selection and transaction ids.
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the simulated delays.
    #[arg(long)]
    fast_forward: bool,

    /// Print the final booking summary as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    let catalog = load_catalog(cli.catalog.as_ref())?;
    debug!(flights = catalog.len(), "catalog loaded");

    match cli.command {
        Commands::Flights => list_flights(&catalog),
        Commands::Quote(args) => quote(&catalog, args),
        Commands::Book(args) => book(catalog, args).await,
    }
}

/// Initialize tracing with the given level and output format.
///
/// `RUST_LOG` takes precedence over `level_str`.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    Catalog::from_json(&json).with_context(|| format!("Invalid catalog: {}", path.display()))
}

fn list_flights(catalog: &Catalog) -> Result<()> {
    if catalog.is_empty() {
        println!("No flights available.");
        return Ok(());
    }
    for f in catalog.iter() {
        println!(
            "[{}] {:<16} {:<10} {:>8}  {:.2} {}",
            f.id,
            f.airline,
            f.route(),
            f.duration,
            f.price,
            f.token
        );
    }
    Ok(())
}

fn quote(catalog: &Catalog, args: QuoteArgs) -> Result<()> {
    let flight = catalog.require(args.flight)?;
    println!("{} | {} | {}", flight.route(), flight.airline, flight.duration);
    print_fees(&fees::estimate(flight.price, flight.token, args.speed));
    Ok(())
}

fn print_fees(f: &FeeBreakdown) {
    println!("Speed:          {} ({})", f.speed, f.speed.eta_label());
    println!("Flight Ticket:  {:.4} {}", f.amount, f.token);
    println!("Network Gas:    {:.6} {}", f.gas_cost, f.token);
    println!("Gas Price:      {:.6} {}", f.gas_price, f.token);
    println!("Network Fee:    {:.4} {}", f.network_fee, f.token);
    println!("Total Amount:   {:.4} {} (≈ ${:.2} USD)", f.total, f.token, f.total_usd);
    println!("Token Rewards:  {} {}", f.reward, REWARD_TOKEN_SYMBOL);
}

async fn book(catalog: Catalog, args: BookArgs) -> Result<()> {
    let config = SimulatorConfig::from_env().context("Invalid simulator configuration")?;
    let clock: Arc<dyn Clock> = if args.fast_forward {
        Arc::new(VirtualClock::new())
    } else {
        Arc::new(TokioClock::new())
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut coordinator = BookingCoordinator::with_parts(catalog, config, clock, rng);
    if let Some(account) = args.account {
        coordinator = coordinator.with_provider(Arc::new(StaticProvider::single(account)));
    }

    let flight = coordinator.select_flight(args.flight)?;
    println!("Selected {} | {} | {:.2} {}", flight.route(), flight.airline, flight.price, flight.token);
    coordinator.set_speed(args.speed);

    println!("Connecting wallet...");
    let outcome = coordinator.connect().await.context("Wallet connection failed")?;
    if let Some(notice) = outcome.notice {
        println!("Note: {notice}");
    }
    let balance = coordinator.wallet().balance().unwrap_or_default();
    println!("Wallet connected: {} (balance {:.2} ETH)", outcome.account.abbreviated(), balance);

    if let Some(fees) = coordinator.fee_breakdown() {
        print_fees(&fees);
    }

    info!(flight = args.flight, speed = %args.speed, "paying");
    let result = coordinator
        .pay_with(|t| {
            let label = t.to.step_label().unwrap_or(t.to.as_str());
            println!("[{:>3}%] {label}", t.to.progress());
            if let Some(desc) = t.to.step_description() {
                println!("       {desc}");
            }
        })
        .await;

    let summary = coordinator.summary();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    match result {
        Ok(hash) => {
            println!("Payment successful! Transaction: {}", hash.abbreviated());
            if let Some(fees) = summary.fees {
                println!("You earned {} {REWARD_TOKEN_SYMBOL} tokens!", fees.reward);
            }
            Ok(())
        }
        Err(e) => bail!("Payment failed: {e}"),
    }
}
