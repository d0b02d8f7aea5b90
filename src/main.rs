//! evnet-console — staff console for an EV-charging network.
//!
//! ```sh
//! # List stations and their ports
//! evnet-console stations
//!
//! # Reconciled slot availability for one port
//! evnet-console overview p-01
//!
//! # Update a slot and see the refreshed overview
//! evnet-console slot set p-01 s-03 --order 3 --status available
//!
//! # Exchange a VNPay return URL for a payment status
//! evnet-console payment-return "<url>" --pending-txn pend-123
//!
//! # Validate config without touching the network
//! evnet-console --check
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use evnet_console::application::{
    PaymentReturnService, PortOverview, SlotEdit, StationDirectory, StationOverviewService,
};
use evnet_console::config::{default_config_path, AppConfig};
use evnet_console::domain::{OverrideMap, SlotStatus, Station};
use evnet_console::infrastructure::ApiClient;

/// Staff console for an EV-charging network.
#[derive(Parser, Debug)]
#[command(
    name = "evnet-console",
    version,
    about = "Station overview, slot management and payment-return checks",
    long_about = "EVNet staff console — reconciled slot availability, slot and port \
                  management, and payment-return checks against the network's REST \
                  backend.\n\n\
                  Default config: ~/.config/evnet-console/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "EVNET_CONFIG")]
    config: Option<PathBuf>,

    /// Override the backend base URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit without calling the backend.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List stations with their ports
    Stations,
    /// Reconciled slot availability for one port
    Overview {
        /// Port to inspect
        port_id: String,
    },
    /// Manage slots on a port
    #[command(subcommand)]
    Slot(SlotCommands),
    /// Exchange a VNPay return URL for a payment status
    PaymentReturn {
        /// The full return URL the gateway redirected to
        return_url: String,
        /// Pending-transaction id carried through the redirect context
        #[arg(long)]
        pending_txn: String,
    },
}

#[derive(Subcommand, Debug)]
enum SlotCommands {
    /// Update a slot's order and status
    Set {
        port_id: String,
        slot_id: String,
        #[arg(long)]
        order: u32,
        /// One of: available, booked, in_use
        #[arg(long)]
        status: String,
    },
    /// Add a slot to a port
    Add {
        port_id: String,
        #[arg(long)]
        order: u32,
        #[arg(long, default_value = "available")]
        status: String,
    },
    /// Delete a slot (refused while a live session occupies it)
    Remove {
        port_id: String,
        slot_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(url) = cli.base_url {
        config.backend.base_url = url;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_tracing(&config.logging.level);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => warn!(
            "Failed to load config from {}: {}. Using defaults.",
            config_path.display(),
            e
        ),
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Backend     : {}", config.backend.base_url);
        println!("   Timeout     : {}s", config.backend.timeout_secs);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let Some(command) = cli.command else {
        eprintln!("No command given. Try `evnet-console --help`.");
        std::process::exit(2);
    };

    // ── Wire services against the REST backend ─────────────────
    let gateway = Arc::new(ApiClient::from_config(&config.backend)?);
    let directory = StationDirectory::new(gateway.clone());
    let overview = StationOverviewService::new(gateway.clone());
    let payments = PaymentReturnService::new(gateway);

    match command {
        Commands::Stations => {
            let stations = directory.list_stations().await?;
            print_stations(&stations);
        }

        Commands::Overview { port_id } => {
            let (_, port) = directory.locate_port(&port_id).await?;
            let view = overview.port_overview(&port, &OverrideMap::new()).await?;
            print_overview(&view);
        }

        Commands::Slot(SlotCommands::Set {
            port_id,
            slot_id,
            order,
            status,
        }) => {
            let (_, port) = directory.locate_port(&port_id).await?;
            let edit = SlotEdit {
                order,
                status: SlotStatus::normalize(&status),
            };
            let view = overview.edit_slot(&port, &slot_id, edit).await?;
            println!("Slot {} updated", slot_id);
            print_overview(&view);
        }

        Commands::Slot(SlotCommands::Add {
            port_id,
            order,
            status,
        }) => {
            let (_, port) = directory.locate_port(&port_id).await?;
            let edit = SlotEdit {
                order,
                status: SlotStatus::normalize(&status),
            };
            let view = overview.add_slot(&port, edit).await?;
            print_overview(&view);
        }

        Commands::Slot(SlotCommands::Remove { port_id, slot_id }) => {
            let (_, port) = directory.locate_port(&port_id).await?;
            let view = overview.remove_slot(&port, &slot_id).await?;
            println!("Slot {} deleted", slot_id);
            print_overview(&view);
        }

        Commands::PaymentReturn {
            return_url,
            pending_txn,
        } => {
            let status = payments.confirm(&return_url, &pending_txn).await?;
            println!("Payment {}", status.outcome);
            if let Some(tx) = &status.transaction_id {
                println!("   Transaction : {}", tx);
            }
            if let Some(message) = &status.message {
                println!("   Message     : {}", message);
            }
        }
    }

    Ok(())
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn print_stations(stations: &[Station]) {
    if stations.is_empty() {
        println!("(no stations)");
        return;
    }
    for station in stations {
        match &station.address {
            Some(address) => println!("{}  {} — {}", station.id, station.name, address),
            None => println!("{}  {}", station.id, station.name),
        }
        for port in &station.ports {
            println!(
                "   {}  {:<8} {:>6} kW  {:>10}/kWh  {:<6} {}",
                port.id,
                port.kind.to_string(),
                port.power_kw.to_string(),
                port.price_per_kwh.to_string(),
                port.speed.to_string(),
                port.status
            );
        }
    }
}

fn print_overview(view: &PortOverview) {
    let port = &view.port;
    println!(
        "Port {} ({}, {} kW, {}) — {}",
        port.id,
        port.kind,
        port.power_kw,
        port.speed,
        view.display_status.to_string().to_uppercase()
    );
    if view.slots.is_empty() {
        println!("   (no slots)");
        return;
    }
    println!("   {:<4} {:<12} {:<12} SOURCE", "#", "SLOT", "STATUS");
    for display in &view.slots {
        let source = match &display.reservation {
            Some(reservation) => {
                let until = reservation
                    .end_for_slot(&display.slot.id)
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "?".to_string());
                format!(
                    "reservation {} ({}, until {})",
                    reservation.id, reservation.status, until
                )
            }
            None => "—".to_string(),
        };
        println!(
            "   {:<4} {:<12} {:<12} {}",
            display.slot.order,
            display.slot.id,
            display.actual_status.to_string(),
            source
        );
    }
}
