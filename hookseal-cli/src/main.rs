//! Hookseal CLI
//!
//! Verifies captured webhook payloads against their signature header, and
//! signs payloads for replay or testing.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::ConfigLoader;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Hookseal - Verify and decode signed webhooks
#[derive(Parser, Debug)]
#[command(name = "hookseal")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./hookseal.toml")]
    config: PathBuf,

    /// Webhook secret, overriding the configuration file
    #[arg(long, env = "HOOKSEAL_SECRET", hide_env_values = true)]
    secret: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify a payload's signature header and print the decoded event
    Verify {
        /// Payload file, or `-` for stdin
        #[arg(short, long)]
        payload: PathBuf,

        /// Signature header value (e.g. `v1=5257a8...`)
        #[arg(long, env = "HOOKSEAL_SIGNATURE")]
        header: Option<String>,
    },
    /// Print the signature header for a payload
    Sign {
        /// Payload file, or `-` for stdin
        #[arg(short, long)]
        payload: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let config = ConfigLoader::new(&args.config, args.secret)
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;

    match args.command {
        Command::Verify { payload, header } => {
            let body = commands::read_payload(&payload).map_err(|e| {
                tracing::error!("Failed to read payload from {:?}: {}", payload, e);
                e
            })?;
            let event = commands::verify(&body, header.as_deref(), &config)?;
            tracing::info!(event_id = ?event.id(), event_type = ?event.event_type(), "Event accepted");
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        Command::Sign { payload } => {
            let body = commands::read_payload(&payload).map_err(|e| {
                tracing::error!("Failed to read payload from {:?}: {}", payload, e);
                e
            })?;
            println!("{}", commands::sign(&body, &config)?);
        }
    }

    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
///
/// Logs go to stderr so stdout carries only command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
