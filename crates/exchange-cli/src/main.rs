//! `exchange` — command-line front end for the project exchange API.
//!
//! # Usage
//!
//! ```
//! exchange projects list --category "Веб-разработка" --min-kpi 85
//! exchange --listing remote --url http://localhost:8080/api projects list
//! exchange --token "$TOKEN" projects apply 12
//! ```
//!
//! Settings come from `--config FILE`, then `EXCHANGE_*` environment
//! variables, then the flags below.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use commands::Command;
use exchange_client::{ApiClient, Listing, Settings};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "exchange", version, about = "Client for the project exchange API")]
struct Args {
  /// Path to a TOML settings file (base_url, token, timeout_secs, listing).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// Base URL of the API, e.g. http://localhost:8080/api.
  #[arg(long, global = true)]
  url: Option<String>,

  /// Bearer token for authenticated calls.
  #[arg(long, global = true)]
  token: Option<String>,

  /// Serve project listings from the bundled catalogue or the backend.
  #[arg(long, value_enum, global = true)]
  listing: Option<ListingArg>,

  /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` also applies.
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ListingArg {
  Static,
  Remote,
}

impl From<ListingArg> for Listing {
  fn from(arg: ListingArg) -> Self {
    match arg {
      ListingArg::Static => Listing::Static,
      ListingArg::Remote => Listing::Remote,
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let level = match args.verbose {
    0 => LevelFilter::WARN,
    1 => LevelFilter::INFO,
    _ => LevelFilter::DEBUG,
  };
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy(),
    )
    .init();

  let mut settings =
    Settings::load(args.config.as_deref()).context("loading settings")?;

  // Flags override the file and environment layers.
  if let Some(url) = args.url {
    settings.base_url = url;
  }
  if let Some(token) = args.token {
    settings.token = Some(token);
  }
  if let Some(listing) = args.listing {
    settings.listing = listing.into();
  }

  tracing::info!(base_url = %settings.base_url, listing = ?settings.listing, "settings resolved");

  let client = ApiClient::new(&settings, settings.token.clone())
    .context("building HTTP client")?;

  commands::run(args.command, &client, settings.listing).await
}
