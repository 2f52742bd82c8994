//! `openfactory-sdk` -- inspect assets deployed on OpenFactory.
//!
//! Lists devices, apps and assets known to the ksqlDB asset registry and
//! shows the current attributes of a single asset. All commands are
//! read-only.
//!
//! # Environment variables
//!
//! | Variable              | Required | Default                 | Description                      |
//! |-----------------------|----------|-------------------------|----------------------------------|
//! | `KSQLDB_URL`          | no       | `http://localhost:8088` | ksqlDB REST endpoint             |
//! | `KSQLDB_TIMEOUT_SECS` | no       | `30`                    | Per-request timeout              |
//! | `KSQLDB_MAX_RETRIES`  | no       | `3`                     | Retries for transient failures   |
//! | `RUST_LOG`            | no       | `openfactory_sdk=warn`  | Log filter (logs go to stderr)   |

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openfactory_core::registry::Registry;
use openfactory_core::types::AssetUuid;
use openfactory_ksqldb::client::KsqlClient;
use openfactory_sdk::config::SdkConfig;
use openfactory_sdk::listing;
use openfactory_sdk::render::{self, Table};

const CONNECT_FAILURE: &str =
    "Failed to connect to ksqlDB server. Make sure to spin up the OpenFactory infrastructure.";

#[derive(Parser)]
#[command(name = "openfactory-sdk")]
#[command(version)]
#[command(about = "OpenFactory SDK CLI - inspect OpenFactory assets deployed locally", long_about = None)]
struct Cli {
    /// ksqlDB server URL (overrides KSQLDB_URL)
    #[arg(long, global = true, value_name = "URL")]
    ksqldb_url: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Sort rows by asset UUID instead of registry order
    #[arg(long, global = true)]
    sort: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List deployed devices, apps or assets
    List {
        #[command(subcommand)]
        what: ListCommands,
    },

    /// List all attributes of an asset
    Inspect {
        /// UUID of the asset
        asset_uuid: String,
    },
}

#[derive(Subcommand)]
enum ListCommands {
    /// Devices with their agent, producer and supervisor
    Devices,
    /// OpenFactory applications
    Apps,
    /// All assets
    Assets,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openfactory_sdk=warn,openfactory_ksqldb=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();

    match run(cli, color).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{e:#}");
            if color {
                eprintln!("{}", message.red());
            } else {
                eprintln!("{message}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, color: bool) -> anyhow::Result<()> {
    let config = SdkConfig::from_env()?.with_url_override(cli.ksqldb_url.clone());

    let registry: Arc<dyn Registry> = match KsqlClient::connect(config.ksql_config()).await {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(url = %config.ksqldb_url, error = %e, "ksqlDB connection failed");
            anyhow::bail!(CONNECT_FAILURE);
        }
    };

    match cli.command {
        Commands::List { what } => match what {
            ListCommands::Devices => {
                let mut rows = listing::list_devices(registry.as_ref()).await?;
                if cli.sort {
                    listing::sort_by_uuid(&mut rows);
                }
                emit(&rows, render::devices_table(&rows), cli.format, color)
            }
            ListCommands::Apps => {
                let mut rows = listing::list_applications(registry.as_ref()).await?;
                if cli.sort {
                    listing::sort_by_uuid(&mut rows);
                }
                emit(&rows, render::applications_table(&rows), cli.format, color)
            }
            ListCommands::Assets => {
                let mut rows = listing::list_assets(registry.as_ref()).await?;
                if cli.sort {
                    listing::sort_by_uuid(&mut rows);
                }
                emit(&rows, render::assets_table(&rows), cli.format, color)
            }
        },
        Commands::Inspect { asset_uuid } => {
            let uuid = AssetUuid::parse(&asset_uuid).context("Invalid asset UUID")?;
            let inspection = listing::inspect(registry.as_ref(), &uuid).await?;
            emit(
                &inspection,
                render::inspection_table(&inspection),
                cli.format,
                color,
            )
        }
    }
}

fn emit<T: Serialize + ?Sized>(
    data: &T,
    table: Table,
    format: OutputFormat,
    color: bool,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Table => print!("{}", table.render(color)),
    }
    Ok(())
}
