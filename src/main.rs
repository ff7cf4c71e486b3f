//! API versioning CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!     manifest.toml ──▶ config::loader ──▶ lifecycle::startup::register
//!                                                   │
//!                          ┌────────────────────────┴───────────────────┐
//!                          ▼                                            ▼
//!                   plan: RouteTable                        serve: VersionedRouter
//!                   (alias pass, print)                     (alias pass, axum::serve)
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::net::TcpListener;

use api_versioning::config::load_manifest;
use api_versioning::http::serve;
use api_versioning::lifecycle::startup::plan;
use api_versioning::observability::init_logging;
use api_versioning::routing::route::method_path;

#[derive(Parser)]
#[command(name = "api-versioning")]
#[command(about = "Preview and serve versioned route tables", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set.
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the final route table, aliases included
    Plan {
        manifest: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Serve every route with an echo handler
    Serve {
        manifest: PathBuf,

        /// Override the manifest's bind address
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[derive(Serialize)]
struct PlannedRoute {
    method: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    alias_of: Option<String>,
}

#[derive(Serialize)]
struct PlanOutput {
    global_prefix: Option<String>,
    routes: Vec<PlannedRoute>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Plan { manifest, json } => {
            let manifest = load_manifest(&manifest)?;
            let (registration, table) = plan(&manifest)?;

            if json {
                let output = PlanOutput {
                    global_prefix: registration.global_prefix().map(str::to_string),
                    routes: table
                        .iter()
                        .map(|r| PlannedRoute {
                            method: r.method.to_string(),
                            path: r.path.clone(),
                            alias_of: r.alias_of.clone(),
                        })
                        .collect(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                match registration.global_prefix() {
                    Some("") => println!("global prefix: (none)"),
                    Some(prefix) => println!("global prefix: {prefix}"),
                    None => println!("versioning disabled"),
                }
                for route in table.iter() {
                    let line = method_path(&route.method, &route.path);
                    match &route.alias_of {
                        Some(original) => println!("  {line}  -> {original}"),
                        None => println!("  {line}"),
                    }
                }
            }
        }
        Commands::Serve { manifest, bind } => {
            let manifest = load_manifest(&manifest)?;
            let address = bind.unwrap_or_else(|| manifest.server.bind_address.clone());

            let listener = TcpListener::bind(&address).await?;
            tracing::info!(address = %listener.local_addr()?, "Listening for connections");

            serve(&manifest, listener).await?;
            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}
