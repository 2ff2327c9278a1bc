use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use esmap_cli::{query_text, read_json, JsonLinesSink, ReplayExecutor};
use esmap_core::config::{expand_path, Config};
use esmap_core::error::Error;
use esmap_core::layer::load_into;
use esmap_core::response::{documents_from_response, parse_query};
use esmap_core::session::Session;
use esmap_core::{encode, materialize};

#[derive(Parser)]
#[command(name = "esmap", about = "Turn search hits with GeoJSON geometries into WKT map features", version)]
struct Cli {
    /// Directory holding config.toml; relative paths are resolved against it
    #[arg(long, global = true, default_value = ".")]
    config_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the WKT for one GeoJSON geometry object
    Encode {
        /// Geometry JSON, e.g. '{"type":"Point","coordinates":[1,2]}'
        geometry: String,
    },

    /// Materialize a saved search response into JSON-lines features
    Load {
        /// Search response file (`{"hits": {"hits": [...]}}`)
        response: String,

        /// Write features here instead of stdout
        #[arg(long)]
        out: Option<String>,
    },

    /// Check that a query body is a single JSON object
    CheckQuery {
        /// Query JSON, or @file
        query: String,
    },

    /// Run a query through a connected session that replays a saved response
    Replay {
        /// Saved search response to answer the query with
        #[arg(long)]
        response: String,

        /// Query JSON, or @file
        query: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config_dir: PathBuf = expand_path(&cli.config_dir);
    match cli.command {
        Commands::Encode { geometry } => {
            let geometry: Value = serde_json::from_str(&geometry).context("geometry is not valid JSON")?;
            println!("{}", encode(&geometry)?);
        }
        Commands::Load { response, out } => {
            let config = Config::load_in(&config_dir)?;
            let response = read_json(&config.resolve_path(&response))?;
            let result = materialize(&documents_from_response(&response)?);
            let layer = config.layer()?;
            let report = match out {
                Some(path) => {
                    let path = config.resolve_path(&path);
                    let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
                    load_into(&mut JsonLinesSink::new(BufWriter::new(file)), result, &layer)?
                }
                None => load_into(&mut JsonLinesSink::new(io::stdout().lock()), result, &layer)?,
            };
            eprintln!("{}", report.summary());
        }
        Commands::CheckQuery { query } => {
            parse_query(&query_text(&query, &config_dir)?)?;
            eprintln!("Query is valid");
        }
        Commands::Replay { response, query } => {
            let config = Config::load_in(&config_dir)?;
            let settings = config.connection()?.ok_or(Error::NotConnected)?;
            let executor = ReplayExecutor::from_file(&config.resolve_path(&response))?;
            let session = Session::connect(settings, executor)?.with_layer_config(config.layer()?);
            eprintln!("{}", session.status());

            let mut sink = JsonLinesSink::new(io::stdout().lock());
            let outcome = session.run_query(&query_text(&query, config.base_dir())?, &mut sink)?;
            eprintln!("{}", outcome.message());
        }
    }
    Ok(())
}
