pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod graphql;
pub mod import;
pub mod io_utils;
pub mod table;
pub mod tables;
pub mod warehouse;

use std::{env, io, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands},
    client::{CatalogClient, HttpTransport},
    config::ApiConfig,
    import::ImportOptions,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("mcd_describe", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Import(args) => handle_import(&args),
        Commands::Warehouses(args) => handle_warehouses(&args),
    }
}

fn connect(auth: &cli::AuthArgs) -> Result<CatalogClient<HttpTransport>> {
    let config = ApiConfig::from_args(auth)?;
    info!("Connecting to {} as {}", config.endpoint, config.credentials.id);
    Ok(CatalogClient::new(HttpTransport::new(&config)?))
}

fn handle_import(args: &cli::ImportArgs) -> Result<()> {
    if !io_utils::is_dash(&args.input) {
        let problem = if !args.input.exists() {
            Some("does not exist")
        } else if !args.input.is_file() {
            Some("is not a file")
        } else {
            None
        };
        if let Some(problem) = problem {
            return Err(error::ImportError::InvalidConfig(format!(
                "Input {:?} {problem}",
                args.input
            ))
            .into());
        }
    }
    let options = ImportOptions {
        delimiter: args.delimiter.unwrap_or(io_utils::DEFAULT_CSV_DELIMITER),
        encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
    };
    let client = connect(&args.auth)?;

    let warehouse = warehouse::resolve_warehouse(&client, args.warehouse)
        .context("Resolving target warehouse")?;
    let tables = tables::build_table_map(&client, warehouse, args.page_size)
        .with_context(|| format!("Loading tables for warehouse {warehouse}"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = import::import_descriptions(&client, &args.input, &tables, options, &mut out)?;
    info!(
        "Imported {} of {} row(s); {} unmatched, {} without mcon",
        summary.imported,
        summary.total,
        summary.unmatched.len(),
        summary.missing_mcon.len()
    );
    Ok(())
}

fn handle_warehouses(args: &cli::WarehousesArgs) -> Result<()> {
    let client = connect(&args.auth)?;
    let warehouses = warehouse::list_warehouses(&client)?;
    if warehouses.is_empty() {
        return Err(error::ImportError::NoWarehouses.into());
    }
    print!("{}", table::render_warehouses(&warehouses));
    info!("Listed {} warehouse(s)", warehouses.len());
    Ok(())
}
