use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use crate::{config::DEFAULT_ENDPOINT, tables::DEFAULT_PAGE_SIZE};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Import table descriptions from CSV into the Monte Carlo catalog",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Update catalog descriptions from a CSV of `full_table_id,description` rows
    Import(ImportArgs),
    /// List the warehouses visible to the API key
    Warehouses(WarehousesArgs),
}

#[derive(Debug, Args)]
pub struct AuthArgs {
    /// API key id (Settings -> API in the Monte Carlo UI)
    #[arg(long = "mcd-id", env = "MCD_DEFAULT_API_ID", hide_env_values = true)]
    pub mcd_id: String,
    /// API key token
    #[arg(long = "mcd-token", env = "MCD_DEFAULT_API_TOKEN", hide_env_values = true)]
    pub mcd_token: String,
    /// GraphQL endpoint URL
    #[arg(long, env = "MCD_API_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub auth: AuthArgs,
    /// CSV file with `full_table_id,description` rows and no header (`-` for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Warehouse UUID; defaults to the account's only warehouse
    #[arg(short = 'w', long = "warehouse", value_parser = parse_warehouse_id)]
    pub warehouse: Option<Uuid>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Tables requested per page while building the lookup
    #[arg(
        long = "page-size",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=1000)
    )]
    pub page_size: u32,
}

#[derive(Debug, Args)]
pub struct WarehousesArgs {
    #[command(flatten)]
    pub auth: AuthArgs,
}

pub fn parse_warehouse_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|err| format!("'{value}' is not a warehouse UUID: {err}"))
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
