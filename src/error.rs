//! Typed failure kinds surfaced by the importer.
//!
//! Everything else flows through `anyhow`; these variants exist so callers
//! (and tests) can tell the expected failure modes apart with
//! `anyhow::Error::downcast_ref::<ImportError>()`.

use thiserror::Error;

use crate::{table, warehouse::Warehouse};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("No warehouses are visible to this API key")]
    NoWarehouses,
    #[error(
        "More than one warehouse is available, re-run with --warehouse <UUID>:\n{}",
        table::render_warehouses(.0)
    )]
    AmbiguousWarehouse(Vec<Warehouse>),
    #[error("Row {row} has {fields} column(s); expected full_table_id and description")]
    MalformedRow { row: usize, fields: usize },
    #[error("GraphQL endpoint returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("GraphQL request failed: {0}")]
    Graphql(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
