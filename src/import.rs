use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::{info, warn};

use crate::{
    client::{CatalogClient, Transport},
    error::ImportError,
    graphql::{UPDATE_DESCRIPTION_MUTATION, UpdateDescriptionVariables},
    io_utils,
    tables::TableMap,
};

#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            delimiter: io_utils::DEFAULT_CSV_DELIMITER,
            encoding: encoding_rs::UTF_8,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub total: usize,
    pub imported: usize,
    /// Identifiers with no table in the warehouse, lowercased.
    pub unmatched: Vec<String>,
    /// Identifiers whose table came back without an mcon.
    pub missing_mcon: Vec<String>,
}

impl ImportSummary {
    pub fn summary_line(&self) -> String {
        format!(
            "Successfully Imported {} of {} Table Descriptions",
            self.imported, self.total
        )
    }
}

/// Imports every row of the CSV at `path`, writing each mutation response and
/// the final summary line to `out`.
pub fn import_descriptions<T, W>(
    client: &CatalogClient<T>,
    path: &Path,
    tables: &TableMap,
    options: ImportOptions,
    out: &mut W,
) -> Result<ImportSummary>
where
    T: Transport,
    W: Write,
{
    info!("Importing descriptions from {path:?}");
    let data = io_utils::read_input(path)?;
    import_from_slice(client, &data, tables, options, out)
        .with_context(|| format!("Importing descriptions from {path:?}"))
}

/// Imports rows from in-memory CSV bytes. An empty line between rows fails
/// the run at that row, after the rows before it have been sent.
pub fn import_from_slice<T, W>(
    client: &CatalogClient<T>,
    data: &[u8],
    tables: &TableMap,
    options: ImportOptions,
    out: &mut W,
) -> Result<ImportSummary>
where
    T: Transport,
    W: Write,
{
    let blank_row = io_utils::first_blank_row(data, options.delimiter);
    let mut reader = io_utils::open_csv_reader(data, options.delimiter);
    let mut summary = ImportSummary::default();

    for (idx, record) in reader.byte_records().enumerate() {
        let row = idx + 1;
        if blank_row == Some(row) {
            return Err(ImportError::MalformedRow { row, fields: 0 }.into());
        }
        let record = record.with_context(|| format!("Reading row {row}"))?;
        let fields = io_utils::decode_record(&record, options.encoding)
            .with_context(|| format!("Decoding row {row}"))?;
        summary.total += 1;

        let [full_table_id, description, ..] = fields.as_slice() else {
            return Err(ImportError::MalformedRow {
                row,
                fields: fields.len(),
            }
            .into());
        };
        let key = full_table_id.to_lowercase();

        let Some(mcon) = tables.lookup(&key) else {
            warn!("check failed: {key}");
            summary.unmatched.push(key);
            continue;
        };
        if mcon.is_empty() {
            warn!("Skipping {key}: the catalog returned no mcon for this table");
            summary.missing_mcon.push(key);
            continue;
        }
        info!("check succeeded: {key}");

        let variables = UpdateDescriptionVariables {
            mcon,
            description: description.as_str(),
        };
        let body = client
            .mutate_raw(UPDATE_DESCRIPTION_MUTATION, variables)
            .with_context(|| format!("Updating description for {key} (row {row})"))?;
        writeln!(out, "{body}").context("Writing mutation response")?;
        summary.imported += 1;
    }

    writeln!(out, "{}", summary.summary_line()).context("Writing import summary")?;
    if !summary.unmatched.is_empty() {
        info!(
            "{} row(s) did not match a table in the warehouse",
            summary.unmatched.len()
        );
    }
    Ok(summary)
}
