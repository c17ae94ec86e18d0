//! CSV reader construction and text decoding for description files.
//!
//! Description files have no header row, are small enough to read whole, and
//! the `-` path reads standard input. Fields are decoded with the `encoding_rs`
//! encoding picked on the command line, defaulting to UTF-8.

use std::{fs::File, io::Read, path::Path};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

/// Headerless reader; row width is checked by the caller.
pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

/// Reads the whole description file, or standard input for `-`.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    if is_dash(path) {
        std::io::stdin()
            .lock()
            .read_to_end(&mut data)
            .context("Reading standard input")?;
    } else {
        File::open(path)
            .with_context(|| format!("Opening input file {path:?}"))?
            .read_to_end(&mut data)
            .with_context(|| format!("Reading input file {path:?}"))?;
    }
    Ok(data)
}

/// Row number of the first empty line that is followed by more data.
///
/// The `csv` reader skips empty lines, so they are located here instead. Rows
/// are counted the way the reader yields them (a quoted field spanning lines
/// stays one row) with the blank line itself occupying the returned row.
/// Blank lines after the last record are ignored.
pub fn first_blank_row(data: &[u8], delimiter: u8) -> Option<usize> {
    let mut records = 0usize;
    let mut pending: Option<usize> = None;
    let mut in_quotes = false;
    let mut field_start = true;
    let mut line_empty = true;
    let mut bytes = data.iter().copied().peekable();

    while let Some(byte) = bytes.next() {
        if in_quotes {
            if byte == b'"' {
                if bytes.peek() == Some(&b'"') {
                    bytes.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }
        match byte {
            b'\n' => {
                if line_empty {
                    pending.get_or_insert(records + 1);
                } else {
                    records += 1;
                }
                line_empty = true;
                field_start = true;
                continue;
            }
            b'\r' => continue,
            b'"' if field_start => {
                in_quotes = true;
                field_start = false;
            }
            other => field_start = other == delimiter,
        }
        if line_empty {
            if pending.is_some() {
                return pending;
            }
            line_empty = false;
        }
    }
    None
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}
