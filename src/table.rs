use std::borrow::Cow;
use std::fmt::Write as _;

use crate::warehouse::Warehouse;

pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let column_count = headers.len();
    let mut widths = headers
        .iter()
        .map(|h| h.chars().count().max(3))
        .collect::<Vec<_>>();

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(sanitize_cell(cell).chars().count());
        }
    }

    let mut output = String::new();

    let header_cells = headers.iter().map(|h| h.to_string()).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&header_cells, &widths));

    let separator_cells = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separator_cells, &widths));

    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }

    output
}

/// Name, connection type and uuid of each warehouse, one per line.
pub fn render_warehouses(warehouses: &[Warehouse]) -> String {
    let rows = warehouses
        .iter()
        .map(|w| {
            vec![
                w.name.clone(),
                w.connection_type.clone(),
                w.uuid.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&["name", "connection_type", "uuid"], &rows)
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let sanitized = sanitize_cell(value);
            let padding = width.saturating_sub(sanitized.chars().count());
            format!("{sanitized}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
