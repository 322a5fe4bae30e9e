//! Fixed-width tabular rendering of result rows.
//!
//! Purely presentational: no state, no I/O. The walkthrough binary prints the
//! returned string to stdout.

use std::fmt::Write;

use scylla::value::CqlValue;

use crate::rows::ResultSet;

/// Minimum printed width of a column
const MIN_COLUMN_WIDTH: usize = 10;

/// Render the named columns of a result set as a fixed-width table.
///
/// Each column is as wide as its widest cell (header included). A dashed
/// separator follows the header, and unknown columns render as `null` cells.
///
/// ```text
/// title                           album              artist
/// ------------------------------+------------------+----------------
/// La Petite Tonkinoise            Bye Bye Blackbird  Joséphine Baker
/// ```
pub fn format_rows(result: &ResultSet, columns: &[&str]) -> String {
    let rendered: Vec<Vec<String>> = result
        .rows()
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|name| render_value(row.get(name)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rendered
                .iter()
                .map(|cells| cells[i].chars().count())
                .chain([name.chars().count(), MIN_COLUMN_WIDTH])
                .max()
                .unwrap_or(MIN_COLUMN_WIDTH)
        })
        .collect();

    let mut out = String::new();
    write_line(&mut out, columns.iter().map(|s| s.to_string()), &widths);

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", separator.join("+"));

    for cells in rendered {
        write_line(&mut out, cells.into_iter(), &widths);
    }
    out
}

fn write_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" "));
}

/// Render a single cell. NULL cells print as `null`, collections in CQL
/// literal style, blobs as hex.
pub fn render_value(value: Option<&CqlValue>) -> String {
    let Some(value) = value else {
        return "null".to_string();
    };
    match value {
        CqlValue::Text(s) | CqlValue::Ascii(s) => s.clone(),
        CqlValue::Uuid(u) => u.to_string(),
        CqlValue::Boolean(b) => b.to_string(),
        CqlValue::TinyInt(n) => n.to_string(),
        CqlValue::SmallInt(n) => n.to_string(),
        CqlValue::Int(n) => n.to_string(),
        CqlValue::BigInt(n) => n.to_string(),
        CqlValue::Float(n) => n.to_string(),
        CqlValue::Double(n) => n.to_string(),
        CqlValue::Set(items) => {
            let inner: Vec<String> = items.iter().map(|v| render_value(Some(v))).collect();
            format!("{{{}}}", inner.join(", "))
        }
        CqlValue::List(items) => {
            let inner: Vec<String> = items.iter().map(|v| render_value(Some(v))).collect();
            format!("[{}]", inner.join(", "))
        }
        CqlValue::Blob(bytes) => {
            let mut hex = String::with_capacity(2 + bytes.len() * 2);
            hex.push_str("0x");
            for byte in bytes {
                let _ = write!(hex, "{byte:02x}");
            }
            hex
        }
        CqlValue::Empty => String::new(),
        other => format!("{other:?}"),
    }
}
