//! Append-only CSV tables of property rows.

use crate::types::PropertyRow;
use crate::{ResultsError, ResultsResult};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

pub const CSV_HEADER: &str = "T,P,Cp,Cv,RHO,H,S,G,A,U,V";

fn format_row(row: &PropertyRow) -> String {
    // `{}` on f64 is the shortest text that parses back to the same value
    let fields: Vec<String> = row.values().iter().map(|v| v.to_string()).collect();
    fields.join(",")
}

/// Append one row, writing the header first if the file is empty or new.
pub fn append_row(path: &Path, row: &PropertyRow) -> ResultsResult<()> {
    append_rows(path, std::slice::from_ref(row))
}

pub fn append_rows(path: &Path, rows: &[PropertyRow]) -> ResultsResult<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut content = String::new();
    if file.metadata()?.len() == 0 {
        content.push_str(CSV_HEADER);
        content.push('\n');
    }
    for row in rows {
        content.push_str(&format_row(row));
        content.push('\n');
    }
    file.write_all(content.as_bytes())?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "appended CSV rows");
    Ok(())
}

/// Read back every data row of a table written by [`append_rows`].
pub fn read_rows(path: &Path) -> ResultsResult<Vec<PropertyRow>> {
    let content = fs::read_to_string(path)?;
    let mut rows = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() || line == CSV_HEADER {
            continue;
        }
        rows.push(parse_row(line).map_err(|reason| ResultsError::Parse {
            line: idx + 1,
            reason,
        })?);
    }
    Ok(rows)
}

fn parse_row(line: &str) -> Result<PropertyRow, String> {
    let mut values = [0.0; PropertyRow::COLUMNS];
    let mut fields = line.split(',');
    for slot in values.iter_mut() {
        let field = fields
            .next()
            .ok_or_else(|| format!("expected {} fields", PropertyRow::COLUMNS))?;
        *slot = field
            .trim()
            .parse()
            .map_err(|_| format!("not a number: `{field}`"))?;
    }
    if fields.next().is_some() {
        return Err(format!("more than {} fields", PropertyRow::COLUMNS));
    }
    Ok(PropertyRow::from_values(values))
}
