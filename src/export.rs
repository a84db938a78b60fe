use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::presentation::{COLUMNS, DisplayRow};

/// Lets spreadsheet tools detect UTF-8 and render non-Latin names
const UTF8_BOM: &str = "\u{feff}";

pub fn export_file_name(run_at: DateTime<Utc>) -> String {
    format!("youtube_new_channels_{}.csv", run_at.format("%Y%m%d"))
}

/// Encode the table columns as BOM-prefixed UTF-8 CSV
pub fn encode_csv(rows: &[DisplayRow]) -> Vec<u8> {
    let mut out = String::from(UTF8_BOM);
    write_record(&mut out, COLUMNS);
    for row in rows {
        write_record(&mut out, row.cells());
    }
    out.into_bytes()
}

fn write_record(out: &mut String, fields: [&str; 6]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

/// Write the export into `dir`. Nothing is written for an empty result.
pub fn write_export(dir: &Path, rows: &[DisplayRow], run_at: DateTime<Utc>) -> Result<Option<PathBuf>> {
    if rows.is_empty() {
        return Ok(None);
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(run_at));
    fs::write(&path, encode_csv(rows))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "export written");

    Ok(Some(path))
}
