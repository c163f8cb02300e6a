use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{debug, error, info};

use crate::models::polars_err;

pub fn project_root() -> PathBuf {
    match env::var_os("PROJECT_ROOT") {
        Some(val) => PathBuf::from(val),
        None => {
            // Fall back to current directory if PROJECT_ROOT not set
            env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        }
    }
}

/// Cell texts read as missing values, the same set spreadsheet exports and
/// pandas-written CSVs use.
const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Reads a headered CSV. Column types are inferred from every row, so a late
/// float in an integer-looking column widens the column instead of failing.
pub fn read_csv(file_path: &Path) -> PolarsResult<DataFrame> {
    let markers = MISSING_MARKERS.iter().map(|&m| m.into()).collect();
    let null_values = NullValues::AllColumns(markers);

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|opts| opts.with_null_values(Some(null_values.clone())))
        .try_into_reader_with_file_path(Some(file_path.to_path_buf()))?
        .finish()
}

/// Writes `df` as comma-separated text with a header row and no index column.
/// The parent directory must already exist.
pub fn dataframe_to_csv(df: &mut DataFrame, path: &Path) -> PolarsResult<()> {
    debug!("Writing {:?} frame to {}", df.shape(), path.display());

    let mut file = File::create(path).map_err(|e| {
        error!("Failed to create {}: {}", path.display(), e);
        polars_err(format!("failed to create {}: {e}", path.display()).into())
    })?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(df)?;

    info!("Saved {} rows to {}", df.height(), path.display());
    Ok(())
}

/// Renders `df` as right-aligned plain text: a header line followed by one
/// line per row, no row index and no frame decoration.
pub fn to_plain_string(df: &DataFrame) -> PolarsResult<String> {
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let mut text = Vec::with_capacity(df.height() + 1);
        text.push(column.name().to_string());
        for i in 0..df.height() {
            text.push(cell_text(column.get(i)?));
        }
        cells.push(text);
    }

    let widths: Vec<usize> = cells
        .iter()
        .map(|text| text.iter().map(|s| s.chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for row in 0..=df.height() {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(text, &width)| format!("{:>width$}", text[row], width = width))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

fn cell_text(value: AnyValue) -> String {
    match value {
        AnyValue::Null => "NaN".to_string(),
        // AnyValue's Display quotes strings
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}
