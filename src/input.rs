//! Input list loading
//!
//! The app list and the ignore list are both CSV files whose first column
//! holds a URL or an app ID. Other columns are ignored, which lets a
//! previous run's `found-emails` output be fed back in as an ignore list.

use crate::HarvestError;
use csv::ReaderBuilder;
use std::path::Path;

/// Reads the trimmed, non-empty first-column cells of a CSV file
///
/// A missing file is treated as an empty list.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - First-column values in file order
/// * `Err(HarvestError)` - The file exists but could not be read
pub fn read_first_column(path: &Path) -> Result<Vec<String>, HarvestError> {
    if !path.exists() {
        tracing::warn!("Input file {} not found, treating as empty", path.display());
        return Ok(Vec::new());
    }

    let csv_error = |source: csv::Error| HarvestError::Csv {
        path: path.display().to_string(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    let mut values = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        if let Some(first) = row.get(0).map(str::trim).filter(|cell| !cell.is_empty()) {
            values.push(first.to_string());
        }
    }

    Ok(values)
}
