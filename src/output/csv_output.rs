//! Append-only CSV output
//!
//! Each run date gets two files in the output directory:
//! `found-emails YYYY-MM-DD.csv` for apps with at least one email and
//! `no-emails YYYY-MM-DD.csv` for the rest. Cells are never quoted, so
//! separators inside values are replaced before writing.

use crate::config::OutputConfig;
use crate::output::traits::{OutputError, OutputHandler, OutputResult};
use crate::record::ScrapedRecord;
use chrono::{Local, NaiveDate};
use csv::{QuoteStyle, WriterBuilder};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

const FIXED_COLUMNS: [&str; 11] = [
    "ID",
    "URL",
    "App Name",
    "Developer",
    "Last updated",
    "Rating",
    "Ratings count",
    "Website",
    "Price",
    "IAPs",
    "Category",
];

/// CSV output handler writing the dated found/no-emails files
#[derive(Debug, Clone)]
pub struct CsvOutput {
    found_path: PathBuf,
    no_emails_path: PathBuf,
    email_columns: usize,
}

impl CsvOutput {
    /// Creates a handler for the given run date
    pub fn new(directory: impl AsRef<Path>, date: NaiveDate, email_columns: usize) -> Self {
        let directory = directory.as_ref();
        let date = date.format("%Y-%m-%d");

        Self {
            found_path: directory.join(format!("found-emails {}.csv", date)),
            no_emails_path: directory.join(format!("no-emails {}.csv", date)),
            email_columns,
        }
    }

    /// Creates a handler for the current local date
    pub fn for_today(config: &OutputConfig) -> Self {
        Self::new(
            &config.directory,
            Local::now().date_naive(),
            config.email_columns,
        )
    }

    pub fn found_path(&self) -> &Path {
        &self.found_path
    }

    pub fn no_emails_path(&self) -> &Path {
        &self.no_emails_path
    }

    /// Header row: fixed columns followed by `Email 1..=N`
    pub fn header(&self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain((1..=self.email_columns).map(|i| format!("Email {}", i)))
            .collect()
    }

    /// Formats one record as a row
    ///
    /// Emails fill the `Email N` columns in order. Missing emails leave
    /// empty cells; emails beyond the column budget are appended as extra
    /// trailing cells.
    pub fn format_row(&self, record: &ScrapedRecord) -> Vec<String> {
        let details = record.details();

        let mut row = vec![
            text_cell(record.id()),
            text_cell(record.url()),
            optional_text_cell(details.title.as_deref()),
            optional_text_cell(details.developer.as_deref()),
            details
                .last_updated
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            number_cell(details.rating.as_deref()),
            number_cell(details.number_of_ratings.as_deref()),
            optional_text_cell(details.website.as_deref()),
            number_cell(details.price.as_deref()),
            if details.in_app_purchases.is_empty() {
                "No".to_string()
            } else {
                "Yes".to_string()
            },
            optional_text_cell(details.category.as_deref()),
        ];

        row.extend(record.all_emails().iter().map(|email| text_cell(email)));
        let width = FIXED_COLUMNS.len() + self.email_columns;
        if row.len() < width {
            row.resize(width, String::new());
        }
        row
    }

    fn append(&self, path: &Path, records: &[&ScrapedRecord]) -> OutputResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let needs_header = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quote_style(QuoteStyle::Never)
            .from_writer(file);

        let csv_error = |source: csv::Error| OutputError::Csv {
            path: path.display().to_string(),
            source,
        };

        if needs_header {
            writer.write_record(self.header()).map_err(csv_error)?;
        }
        for record in records {
            writer
                .write_record(self.format_row(record))
                .map_err(csv_error)?;
        }
        writer.flush()?;

        tracing::debug!("Appended {} rows to {}", records.len(), path.display());
        Ok(())
    }
}

impl OutputHandler for CsvOutput {
    fn record_batch(&mut self, records: &[ScrapedRecord]) -> OutputResult<()> {
        let (found, none): (Vec<&ScrapedRecord>, Vec<&ScrapedRecord>) =
            records.iter().partition(|record| record.has_emails());

        self.append(&self.found_path, &found)?;
        self.append(&self.no_emails_path, &none)?;
        Ok(())
    }
}

/// Replaces cell and row separators with spaces
fn text_cell(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, ',' | '\n' | '\r') { ' ' } else { c })
        .collect()
}

fn optional_text_cell(value: Option<&str>) -> String {
    value.map(text_cell).unwrap_or_default()
}

/// Drops thousands separators ("1,234" -> "1234")
fn number_cell(value: Option<&str>) -> String {
    value
        .map(|v| text_cell(&v.replace(',', "")))
        .unwrap_or_default()
}
