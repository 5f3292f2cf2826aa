//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers. The crawl
//! loop hands every completed batch to a handler before scraping the next
//! one.

use crate::record::ScrapedRecord;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output handlers
pub trait OutputHandler {
    /// Records one completed batch of scraped apps
    fn record_batch(&mut self, records: &[ScrapedRecord]) -> OutputResult<()>;

    /// Finalizes the output, performing any cleanup or final writes
    fn finalize(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

/// Output handler that keeps every batch in memory
///
/// Clones share the same storage, so a caller can keep one clone and hand
/// the other to a [`Coordinator`](crate::crawler::Coordinator).
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    batches: Arc<Mutex<Vec<Vec<ScrapedRecord>>>>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches recorded so far, in recording order
    pub fn batches(&self) -> Vec<Vec<ScrapedRecord>> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// All recorded records, flattened
    pub fn records(&self) -> Vec<ScrapedRecord> {
        self.batches().into_iter().flatten().collect()
    }
}

impl OutputHandler for MemoryOutput {
    fn record_batch(&mut self, records: &[ScrapedRecord]) -> OutputResult<()> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(records.to_vec());
        Ok(())
    }
}
