//! Crawl frontier: what to scrape next and what to never scrape again
//!
//! The frontier is a plain value. Each crawl step consumes it and produces
//! the next one with [`Frontier::advance`], so the accumulated ignore set and
//! the round counter are always explicit.

use crate::record::ScrapedRecord;
use crate::url::{app_id_from_url, to_us_storefront};
use std::collections::HashSet;

/// URLs pending in the current round plus the IDs already processed
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    pending: Vec<String>,
    ignored: HashSet<String>,
    completed_steps: u32,
}

impl Frontier {
    /// Creates the initial frontier from input URLs and an ignore list
    ///
    /// URLs are rewritten to the US storefront. URLs whose app ID is in
    /// `ignored_ids` are dropped, as are repeated app IDs within the input.
    /// Ignore entries may be bare IDs or full listing URLs.
    pub fn new<U, I>(urls: U, ignored_ids: I) -> Self
    where
        U: IntoIterator,
        U::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let ignored: HashSet<String> = ignored_ids
            .into_iter()
            .map(|entry| app_id_from_url(entry.as_ref().trim()))
            .filter(|id| !id.is_empty())
            .collect();

        let pending = unvisited(
            urls.into_iter().map(|url| url.as_ref().trim().to_string()),
            &ignored,
        );

        Self {
            pending,
            ignored,
            completed_steps: 0,
        }
    }

    /// URLs to scrape in the current round
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of rounds already scraped
    pub fn completed_steps(&self) -> u32 {
        self.completed_steps
    }

    /// Returns true if `url`'s app ID has already been processed
    pub fn is_ignored(&self, url: &str) -> bool {
        self.ignored.contains(&app_id_from_url(url))
    }

    pub fn ignored_count(&self) -> usize {
        self.ignored.len()
    }

    /// Moves the pending URLs out, leaving the round empty
    pub fn take_pending(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    /// Produces the frontier for the next round
    ///
    /// Every scraped record's ID joins the ignore set. While fewer than
    /// `depth` expansion rounds have run, the next round holds the related
    /// apps of `results` that have not been processed yet; otherwise it is
    /// empty and the crawl ends.
    pub fn advance(mut self, results: &[ScrapedRecord], depth: u32) -> Self {
        for record in results {
            self.ignored.insert(record.id().to_string());
        }
        for url in self.pending.drain(..) {
            self.ignored.insert(app_id_from_url(&url));
        }

        self.completed_steps += 1;

        self.pending = if self.completed_steps <= depth {
            unvisited(
                results
                    .iter()
                    .flat_map(|record| record.other_apps().iter().cloned()),
                &self.ignored,
            )
        } else {
            Vec::new()
        };

        self
    }
}

/// Canonicalizes URLs and keeps the first URL of each app not yet processed
fn unvisited(urls: impl Iterator<Item = String>, ignored: &HashSet<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();

    urls.map(|url| to_us_storefront(&url))
        .filter(|url| {
            let id = app_id_from_url(url);
            if id.is_empty() {
                tracing::warn!("Skipping {:?}: no app ID in URL", url);
                return false;
            }
            !ignored.contains(&id) && seen.insert(id)
        })
        .collect()
}
