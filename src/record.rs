//! The per-app result of a scrape
//!
//! A [`ScrapedRecord`] is built exactly once by the page scraper and is then
//! only read: by the crawl loop (for related apps and statistics) and by the
//! CSV writer.

use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};

/// One in-app purchase row from the listing's information section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InAppPurchase {
    pub name: String,
    pub price: String,
}

/// Listing metadata extracted from an app page
///
/// Every field is independently optional: markup that is missing from the
/// page leaves the corresponding field empty without affecting the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppDetails {
    pub title: Option<String>,
    pub developer: Option<String>,
    pub last_updated: Option<NaiveDate>,
    /// Average rating as displayed, with a `.` decimal separator
    pub rating: Option<String>,
    /// Number of ratings as a plain integer string
    pub number_of_ratings: Option<String>,
    pub website: Option<String>,
    pub price: Option<String>,
    pub in_app_purchases: Vec<InAppPurchase>,
    pub category: Option<String>,
    /// "Customers also bought" listing URLs, in page order
    pub other_apps: Vec<String>,
}

/// Emails found on each visited URL, keyed in visiting order
pub type EmailsByUrl = IndexMap<String, IndexSet<String>>;

/// The structured result of scraping one app page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedRecord {
    id: String,
    url: String,
    details: AppDetails,
    emails_by_url: EmailsByUrl,
    all_emails: IndexSet<String>,
}

impl ScrapedRecord {
    /// Creates the degraded record returned when the page could not be fetched
    pub fn minimal(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            details: AppDetails::default(),
            emails_by_url: EmailsByUrl::new(),
            all_emails: IndexSet::new(),
        }
    }

    /// Creates a fully populated record
    ///
    /// `all_emails` is derived here as the first-seen-order union of every
    /// set in `emails_by_url`, so the two can never disagree.
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        details: AppDetails,
        emails_by_url: EmailsByUrl,
    ) -> Self {
        let all_emails = emails_by_url.values().flatten().cloned().collect();

        Self {
            id: id.into(),
            url: url.into(),
            details,
            emails_by_url,
            all_emails,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn details(&self) -> &AppDetails {
        &self.details
    }

    pub fn emails_by_url(&self) -> &EmailsByUrl {
        &self.emails_by_url
    }

    pub fn all_emails(&self) -> &IndexSet<String> {
        &self.all_emails
    }

    pub fn other_apps(&self) -> &[String] {
        &self.details.other_apps
    }

    pub fn has_emails(&self) -> bool {
        !self.all_emails.is_empty()
    }

    /// Returns true for records produced by [`ScrapedRecord::minimal`]
    pub fn is_minimal(&self) -> bool {
        self.emails_by_url.is_empty() && self.details == AppDetails::default()
    }
}
