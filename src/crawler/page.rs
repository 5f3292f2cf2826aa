//! Single-page scrape: listing metadata plus emails from linked pages
//!
//! `Html` documents are parsed and dropped inside synchronous helpers so no
//! parsed document is ever held across an `.await`.

use crate::crawler::fetcher::fetch_page;
use crate::extract::{extract_details, extract_outbound_links, harvest_emails};
use crate::record::{AppDetails, EmailsByUrl, ScrapedRecord};
use crate::url::app_id_from_url;
use indexmap::IndexSet;
use reqwest::Client;
use scraper::Html;

/// Everything read from the listing page itself
struct ListingAnalysis {
    details: AppDetails,
    outbound_links: Vec<String>,
    emails: IndexSet<String>,
}

/// Scrapes one App Store listing
///
/// # Flow
///
/// 1. Derive the app ID from the URL
/// 2. Fetch the listing; on failure return a minimal record (id and url)
/// 3. Run every field rule against the listing
/// 4. Harvest emails from the listing, keyed by its URL
/// 5. Fetch each outbound link in turn and harvest its emails; a failed
///    fetch records an empty set for that link
/// 6. Merge the per-URL sets into the record's email union
///
/// Never fails: all failure is represented as missing data in the record.
pub async fn scrape_app_page(client: &Client, url: &str) -> ScrapedRecord {
    tracing::info!("Scraping page: {}", url);

    let app_id = app_id_from_url(url);
    let Some(body) = fetch_page(client, url).await else {
        return ScrapedRecord::minimal(app_id, url);
    };

    let analysis = analyze_listing(&body);
    drop(body);

    let mut emails_by_url = EmailsByUrl::new();
    emails_by_url.insert(url.to_string(), analysis.emails);

    for link in &analysis.outbound_links {
        let emails = emails_from_url(client, link).await;
        tracing::debug!("Found {} emails on {}", emails.len(), link);
        // A link equal to the listing URL must not erase the listing's own set
        emails_by_url.entry(link.clone()).or_default().extend(emails);
    }

    let record = ScrapedRecord::new(app_id, url, analysis.details, emails_by_url);
    tracing::debug!(
        "Scraped {}: {:?}, {} emails, {} related apps",
        record.id(),
        record.details().title,
        record.all_emails().len(),
        record.other_apps().len()
    );
    record
}

/// Fetches a secondary page and harvests its emails
///
/// A page that cannot be fetched contributes an empty set.
pub async fn emails_from_url(client: &Client, url: &str) -> IndexSet<String> {
    match fetch_page(client, url).await {
        Some(body) => emails_in_html(&body),
        None => IndexSet::new(),
    }
}

fn analyze_listing(body: &str) -> ListingAnalysis {
    let document = Html::parse_document(body);

    ListingAnalysis {
        details: extract_details(&document),
        outbound_links: extract_outbound_links(&document),
        emails: harvest_emails(&document),
    }
}

fn emails_in_html(body: &str) -> IndexSet<String> {
    let document = Html::parse_document(body);
    harvest_emails(&document)
}
