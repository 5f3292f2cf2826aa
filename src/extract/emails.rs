//! Email discovery on a single parsed page
//!
//! Three sources are combined:
//! - `mailto:` anchors
//! - Cloudflare-protected anchors, decoded with [`decode_protected_email`]
//! - addresses appearing in the text of common text-bearing elements

use crate::extract::codec::decode_protected_email;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

const PROTECTION_PATH: &str = "/cdn-cgi/l/email-protection";
const TEXT_ELEMENTS: &str = "span, p, div, li, h1, h2, h3, h4, h5, h6, dd, dt, a";

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email regex is valid")
});

/// Collects every email address on the page
///
/// The result is deduplicated, keeps first-seen order (anchors before free
/// text) and never contains empty entries.
pub fn harvest_emails(document: &Html) -> IndexSet<String> {
    emails_from_anchors(document)
        .into_iter()
        .chain(emails_from_text(document))
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty())
        .collect()
}

/// Addresses from `mailto:` and protected-email anchors
fn emails_from_anchors(document: &Html) -> Vec<String> {
    let mut emails = Vec::new();

    if let Ok(mailto) = Selector::parse("a[href^='mailto:']") {
        for anchor in document.select(&mailto) {
            if let Some(address) = anchor
                .value()
                .attr("href")
                .and_then(|href| href.strip_prefix("mailto:"))
            {
                emails.push(strip_query(address).trim().to_string());
            }
        }
    }

    // <a href="/cdn-cgi/l/email-protection#<hex>">
    if let Ok(fragment) = Selector::parse(&format!("a[href^='{}#']", PROTECTION_PATH)) {
        for anchor in document.select(&fragment) {
            if let Some(encoded) = anchor
                .value()
                .attr("href")
                .and_then(|href| href.strip_prefix(PROTECTION_PATH))
                .and_then(|rest| rest.strip_prefix('#'))
            {
                emails.push(decode_protected(encoded));
            }
        }
    }

    // <a href="/cdn-cgi/l/email-protection" data-cfemail="<hex>">
    if let Ok(attribute) = Selector::parse(&format!("a[href^='{}']", PROTECTION_PATH)) {
        for anchor in document.select(&attribute) {
            if let Some(encoded) = anchor.value().attr("data-cfemail") {
                emails.push(decode_protected(encoded));
            }
        }
    }

    emails
}

/// Addresses matched by the email pattern inside element text
fn emails_from_text(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse(TEXT_ELEMENTS) else {
        return Vec::new();
    };

    let mut emails = Vec::new();
    for element in document.select(&selector) {
        let text: String = element.text().collect();
        emails.extend(
            EMAIL_REGEX
                .find_iter(&text)
                .map(|m| m.as_str().trim().to_string()),
        );
    }
    emails
}

/// Decoded output is kept even when it is not address-shaped; it is only
/// logged so malformed keys can be spotted in the run log.
fn decode_protected(encoded: &str) -> String {
    let decoded = decode_protected_email(encoded.trim());
    let address = strip_query(&decoded).to_string();
    if !address.is_empty() && !EMAIL_REGEX.is_match(&address) {
        tracing::debug!("Protected email {} decoded to {:?}", encoded, address);
    }
    address
}

fn strip_query(address: &str) -> &str {
    address.split('?').next().unwrap_or_default()
}
