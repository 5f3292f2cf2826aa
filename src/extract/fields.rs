//! Field extraction rules for App Store listing pages
//!
//! Each rule reads one attribute from a parsed listing and tolerates missing
//! markup by returning `None` or an empty `Vec`. Listing pages identify their
//! interesting links through `data-metrics-click` / `data-metrics-location`
//! JSON payloads; a payload that fails to parse is treated as not matching.

use crate::extract::text::{clean_text, element_text};
use crate::record::{AppDetails, InAppPurchase};
use chrono::{DateTime, NaiveDate};
use indexmap::IndexSet;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

const EXTENSION_LINKS: &str = "ul.inline-list.inline-list--app-extensions > li > a";
const RATING_CAPTION: &str = "figcaption.we-rating-count";
const IAP_ROWS: &str = r#"dd.information-list__item__definition > ol[role="table"] > div > li"#;
const APP_STORE_PREFIX: &str = "https://apps.apple.com/";

/// Runs every field rule against a parsed listing
pub fn extract_details(document: &Html) -> AppDetails {
    AppDetails {
        title: extract_title(document),
        developer: extract_developer(document),
        last_updated: extract_last_updated(document),
        rating: extract_rating(document),
        number_of_ratings: extract_number_of_ratings(document),
        website: extract_website(document),
        price: extract_price(document),
        in_app_purchases: extract_in_app_purchases(document),
        category: extract_category(document),
        other_apps: extract_related_apps(document),
    }
}

/// App name from the primary heading, without badge text such as "4+"
pub fn extract_title(document: &Html) -> Option<String> {
    let heading = select_first(document, "h1")?;
    let text = text_excluding(heading, "span");
    non_empty(clean_text(Some(&text)))
}

pub fn extract_developer(document: &Html) -> Option<String> {
    non_empty(element_text(select_first(
        document,
        "h2.product-header__identity > a",
    )))
}

/// Developer website: the extension link whose click metrics mark it as
/// the "developer" action
pub fn extract_website(document: &Html) -> Option<String> {
    let selector = Selector::parse(EXTENSION_LINKS).ok()?;

    let link = document.select(&selector).find(|link| {
        metrics(link, "data-metrics-click")
            .map(|json| json["actionDetails"]["type"].as_str() == Some("developer"))
            .unwrap_or(false)
    })?;

    link.value().attr("href").map(str::to_string)
}

/// Every extension link target (website, privacy policy, support page)
///
/// These are the secondary pages that get searched for emails. Duplicate
/// targets are listed once.
pub fn extract_outbound_links(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse(EXTENSION_LINKS) else {
        return Vec::new();
    };

    let links: IndexSet<String> = document
        .select(&selector)
        .filter_map(|link| link.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect();
    links.into_iter().collect()
}

/// Average rating, the first token of the "4,5 • 1.2K Ratings" caption
pub fn extract_rating(document: &Html) -> Option<String> {
    let caption = non_empty(element_text(select_first(document, RATING_CAPTION)))?;
    let caption = caption.replace(',', ".");
    caption.split(' ').next().map(str::to_string)
}

/// Number of ratings, the second token of the rating caption
///
/// `K` and `M` suffixes are expanded so "1.2K" becomes "1200". Captions
/// with fewer than three tokens (no ratings yet) yield `None`.
pub fn extract_number_of_ratings(document: &Html) -> Option<String> {
    let caption = element_text(select_first(document, RATING_CAPTION))?;
    let tokens: Vec<&str> = caption.split(' ').collect();
    if tokens.len() < 3 {
        return None;
    }
    expand_count(tokens[1])
}

/// Expands a count token with an optional `K`/`M` suffix
pub fn expand_count(token: &str) -> Option<String> {
    let (digits, multiplier) = if let Some(digits) = token.strip_suffix('K') {
        (digits, 1_000.0)
    } else if let Some(digits) = token.strip_suffix('M') {
        (digits, 1_000_000.0)
    } else {
        return Some(token.to_string());
    };

    let value: f64 = digits.replace(',', ".").parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(((value * multiplier).round() as u64).to_string())
}

/// Last update date from the version-history `<time class="">` element
pub fn extract_last_updated(document: &Html) -> Option<NaiveDate> {
    let selector = Selector::parse("time[datetime]").ok()?;

    let datetime = document
        .select(&selector)
        .find(|el| el.value().attr("class") == Some(""))
        .and_then(|el| el.value().attr("datetime"))?;

    parse_calendar_date(datetime)
}

fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }

    let date_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Listings on the "customers also bought" shelf
pub fn extract_related_apps(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse(&format!("a[href^='{}']", APP_STORE_PREFIX)) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|anchor| {
            metrics(anchor, "data-metrics-location")
                .map(|json| json["locationType"].as_str() == Some("shelfCustomersAlsoBoughtApps"))
                .unwrap_or(false)
        })
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Category name from the link that targets the genre page
pub fn extract_category(document: &Html) -> Option<String> {
    let selector = Selector::parse("a.link").ok()?;

    let link = document.select(&selector).find(|link| {
        metrics(link, "data-metrics-click")
            .map(|json| json["targetId"].as_str() == Some("GenrePage"))
            .unwrap_or(false)
    });

    non_empty(element_text(link))
}

pub fn extract_price(document: &Html) -> Option<String> {
    non_empty(element_text(select_first(
        document,
        "li.app-header__list__item--price",
    )))
}

/// In-app purchases table; the last two spans of each row are name and price
pub fn extract_in_app_purchases(document: &Html) -> Vec<InAppPurchase> {
    let (Ok(rows), Ok(spans)) = (Selector::parse(IAP_ROWS), Selector::parse("span")) else {
        return Vec::new();
    };

    document
        .select(&rows)
        .filter_map(|row| {
            let cells: Vec<ElementRef> = row.select(&spans).collect();
            let [.., name, price] = cells.as_slice() else {
                return None;
            };

            let name = non_empty(element_text(Some(*name)))?;
            let price = non_empty(element_text(Some(*price)))?;
            Some(InAppPurchase { name, price })
        })
        .collect()
}

fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    let first = document.select(&selector).next();
    first
}

fn metrics(element: &ElementRef, attribute: &str) -> Option<Value> {
    let raw = element.value().attr(attribute)?;
    match serde_json::from_str(raw) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::debug!("Ignoring malformed {} payload: {}", attribute, e);
            None
        }
    }
}

/// Text of `element` with text nested inside `excluded` tags left out
fn text_excluding(element: ElementRef, excluded: &str) -> String {
    let mut text = String::new();

    for node in element.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let inside_excluded = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != element.id())
            .any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map(|el| el.name() == excluded)
                    .unwrap_or(false)
            });

        if !inside_excluded {
            text.push_str(fragment);
        }
    }

    text
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
