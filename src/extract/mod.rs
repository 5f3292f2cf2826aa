//! Extraction engine for App Store listing pages
//!
//! This module turns a parsed HTML document into structured data:
//! - Text normalization for every extracted fragment
//! - Field rules for listing metadata (title, developer, rating, ...)
//! - Email harvesting, including Cloudflare-protected addresses
//!
//! Every function here is pure and infallible. Missing markup produces
//! missing values, never errors.

mod codec;
mod emails;
mod fields;
mod text;

pub use codec::decode_protected_email;
pub use emails::harvest_emails;
pub use fields::{
    expand_count, extract_category, extract_details, extract_developer, extract_in_app_purchases,
    extract_last_updated, extract_number_of_ratings, extract_outbound_links, extract_price,
    extract_rating, extract_related_apps, extract_title, extract_website,
};
pub use text::{clean_text, element_text};
