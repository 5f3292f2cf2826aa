//! URL handling module for App-Harvest
//!
//! App Store listing URLs carry a storefront region and end in the app's
//! identifier, e.g. `https://apps.apple.com/us/app/name/id123456789`. This
//! module derives identifiers from such URLs and rewrites foreign storefronts
//! to the US one.

mod normalize;

pub use normalize::to_us_storefront;

/// Derives the app identifier from an App Store URL
///
/// The identifier is the last non-empty path segment with any query string
/// or fragment removed, so a trailing `/` is ignored. Inputs that are not URLs at all still produce their final
/// `/`-separated segment, so the result is always usable as a map key.
///
/// # Examples
///
/// ```
/// use app_harvest::url::app_id_from_url;
///
/// assert_eq!(
///     app_id_from_url("https://apps.apple.com/us/app/name/id123456789"),
///     "id123456789"
/// );
/// assert_eq!(
///     app_id_from_url("https://apps.apple.com/us/app/name/id123456789?see-all=reviews"),
///     "id123456789"
/// );
/// ```
pub fn app_id_from_url(url: &str) -> String {
    let without_suffix = url.split(['?', '#']).next().unwrap_or_default();
    without_suffix
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}
