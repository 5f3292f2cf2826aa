use url::Url;

const APP_STORE_HOST: &str = "apps.apple.com";
const US_STOREFRONT: &str = "us";

/// Rewrites an App Store URL to the US storefront
///
/// The first path segment of an `apps.apple.com` URL is the two-letter
/// storefront code. Any storefront other than `us` is replaced; every other
/// URL (other hosts, storefront-less paths, unparsable input) is returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use app_harvest::url::to_us_storefront;
///
/// assert_eq!(
///     to_us_storefront("https://apps.apple.com/gb/app/x/id1"),
///     "https://apps.apple.com/us/app/x/id1"
/// );
/// assert_eq!(
///     to_us_storefront("https://apps.apple.com/us/app/x/id1"),
///     "https://apps.apple.com/us/app/x/id1"
/// );
/// ```
pub fn to_us_storefront(url_str: &str) -> String {
    let Ok(mut url) = Url::parse(url_str) else {
        return url_str.to_string();
    };

    if url.host_str() != Some(APP_STORE_HOST) {
        return url_str.to_string();
    }

    let mut segments: Vec<String> = match url.path_segments() {
        Some(segments) => segments.map(str::to_string).collect(),
        None => return url_str.to_string(),
    };

    let Some(region) = segments.first().cloned() else {
        return url_str.to_string();
    };

    if region == US_STOREFRONT || !is_storefront_code(&region) {
        return url_str.to_string();
    }

    segments[0] = US_STOREFRONT.to_string();
    url.set_path(&segments.join("/"));

    tracing::trace!("Rewrote storefront {} -> us for {}", region, url_str);
    url.to_string()
}

/// Storefront codes are two ASCII letters (`gb`, `de`, `jp`, ...)
fn is_storefront_code(segment: &str) -> bool {
    segment.len() == 2 && segment.chars().all(|c| c.is_ascii_alphabetic())
}
