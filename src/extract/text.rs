//! Text normalization for extracted fragments
//!
//! App Store markup is full of zero-width joiners, bidi marks and
//! non-breaking spaces. Everything that ends up in a CSV cell goes through
//! [`clean_text`] first.

use scraper::ElementRef;

/// Normalizes an extracted text fragment
///
/// 1. Removes zero-width and bidirectional-control characters
/// 2. Drops non-ASCII characters, keeping whitespace, currency symbols
///    (U+00A2..=U+00A5, U+20A0..=U+20CF) and U+0080
/// 3. Collapses whitespace runs to a single space and trims
///
/// Absent input stays absent. The function is idempotent.
///
/// # Examples
///
/// ```
/// use app_harvest::extract::clean_text;
///
/// assert_eq!(
///     clean_text(Some("\u{200B} Hello\u{00A0}\n  World\u{200F} ")),
///     Some("Hello World".to_string())
/// );
/// assert_eq!(clean_text(None), None);
/// ```
pub fn clean_text(raw: Option<&str>) -> Option<String> {
    let raw = raw?;

    let kept: String = raw
        .chars()
        .filter(|&c| !is_invisible(c))
        .filter(|&c| is_kept(c))
        .collect();

    Some(kept.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Collects the text of an element and normalizes it
pub fn element_text(element: Option<ElementRef<'_>>) -> Option<String> {
    let text = element.map(|el| el.text().collect::<String>());
    clean_text(text.as_deref())
}

fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2028}'..='\u{202F}' | '\u{FEFF}'
    )
}

fn is_kept(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{80}' | '\u{A2}'..='\u{A5}' | '\u{20A0}'..='\u{20CF}')
        || c.is_whitespace()
}
