//! Decoder for Cloudflare-style protected email addresses
//!
//! Protected markup stores an address as hex: the first byte is an XOR key,
//! every following byte is one character of the address XOR'd with that key.

/// Decodes a protected email hex string
///
/// Never fails. Malformed input decodes best-effort: a pair that is not
/// valid hex counts as byte `0`, a trailing odd digit is parsed on its own,
/// and an empty string decodes to an empty string. The output is not checked
/// for being an email address.
///
/// # Examples
///
/// ```
/// use app_harvest::extract::decode_protected_email;
///
/// // key 0x42, "a@b.co"
/// assert_eq!(decode_protected_email("422302206c212d"), "a@b.co");
/// ```
pub fn decode_protected_email(encoded: &str) -> String {
    let mut bytes = encoded.as_bytes().chunks(2).map(parse_hex_byte);

    let Some(key) = bytes.next() else {
        return String::new();
    };

    bytes.map(|byte| char::from(byte ^ key)).collect()
}

fn parse_hex_byte(chunk: &[u8]) -> u8 {
    std::str::from_utf8(chunk)
        .ok()
        .and_then(|digits| u8::from_str_radix(digits, 16).ok())
        .unwrap_or(0)
}
