//! Charset normalization.
//!
//! Everything the client displays is UTF-8. Parts arrive with a declared
//! charset that may be wrong or unsupported, so every conversion here
//! degrades to passing the input through rather than failing: the reader
//! would rather see mildly garbled text than nothing.

use encoding_rs::{Encoding, WINDOWS_1252};

/// Decodes octets declared to be in `label` into UTF-8 text.
///
/// Unknown labels, a missing label, or byte sequences invalid for the
/// declared charset all fall back to treating the octets as UTF-8 (lossy
/// as a last resort).
#[must_use]
pub fn to_utf8(octets: &[u8], label: Option<&str>) -> String {
    if let Some(label) = label
        && let Some(enc) = Encoding::for_label_no_replacement(label.as_bytes())
    {
        let (text, _, had_errors) = enc.decode(octets);
        if !had_errors {
            return text.into_owned();
        }
    }
    String::from_utf8_lossy(octets).into_owned()
}

/// Re-encodes UTF-8 text as ISO-8859-1 octets for the HTML filter.
///
/// Returns `None` when the text contains characters outside the Latin-1
/// range; the caller then passes the UTF-8 bytes through unmodified.
#[must_use]
pub fn to_latin1(text: &str) -> Option<Vec<u8>> {
    // windows-1252 is the encoding_rs stand-in for iso-8859-1 output
    let (octets, _, had_errors) = WINDOWS_1252.encode(text);
    if had_errors {
        None
    } else {
        Some(octets.into_owned())
    }
}

/// Decodes ISO-8859-1 octets coming back from the HTML filter.
#[must_use]
pub fn from_latin1(octets: &[u8]) -> String {
    let (text, _, _) = WINDOWS_1252.decode(octets);
    text.into_owned()
}
