//! The extraction facade: one call from raw source to display text.

use crate::message::Message;
use crate::render::{HtmlRenderer, materialize};
use crate::resolve::resolve;

/// The displayable content of one message source.
///
/// Both fields are always present; an empty string means "no such
/// content", which callers can tell apart from whitespace-only text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// The message's own body text.
    pub body: String,
    /// The text of an embedded forwarded message, if any.
    pub forward: String,
}

/// Extracts the body and forward text from a raw message source.
///
/// Multipart roots go through candidate resolution; a single-part root is
/// materialized directly and never has a forward.
#[must_use]
pub fn extract(source: &str, renderer: &dyn HtmlRenderer) -> Extraction {
    let root = Message::parse(source);

    if root.is_multipart() {
        let resolved = resolve(&root);
        Extraction {
            body: resolved
                .body
                .map(|part| materialize(part, renderer))
                .unwrap_or_default(),
            forward: resolved
                .forward
                .map(|part| materialize(part, renderer))
                .unwrap_or_default(),
        }
    } else {
        Extraction {
            body: materialize(&root, renderer),
            forward: String::new(),
        }
    }
}
