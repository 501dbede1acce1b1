//! Body and forward candidate selection for multipart messages.

use crate::message::Message;
use crate::walk::scan;

/// The chosen body part and forwarded-message part of a multipart tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolved<'a> {
    /// The part holding the message's own displayable text.
    pub body: Option<&'a Message>,
    /// The part holding the text of an embedded forwarded message.
    pub forward: Option<&'a Message>,
}

/// Picks the best body part and the best forward part of `root`.
///
/// Forwarded `message/rfc822` subtrees are collected first so their text
/// parts can be excluded from the outer message's own candidates;
/// otherwise the forward's content would show up twice. HTML is preferred
/// over plain text on both sides because webmail usually sends both
/// renditions of the same content and the HTML one survives flattening
/// better.
///
/// Note: the plain candidates are filtered with the HTML exclusion set,
/// so the plain part of a plain-text-only forward is NOT excluded from
/// the outer plain list. Long-shipped behavior, kept as is; pinned by a
/// regression test rather than corrected.
#[must_use]
pub fn resolve(root: &Message) -> Resolved<'_> {
    let forwards = scan(root, "message/rfc822");

    let mut forwards_html: Vec<&Message> = Vec::new();
    let mut forwards_plain: Vec<&Message> = Vec::new();
    for fwd in &forwards {
        forwards_html.extend(scan(fwd, "text/html"));
        forwards_plain.extend(scan(fwd, "text/plain"));
    }

    let html: Vec<&Message> = scan(root, "text/html")
        .into_iter()
        .filter(|part| !contains(&forwards_html, part))
        .collect();
    let plain: Vec<&Message> = scan(root, "text/plain")
        .into_iter()
        .filter(|part| !contains(&forwards_html, part))
        .collect();

    Resolved {
        body: html.first().or_else(|| plain.first()).copied(),
        forward: forwards_html
            .first()
            .or_else(|| forwards_plain.first())
            .copied(),
    }
}

/// Identity-based membership test: two parts are the same only when they
/// are the same node, not when they merely look alike.
fn contains(set: &[&Message], part: &Message) -> bool {
    set.iter().any(|member| std::ptr::eq(*member, part))
}
