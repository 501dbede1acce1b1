//! Draft parsing and reply scaffolding.
//!
//! The draft file is a loose header block followed by a blank line and
//! the body. Parsing never fails: lines that do not look like headers
//! simply start the body, and missing fields stay empty so the send
//! path can complain about what actually matters (an empty `To:`).

use mailpager_mime::{Extraction, Headers};

use crate::account::OutgoingMessage;

/// Parses the draft file contents into an outgoing message.
///
/// Recognized headers are `To`, `CC`, `BCC`, `Subject` and
/// `In-Reply-To`, case-insensitive. Unrecognized header lines are
/// dropped. The header block ends at the first blank line or at the
/// first line without a colon, whichever comes first.
#[must_use]
pub fn parse_draft(text: &str) -> OutgoingMessage {
    let mut message = OutgoingMessage::default();
    let mut lines = text.lines();
    let mut body = Vec::new();

    for line in lines.by_ref() {
        if line.trim().is_empty() {
            break;
        }
        let Some((name, value)) = line.split_once(':') else {
            body.push(line);
            break;
        };
        let value = value.trim().to_string();
        match name.trim().to_ascii_lowercase().as_str() {
            "to" => message.to = value,
            "subject" => message.subject = value,
            "cc" if !value.is_empty() => message.cc = Some(value),
            "bcc" if !value.is_empty() => message.bcc = Some(value),
            "in-reply-to" if !value.is_empty() => message.in_reply_to = Some(value),
            _ => {}
        }
    }

    body.extend(lines);
    message.body = body.join("\n");
    message
}

/// Builds the header block seeding a reply to `headers`.
///
/// The recipient comes from `Reply-To` when present, otherwise `From`.
/// The subject gets a single `Re: ` prefix. `In-Reply-To` carries the
/// original `Message-ID` so threading survives on the far end.
#[must_use]
pub fn reply_headers(headers: &Headers) -> String {
    let to = headers
        .get_decoded("reply-to")
        .or_else(|| headers.get_decoded("from"))
        .unwrap_or_default();
    let subject = headers.get_decoded("subject").unwrap_or_default();
    let subject = if subject.to_ascii_lowercase().starts_with("re:") {
        subject
    } else {
        format!("Re: {subject}")
    };

    let mut block = format!("To: {to}\nSubject: {subject}\n");
    if let Some(message_id) = headers.get_decoded("message-id") {
        block.push_str(&format!("In-Reply-To: {message_id}\n"));
    }
    block.push('\n');
    block
}

/// Renders one message of an opened thread for the pager view.
pub fn message_view(headers: &Headers, extraction: &Extraction) -> String {
    let mut view = String::new();
    for name in ["From", "To", "CC", "Date", "Subject"] {
        if let Some(value) = headers.get_decoded(name) {
            view.push_str(&format!("{name}: {value}\n"));
        }
    }
    view.push('\n');
    view.push_str(&extraction.body);
    if !extraction.forward.is_empty() {
        view.push_str("\n---------- Forwarded message ----------\n");
        view.push_str(&extraction.forward);
    }
    view.push('\n');
    view
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_draft() {
        let draft = "To: a@example.com\nCC: b@example.com\nSubject: hi\n\nbody line one\nline two";
        let message = parse_draft(draft);
        assert_eq!(message.to, "a@example.com");
        assert_eq!(message.cc.as_deref(), Some("b@example.com"));
        assert_eq!(message.subject, "hi");
        assert_eq!(message.body, "body line one\nline two");
        assert!(message.bcc.is_none());
    }

    #[test]
    fn test_parse_headers_case_insensitive() {
        let message = parse_draft("tO: x\nsUbJeCt: y\n\nz");
        assert_eq!(message.to, "x");
        assert_eq!(message.subject, "y");
    }

    #[test]
    fn test_line_without_colon_starts_body() {
        let message = parse_draft("To: x\nnot a header\nmore body");
        assert_eq!(message.to, "x");
        assert_eq!(message.body, "not a header\nmore body");
    }

    #[test]
    fn test_empty_draft() {
        let message = parse_draft("");
        assert!(message.to.is_empty());
        assert!(message.body.is_empty());
    }

    #[test]
    fn test_reply_prefers_reply_to() {
        let mut headers = Headers::new();
        headers.add("From", "a@example.com");
        headers.add("Reply-To", "list@example.com");
        headers.add("Subject", "topic");
        headers.add("Message-ID", "<m1@example.com>");

        let block = reply_headers(&headers);
        assert!(block.contains("To: list@example.com\n"));
        assert!(block.contains("Subject: Re: topic\n"));
        assert!(block.contains("In-Reply-To: <m1@example.com>\n"));
        assert!(block.ends_with("\n\n"));
    }

    #[test]
    fn test_reply_does_not_stack_re_prefixes() {
        let mut headers = Headers::new();
        headers.add("From", "a@example.com");
        headers.add("Subject", "Re: topic");
        let block = reply_headers(&headers);
        assert!(block.contains("Subject: Re: topic\n"));
        assert!(!block.contains("Re: Re:"));
    }

    #[test]
    fn test_message_view_appends_forward() {
        let mut headers = Headers::new();
        headers.add("From", "a@example.com");
        headers.add("Subject", "s");
        let extraction = Extraction {
            body: "body".to_string(),
            forward: "fwd".to_string(),
        };
        let view = message_view(&headers, &extraction);
        assert!(view.contains("From: a@example.com\n"));
        assert!(view.contains("body"));
        assert!(view.contains("Forwarded message"));
        assert!(view.contains("fwd"));
    }
}
