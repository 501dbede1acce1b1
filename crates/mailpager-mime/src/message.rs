//! MIME message tree and parser.
//!
//! A message is either a leaf carrying a payload or a container of child
//! messages, never both. `multipart/*` containers hold their sub-parts;
//! `message/rfc822` parts are containers holding the single embedded
//! message, so a forwarded message's own parts are reachable by the same
//! traversal as everything else.

use crate::content_type::ContentType;
use crate::encoding::{decode_base64_lenient, decode_quoted_printable};
use crate::header::Headers;

/// Transfer encoding types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    /// 7-bit ASCII.
    SevenBit,
    /// 8-bit binary.
    EightBit,
    /// Base64 encoding.
    Base64,
    /// Quoted-Printable encoding.
    QuotedPrintable,
    /// Binary (no encoding).
    Binary,
}

impl TransferEncoding {
    /// Parses transfer encoding from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "8bit" => Self::EightBit,
            "base64" => Self::Base64,
            "quoted-printable" => Self::QuotedPrintable,
            "binary" => Self::Binary,
            _ => Self::SevenBit, // Default (includes "7bit")
        }
    }
}

/// A node in the MIME tree.
#[derive(Debug, Clone)]
pub enum Message {
    /// A part holding an actual byte payload.
    Leaf {
        /// Parsed content type of the part.
        content_type: ContentType,
        /// Part headers.
        headers: Headers,
        /// Raw, still transfer-encoded payload.
        payload: Vec<u8>,
    },
    /// A container of ordered child messages.
    Container {
        /// Parsed content type of the container.
        content_type: ContentType,
        /// Container headers.
        headers: Headers,
        /// Ordered children; a `message/rfc822` container has exactly one.
        children: Vec<Message>,
    },
}

impl Message {
    /// Parses a raw message source into a tree.
    ///
    /// Parsing is infallible by policy: a missing or unparseable content
    /// type defaults to `text/plain`, and a multipart declaration without
    /// a usable boundary degrades to a leaf. Displaying something always
    /// beats refusing the message.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let (header_text, body) = split_headers_body(source);
        let headers = Headers::parse(header_text);
        let content_type = headers
            .get("content-type")
            .and_then(|v| ContentType::parse(v).ok())
            .unwrap_or_else(ContentType::text_plain);

        if content_type.is_embedded_message() {
            let inner = Self::parse(body);
            return Self::Container {
                content_type,
                headers,
                children: vec![inner],
            };
        }

        if content_type.is_multipart()
            && let Some(boundary) = content_type.boundary()
        {
            let children: Vec<Self> = split_multipart(body, boundary)
                .into_iter()
                .map(|part| Self::parse(&part))
                .collect();
            if !children.is_empty() {
                return Self::Container {
                    content_type,
                    headers,
                    children,
                };
            }
        }

        Self::Leaf {
            content_type,
            headers,
            payload: body.as_bytes().to_vec(),
        }
    }

    /// Returns the content type of this node.
    #[must_use]
    pub fn content_type(&self) -> &ContentType {
        match self {
            Self::Leaf { content_type, .. } | Self::Container { content_type, .. } => content_type,
        }
    }

    /// Returns the headers of this node.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        match self {
            Self::Leaf { headers, .. } | Self::Container { headers, .. } => headers,
        }
    }

    /// Checks whether this node's `type/subtype` equals `target`.
    #[must_use]
    pub fn is_type(&self, target: &str) -> bool {
        self.content_type().essence() == target
    }

    /// Returns true for container nodes.
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Container { .. })
    }

    /// Returns the children of a container, empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Container { children, .. } => children,
            Self::Leaf { .. } => &[],
        }
    }

    /// Gets the transfer encoding declared on this node.
    #[must_use]
    pub fn transfer_encoding(&self) -> TransferEncoding {
        self.headers()
            .get("content-transfer-encoding")
            .map_or(TransferEncoding::SevenBit, TransferEncoding::parse)
    }

    /// Decodes the leaf payload according to its transfer encoding.
    ///
    /// Containers yield an empty payload. Decode failures fall back to
    /// the raw payload bytes; this step never loses the message.
    #[must_use]
    pub fn decode_payload(&self) -> Vec<u8> {
        let Self::Leaf { payload, .. } = self else {
            return Vec::new();
        };

        match self.transfer_encoding() {
            TransferEncoding::Base64 => {
                let text = String::from_utf8_lossy(payload);
                decode_base64_lenient(&text).unwrap_or_else(|_| payload.clone())
            }
            TransferEncoding::QuotedPrintable => {
                let text = String::from_utf8_lossy(payload);
                decode_quoted_printable(&text).unwrap_or_else(|_| payload.clone())
            }
            _ => payload.clone(),
        }
    }
}

/// Splits a raw message into its header block and body at the first blank
/// line, whichever line-ending convention comes first.
fn split_headers_body(message: &str) -> (&str, &str) {
    let crlf = message.find("\r\n\r\n");
    let lf = message.find("\n\n");

    match (crlf, lf) {
        (Some(c), Some(l)) if c < l => (&message[..c], &message[c + 4..]),
        (Some(c), None) => (&message[..c], &message[c + 4..]),
        (_, Some(l)) => (&message[..l], &message[l + 2..]),
        (None, None) => (message, ""),
    }
}

/// Splits a multipart body into its sub-part sources using the boundary.
fn split_multipart(body: &str, boundary: &str) -> Vec<String> {
    let delimiter = format!("--{boundary}");
    let end_delimiter = format!("--{boundary}--");

    let mut parts = Vec::new();

    for part in body.split(&delimiter) {
        let trimmed = part.trim_start_matches(['\r', '\n']).trim_end();

        // Skip the preamble, empty chunks, and the closing "--" remainder
        if trimmed.is_empty() || trimmed.starts_with("--") {
            continue;
        }

        let clean = trimmed.strip_suffix(&end_delimiter).unwrap_or(trimmed);
        if !clean.trim().is_empty() {
            parts.push(clean.to_string());
        }
    }

    parts
}
