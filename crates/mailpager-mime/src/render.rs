//! Body materialization: turning a chosen part into displayable text.

use crate::charset;
use crate::message::Message;
use std::io::Write;
use std::process::{Command, Stdio};

/// Flattens HTML into plain text.
///
/// The production implementation shells out to `html2text`; tests inject
/// fakes. Input and output are ISO-8859-1 octets because that is what the
/// filter historically speaks.
pub trait HtmlRenderer {
    /// Renders HTML octets into plain-text octets.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the filter cannot be run; the caller
    /// falls back to the unrendered text.
    fn render(&self, input: &[u8]) -> std::io::Result<Vec<u8>>;
}

/// `html2text -nobs` subprocess renderer.
#[derive(Debug, Clone, Default)]
pub struct Html2Text;

impl HtmlRenderer for Html2Text {
    fn render(&self, input: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut child = Command::new("html2text")
            .arg("-nobs")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(stdin) = child.stdin.take() {
            let mut stdin = stdin;
            stdin.write_all(input)?;
        }

        let output = child.wait_with_output()?;
        Ok(output.stdout)
    }
}

/// Materializes a part into UTF-8 display text.
///
/// Steps, each with a non-fatal fallback:
/// 1. transfer-encoding decode (falls back to the raw payload),
/// 2. declared-charset decode to UTF-8 (falls back to pass-through),
/// 3. for `text/html`, re-encode to ISO-8859-1 when the text fits,
///    run the renderer and decode its Latin-1 output; on any failure the
///    unrendered text is kept,
/// 4. strip carriage returns.
///
/// Never fails: malformed input degrades to best-effort text.
#[must_use]
pub fn materialize(part: &Message, renderer: &dyn HtmlRenderer) -> String {
    let octets = part.decode_payload();
    let mut text = charset::to_utf8(&octets, part.content_type().charset());

    if part.is_type("text/html") {
        text = render_html(&text, renderer);
    }

    text.replace('\r', "")
}

fn render_html(text: &str, renderer: &dyn HtmlRenderer) -> String {
    // The filter expects Latin-1; text outside that range goes in as-is.
    let input = charset::to_latin1(text).unwrap_or_else(|| text.as_bytes().to_vec());

    match renderer.render(&input) {
        Ok(output) => charset::from_latin1(&output),
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Renderer that records its input and answers with a fixed string.
    struct FakeRenderer(Vec<u8>);

    impl HtmlRenderer for FakeRenderer {
        fn render(&self, _input: &[u8]) -> std::io::Result<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    /// Renderer that always fails, as when html2text is not installed.
    struct BrokenRenderer;

    impl HtmlRenderer for BrokenRenderer {
        fn render(&self, _input: &[u8]) -> std::io::Result<Vec<u8>> {
            Err(std::io::Error::other("no filter"))
        }
    }

    #[test]
    fn test_plain_utf8_round_trip() {
        let msg = Message::parse("Content-Type: text/plain; charset=utf-8\r\n\r\nline one\r\nline two");
        let text = materialize(&msg, &BrokenRenderer);
        assert_eq!(text, "line one\nline two");
    }

    #[test]
    fn test_latin1_part_normalized_to_utf8() {
        let source = concat!(
            "Content-Type: text/plain; charset=iso-8859-1\r\n",
            "Content-Transfer-Encoding: quoted-printable\r\n",
            "\r\n",
            "caf=E9",
        );
        let msg = Message::parse(source);
        assert_eq!(materialize(&msg, &BrokenRenderer), "café");
    }

    #[test]
    fn test_html_goes_through_renderer() {
        let msg = Message::parse("Content-Type: text/html\r\n\r\n<p>hi</p>");
        let text = materialize(&msg, &FakeRenderer(b"hi\r\n".to_vec()));
        assert_eq!(text, "hi\n");
    }

    #[test]
    fn test_html_renderer_failure_degrades_to_source() {
        let msg = Message::parse("Content-Type: text/html\r\n\r\n<p>hi</p>");
        assert_eq!(materialize(&msg, &BrokenRenderer), "<p>hi</p>");
    }

    #[test]
    fn test_html_renderer_output_decoded_as_latin1() {
        let msg = Message::parse("Content-Type: text/html\r\n\r\n<p>caf&eacute;</p>");
        let text = materialize(&msg, &FakeRenderer(b"caf\xe9\n".to_vec()));
        assert_eq!(text, "café\n");
    }

    #[test]
    fn test_html_outside_latin1_still_renders() {
        // Wide characters skip the Latin-1 re-encode but the filter runs
        let msg = Message::parse("Content-Type: text/html; charset=utf-8\r\n\r\n<p>こんにちは</p>");
        let text = materialize(&msg, &FakeRenderer(b"rendered".to_vec()));
        assert_eq!(text, "rendered");
    }
}
