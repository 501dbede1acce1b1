//! # mailpager-mime
//!
//! MIME body and forward extraction for the mailpager terminal client.
//!
//! Given the raw source of an email, this crate finds the one part worth
//! showing in a terminal and, when the message embeds a forwarded
//! `message/rfc822` sub-message, the forwarded text as well:
//!
//! - **Tree model**: a message is a [`Message::Leaf`] with a payload or a
//!   [`Message::Container`] with children, never both.
//! - **Walker**: [`walk::scan`] collects every part of a content type.
//! - **Resolver**: [`resolve::resolve`] picks the body and forward
//!   candidates, preferring HTML over plain text.
//! - **Materializer**: [`render::materialize`] decodes transfer encoding
//!   and charset, flattens HTML through an external filter, and strips
//!   carriage returns. It never fails; every step degrades to best-effort
//!   text.
//! - **Facade**: [`extract`] ties it together.
//!
//! ```ignore
//! use mailpager_mime::{extract, Html2Text};
//!
//! let extraction = extract(&raw_source, &Html2Text);
//! println!("{}", extraction.body);
//! if !extraction.forward.is_empty() {
//!     println!("--- forwarded ---\n{}", extraction.forward);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod charset;
mod content_type;
mod error;
mod extract;
mod message;
mod render;

pub mod encoding;
pub mod header;
pub mod resolve;
pub mod walk;

pub use content_type::ContentType;
pub use error::{Error, Result};
pub use extract::{Extraction, extract};
pub use header::Headers;
pub use message::{Message, TransferEncoding};
pub use render::{Html2Text, HtmlRenderer, materialize};
