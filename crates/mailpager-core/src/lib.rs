//! # mailpager-core
//!
//! Session state, command dispatch and the interactive loop of the
//! mailpager terminal client.
//!
//! The crate is backend-agnostic: everything network-shaped sits behind
//! the [`Account`] trait, the editor behind [`Editor`], and HTML
//! flattening behind the renderer trait from `mailpager-mime`. The
//! binary wires in the real implementations; tests script fakes.
//!
//! - [`command::Command`] parses input lines into a closed verb set.
//! - [`session::SessionState`] carries the current folder and the
//!   ordinal listings that index arguments resolve against.
//! - [`client::Client`] executes commands, mutating the session only
//!   after the fallible work succeeded.
//! - [`repl::run`] loops over an input channel until quit or a fatal
//!   error.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
pub mod client;
pub mod command;
pub mod config;
pub mod draft;
mod editor;
mod error;
pub mod repl;
pub mod session;
pub mod tabler;
pub mod wait;

pub use account::{Account, AccountError, OutgoingMessage, RawMessage, Thread};
pub use client::{Client, Flow};
pub use command::Command;
pub use config::{Config, StatePaths, resolve_editor};
pub use editor::{Editor, EditorCommand};
pub use error::{Error, Result};
pub use session::SessionState;
