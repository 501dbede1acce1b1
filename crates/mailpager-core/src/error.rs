//! Error types for the core library.

use crate::account::AccountError;
use thiserror::Error;

/// Errors that can occur while executing commands.
///
/// Everything except [`Error::Account`] with an authentication cause is
/// recoverable: the REPL prints one line and keeps going. A failing
/// command never leaves the session state partially updated.
#[derive(Debug, Error)]
pub enum Error {
    /// The input line did not name a known command.
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    /// A command was called with missing or malformed arguments.
    #[error("{0}")]
    Usage(String),

    /// An index argument was not an integer.
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// An index argument was outside the active listing.
    #[error("thread {0} is out of range; run 'lm' first")]
    IndexOutOfRange(usize),

    /// A folder or label name/ordinal did not resolve.
    #[error("label {0} doesn't exist")]
    NoSuchFolder(String),

    /// The draft file is not usable as an outgoing message.
    #[error("draft error: {0}")]
    Draft(String),

    /// The account backend failed.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Local file or editor I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the session cannot usefully continue.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Account(AccountError::Authentication(_)))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
