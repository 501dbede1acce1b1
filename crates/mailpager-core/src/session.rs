//! Session state shared across commands.

use crate::account::Thread;
use crate::error::{Error, Result};

/// State that must survive between commands.
///
/// `o`, `ar` and `!` address threads by the ordinal position they had in
/// the last `lm` listing; `cd` by ordinals from the last `lf`. Entering a
/// folder invalidates the active listing: the indices would otherwise
/// point into the wrong folder.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Current folder or label name.
    pub current: String,
    /// True when `current` is a user label rather than a standard folder.
    pub is_label: bool,
    /// Catalog from the last `lf`, empty before that.
    pub labels: Vec<String>,
    /// Threads from the last `lm`, empty before that and after `cd`.
    pub active_threads: Vec<Thread>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Starts in the inbox, which is not a label.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: "inbox".to_string(),
            is_label: false,
            labels: Vec::new(),
            active_threads: Vec::new(),
        }
    }

    /// Enters a folder or label, invalidating the active listing.
    pub fn enter(&mut self, name: String, standard_folders: &[String]) {
        self.is_label = !standard_folders.contains(&name);
        self.current = name;
        self.active_threads.clear();
    }

    /// Resolves an index argument against the active listing.
    ///
    /// # Errors
    ///
    /// [`Error::NotANumber`] for non-integer input,
    /// [`Error::IndexOutOfRange`] for an integer outside the listing
    /// (including any integer when nothing has been listed yet).
    pub fn thread(&self, arg: &str) -> Result<&Thread> {
        let index: usize = arg
            .parse()
            .map_err(|_| Error::NotANumber(arg.to_string()))?;
        self.active_threads
            .get(index)
            .ok_or(Error::IndexOutOfRange(index))
    }
}
