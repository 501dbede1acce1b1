//! Blocking poll for new mail across a set of folders and labels.
//!
//! `wait` snapshots the unread thread ids of each watched name, then
//! polls until some name shows an unread id that was not in its
//! snapshot. Threads that were already unread when the wait started do
//! not count; only arrivals do.

use std::collections::HashSet;
use std::sync::mpsc;
use std::time::Duration;

use tracing::debug;

use crate::account::{Account, AccountError, Thread};
use crate::error::Result;

/// Lets the user break out of a wait between poll cycles.
pub trait WaitCancel {
    /// Sleeps up to `timeout`; true when the wait should stop early.
    fn cancelled(&mut self, timeout: Duration) -> bool;
}

/// Cancels when a line arrives on the input channel.
///
/// A disconnected channel (end of input) also cancels, matching the
/// rest of the client's treatment of EOF as quit.
pub struct ChannelCancel<'a>(pub &'a mpsc::Receiver<String>);

impl WaitCancel for ChannelCancel<'_> {
    fn cancelled(&mut self, timeout: Duration) -> bool {
        !matches!(
            self.0.recv_timeout(timeout),
            Err(mpsc::RecvTimeoutError::Timeout)
        )
    }
}

fn unread_ids(threads: &[Thread]) -> HashSet<String> {
    threads
        .iter()
        .filter(|thread| thread.unread)
        .map(|thread| thread.id.clone())
        .collect()
}

fn list(
    account: &mut dyn Account,
    name: &str,
    is_label: bool,
) -> std::result::Result<Vec<Thread>, AccountError> {
    if is_label {
        account.threads_by_label(name)
    } else {
        account.threads_by_folder(name)
    }
}

/// Polls `names` until one of them receives new unread mail.
///
/// Returns the name that got new mail, or `None` when cancelled.
/// Listing failures during a cycle are logged and treated as "nothing
/// new there yet"; a name whose initial snapshot failed is snapshotted
/// on its first successful listing instead.
///
/// # Errors
///
/// Currently infallible in practice; the `Result` keeps the signature
/// uniform with the other command handlers.
pub fn wait_for_new_mail(
    account: &mut dyn Account,
    names: &[String],
    standard_folders: &[String],
    cancel: &mut dyn WaitCancel,
    interval: Duration,
) -> Result<Option<String>> {
    let kinds: Vec<bool> = names
        .iter()
        .map(|name| !standard_folders.contains(name))
        .collect();

    let mut snapshots: Vec<Option<HashSet<String>>> = names
        .iter()
        .zip(&kinds)
        .map(|(name, &is_label)| match list(account, name, is_label) {
            Ok(threads) => Some(unread_ids(&threads)),
            Err(err) => {
                debug!(name, %err, "initial snapshot failed, deferring");
                None
            }
        })
        .collect();

    loop {
        if cancel.cancelled(interval) {
            return Ok(None);
        }

        for ((name, &is_label), snapshot) in names.iter().zip(&kinds).zip(&mut snapshots) {
            let threads = match list(account, name, is_label) {
                Ok(threads) => threads,
                Err(err) => {
                    debug!(name, %err, "poll cycle failed, retrying next cycle");
                    continue;
                }
            };
            let unread = unread_ids(&threads);
            match snapshot {
                Some(seen) => {
                    if unread.iter().any(|id| !seen.contains(id)) {
                        return Ok(Some(name.clone()));
                    }
                }
                None => *snapshot = Some(unread),
            }
        }
    }
}
