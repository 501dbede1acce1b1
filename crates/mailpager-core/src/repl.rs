//! The interactive read-eval-print loop.
//!
//! Input lines arrive over a channel fed by a reader thread, so `wait`
//! can poll the account while staying cancellable by the next line of
//! input. A closed channel means end of input and quits the loop, same
//! as the `q` command.

use std::io::Write;
use std::sync::mpsc;

use crate::account::Account;
use crate::client::{Client, Flow};
use crate::command::Command;
use crate::error::Result;
use crate::wait::ChannelCancel;

/// Runs the loop until quit, end of input, or a fatal error.
///
/// Recoverable errors print one line and the loop continues; only
/// errors that [`crate::Error::is_fatal`] considers fatal propagate.
///
/// # Errors
///
/// Returns the first fatal error, or an output I/O error.
pub fn run<A: Account, W: Write>(
    client: &mut Client<A, W>,
    lines: &mpsc::Receiver<String>,
) -> Result<()> {
    loop {
        client.write_prompt()?;

        let Ok(line) = lines.recv() else {
            return Ok(());
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                client.report(&err)?;
                continue;
            }
        };

        match client.execute(command, &mut ChannelCancel(lines)) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => return Ok(()),
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => client.report(&err)?,
        }
    }
}
