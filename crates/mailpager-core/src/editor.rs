//! Launching the user's editor on local files.

use std::io;
use std::path::Path;
use std::process::Command;

/// Opens a file for interactive editing and blocks until done.
///
/// Behind a trait so the command flow can be tested without spawning a
/// real editor.
pub trait Editor {
    /// Edits `path`, returning once the editor exits.
    ///
    /// # Errors
    ///
    /// Returns an error when the editor cannot be spawned or exits
    /// unsuccessfully.
    fn edit(&self, path: &Path) -> io::Result<()>;
}

/// Runs an external editor command with the file as its argument.
#[derive(Debug, Clone)]
pub struct EditorCommand(pub String);

impl Editor for EditorCommand {
    fn edit(&self, path: &Path) -> io::Result<()> {
        let status = Command::new(&self.0).arg(path).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "editor '{}' exited with {status}",
                self.0
            )))
        }
    }
}
