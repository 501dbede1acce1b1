//! Command execution against an account.
//!
//! One handler per verb. A handler does its fallible work first and
//! mutates the session state only once that work has succeeded, so a
//! failed command leaves the session exactly where it was.

use std::fs;
use std::io::Write;
use std::time::Duration;

use tracing::{debug, info};

use mailpager_mime::{extract, HtmlRenderer, Message};

use crate::account::Account;
use crate::command::{Command, HELP};
use crate::config::StatePaths;
use crate::draft::{message_view, parse_draft, reply_headers};
use crate::error::{Error, Result};
use crate::session::SessionState;
use crate::tabler::tabler;
use crate::wait::{wait_for_new_mail, WaitCancel};
use crate::Editor;

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Prompt for the next command.
    Continue,
    /// Leave the loop.
    Quit,
}

/// Drives an [`Account`] from parsed commands.
///
/// Output goes through the injected writer and the editor and HTML
/// renderer are injected too, so the whole flow runs under test against
/// in-memory fakes.
pub struct Client<A: Account, W: Write> {
    account: A,
    state: SessionState,
    out: W,
    editor: Box<dyn Editor>,
    renderer: Box<dyn HtmlRenderer>,
    paths: StatePaths,
    poll_interval: Duration,
}

impl<A: Account, W: Write> Client<A, W> {
    /// Creates a client over a logged-in account.
    pub fn new(
        account: A,
        out: W,
        editor: Box<dyn Editor>,
        renderer: Box<dyn HtmlRenderer>,
        paths: StatePaths,
        poll_interval: Duration,
    ) -> Self {
        Self {
            account,
            state: SessionState::new(),
            out,
            editor,
            renderer,
            paths,
            poll_interval,
        }
    }

    /// Read access to the session, for the startup banner and tests.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Counts unread threads in the inbox, for the startup banner.
    ///
    /// # Errors
    ///
    /// Returns an error when the inbox listing cannot be fetched.
    pub fn unread_in_inbox(&mut self) -> Result<usize> {
        let threads = self.account.threads_by_folder("inbox")?;
        Ok(threads.iter().filter(|thread| thread.unread).count())
    }

    /// Prints the prompt with the current folder name.
    ///
    /// # Errors
    ///
    /// Returns an error when the output writer fails.
    pub fn write_prompt(&mut self) -> Result<()> {
        write!(self.out, "{}> ", self.state.current)?;
        self.out.flush()?;
        Ok(())
    }

    /// Prints a recoverable error on its own line.
    ///
    /// # Errors
    ///
    /// Returns an error when the output writer fails.
    pub fn report(&mut self, err: &Error) -> Result<()> {
        writeln!(self.out, "Error: {err}")?;
        Ok(())
    }

    /// Executes one command.
    ///
    /// # Errors
    ///
    /// Propagates handler errors; the caller decides whether they are
    /// fatal via [`Error::is_fatal`].
    pub fn execute(&mut self, command: Command, cancel: &mut dyn WaitCancel) -> Result<Flow> {
        debug!(?command, folder = %self.state.current, "executing");
        match command {
            Command::ListFolders => self.list_folders()?,
            Command::ListEmails => self.list_emails()?,
            Command::EnterFolder(arg) => self.enter_folder(&arg)?,
            Command::Open(arg) => self.open_thread(&arg)?,
            Command::Compose => self.compose()?,
            Command::SendDraft => self.send_draft()?,
            Command::Archive(arg) => self.archive(&arg)?,
            Command::ReportSpam(arg) => self.report_spam(&arg)?,
            Command::Wait(names) => self.wait(&names, cancel)?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Standard folders followed by the user's labels.
    fn catalog(&mut self) -> Result<Vec<String>> {
        let mut names = self.account.standard_folders().to_vec();
        names.extend(self.account.label_names()?);
        Ok(names)
    }

    fn list_folders(&mut self) -> Result<()> {
        let names = self.catalog()?;
        for (index, name) in names.iter().enumerate() {
            writeln!(self.out, "{index} {name}")?;
        }
        self.state.labels = names;
        Ok(())
    }

    fn list_emails(&mut self) -> Result<()> {
        let threads = if self.state.is_label {
            self.account.threads_by_label(&self.state.current)?
        } else {
            self.account.threads_by_folder(&self.state.current)?
        };

        let rows: Vec<_> = threads
            .iter()
            .enumerate()
            .map(|(index, thread)| {
                [
                    index.to_string(),
                    if thread.unread { "N" } else { "" }.to_string(),
                    thread.authors.clone(),
                    thread.subject.clone(),
                ]
            })
            .collect();
        for entry in tabler(&rows) {
            writeln!(self.out, "{entry}")?;
        }

        self.state.active_threads = threads;
        Ok(())
    }

    /// Resolves a `cd` argument to a name from the catalog.
    ///
    /// Both ordinals and names resolve against the catalog from the
    /// last `lf` when one exists, otherwise a freshly fetched one.
    /// Anything that does not resolve fails without touching the state.
    fn enter_folder(&mut self, arg: &str) -> Result<()> {
        let names = if self.state.labels.is_empty() {
            self.catalog()?
        } else {
            self.state.labels.clone()
        };
        let name = match arg.parse::<usize>() {
            Ok(index) => names.get(index).cloned(),
            Err(_) => names.iter().find(|name| name.as_str() == arg).cloned(),
        }
        .ok_or_else(|| Error::NoSuchFolder(arg.to_string()))?;

        let standard = self.account.standard_folders().to_vec();
        self.state.enter(name, &standard);
        Ok(())
    }

    /// Opens a thread: renders every message into the scratch file,
    /// seeds reply headers from the newest one, and hands the file to
    /// the editor. An edited scratch becomes the pending draft.
    fn open_thread(&mut self, arg: &str) -> Result<()> {
        let thread = self.state.thread(arg)?.clone();
        let messages = self.account.messages(&thread)?;

        let mut scratch = String::new();
        if let Some(last) = messages.last() {
            scratch.push_str(&reply_headers(Message::parse(&last.source).headers()));
        }
        for raw in &messages {
            let parsed = Message::parse(&raw.source);
            let extraction = extract(&raw.source, self.renderer.as_ref());
            scratch.push_str(&message_view(parsed.headers(), &extraction));
            scratch.push('\n');
        }

        fs::write(&self.paths.scratch, &scratch)?;
        self.editor.edit(&self.paths.scratch)?;
        let edited = fs::read_to_string(&self.paths.scratch)?;

        if edited != scratch {
            fs::copy(&self.paths.scratch, &self.paths.draft)?;
            writeln!(self.out, "Draft updated; 's' sends it")?;
        }
        Ok(())
    }

    fn compose(&mut self) -> Result<()> {
        if !self.paths.draft.exists() {
            fs::write(&self.paths.draft, "To: \nSubject: \n\n")?;
        }
        self.editor.edit(&self.paths.draft)?;
        Ok(())
    }

    /// Sends the draft and deletes the file on success.
    fn send_draft(&mut self) -> Result<()> {
        let text = match fs::read_to_string(&self.paths.draft) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::Draft("no draft; compose one with 'c'".to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        let message = parse_draft(&text);
        if message.to.trim().is_empty() {
            return Err(Error::Draft("draft has an empty To: header".to_string()));
        }

        self.account.send(&message)?;
        fs::remove_file(&self.paths.draft)?;
        info!(to = %message.to, "message sent");
        writeln!(self.out, "Sent")?;
        Ok(())
    }

    // The listing stays as-is after archive/spam: ordinals keep meaning
    // the positions the last `lm` printed, until the next `lm`.

    fn archive(&mut self, arg: &str) -> Result<()> {
        let thread = self.state.thread(arg)?.clone();
        self.account.archive(&thread)?;
        Ok(())
    }

    fn report_spam(&mut self, arg: &str) -> Result<()> {
        let thread = self.state.thread(arg)?.clone();
        self.account.report_spam(&thread)?;
        Ok(())
    }

    fn wait(&mut self, names: &[String], cancel: &mut dyn WaitCancel) -> Result<()> {
        let standard = self.account.standard_folders().to_vec();
        let arrived = wait_for_new_mail(
            &mut self.account,
            names,
            &standard,
            cancel,
            self.poll_interval,
        )?;

        if let Some(name) = arrived {
            writeln!(self.out, "New mail in {name}")?;
            self.state.enter(name, &standard);
            self.list_emails()?;
        }
        Ok(())
    }
}
