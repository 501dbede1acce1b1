//! The consumed account interface.
//!
//! All network communication, authentication and thread retrieval live
//! behind this trait; the client only dispatches commands against it.
//! The binary crate provides the real implementation, tests script fakes.

/// Errors an account backend can produce.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Login was rejected. Fatal to the session.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The backend does not support this operation.
    #[error("Not supported by this account: {0}")]
    Unsupported(String),

    /// The message could not be sent.
    #[error("Send failed: {0}")]
    Send(String),

    /// Transport-level failure; retryable.
    #[error("Network error: {0}")]
    Network(String),
}

/// A conversation handle owned by the backend.
///
/// The `id` is opaque to the client; the display fields are whatever the
/// backend wants shown in listings. Handles are only addressable by
/// ordinal position for the lifetime of one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    /// Backend-opaque identifier.
    pub id: String,
    /// Display line for the senders in the conversation.
    pub authors: String,
    /// Display subject.
    pub subject: String,
    /// Whether the conversation has unread messages.
    pub unread: bool,
}

/// One raw message source inside a thread.
#[derive(Debug, Clone)]
pub struct RawMessage {
    /// Backend-opaque message identifier.
    pub id: String,
    /// Full RFC-822-style source text.
    pub source: String,
}

/// An outgoing message assembled from the draft file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Recipient list as written in the draft.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Carbon copy, if any.
    pub cc: Option<String>,
    /// Blind carbon copy, if any.
    pub bcc: Option<String>,
    /// Message-ID this is a reply to, if any.
    pub in_reply_to: Option<String>,
}

/// The webmail account the client drives.
pub trait Account {
    /// Authenticates the session.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Authentication`] when the credentials are
    /// rejected; this is fatal to the client.
    fn login(&mut self) -> Result<(), AccountError>;

    /// The fixed, ordered set of standard folder names (inbox, sent, ...).
    ///
    /// Concatenated before user labels wherever a combined catalog is
    /// needed.
    fn standard_folders(&self) -> &[String];

    /// Lists user-defined label names, possibly empty.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog cannot be fetched.
    fn label_names(&mut self) -> Result<Vec<String>, AccountError>;

    /// Lists threads in a standard folder, server order preserved.
    ///
    /// # Errors
    ///
    /// Returns an error when the listing cannot be fetched.
    fn threads_by_folder(&mut self, name: &str) -> Result<Vec<Thread>, AccountError>;

    /// Lists threads carrying a user label, server order preserved.
    ///
    /// # Errors
    ///
    /// Returns an error when the listing cannot be fetched.
    fn threads_by_label(&mut self, name: &str) -> Result<Vec<Thread>, AccountError>;

    /// Fetches the raw message sources of a thread.
    ///
    /// # Errors
    ///
    /// Returns an error when the thread cannot be fetched.
    fn messages(&mut self, thread: &Thread) -> Result<Vec<RawMessage>, AccountError>;

    /// Archives a thread.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Unsupported`] when the backend cannot
    /// archive; surfaced as a one-line message, not fatal.
    fn archive(&mut self, thread: &Thread) -> Result<(), AccountError>;

    /// Reports a thread as spam.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Unsupported`] when the backend cannot
    /// report spam; surfaced as a one-line message, not fatal.
    fn report_spam(&mut self, thread: &Thread) -> Result<(), AccountError>;

    /// Sends a composed message.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Send`] when delivery is refused.
    fn send(&mut self, message: &OutgoingMessage) -> Result<(), AccountError>;
}
