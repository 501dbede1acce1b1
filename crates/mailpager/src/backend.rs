//! HTTP account backend against a webmail gateway.
//!
//! The gateway speaks plain JSON over a handful of endpoints; this
//! adapter maps them onto the [`Account`] trait and gateway failures
//! onto [`AccountError`] variants the client knows how to present.

use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use mailpager_core::{Account, AccountError, OutgoingMessage, RawMessage, Thread};

const STANDARD_FOLDERS: [&str; 6] = ["inbox", "sent", "drafts", "spam", "trash", "all"];

/// Credentials and endpoint for one gateway account.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Gateway base URL, without a trailing slash.
    pub url: String,
    /// Account email address.
    pub email: String,
    /// Account password or app token.
    pub password: String,
}

/// [`Account`] implementation over a webmail HTTP gateway.
pub struct HttpAccount {
    http: HttpClient,
    credentials: Credentials,
    token: Option<String>,
    standard: Vec<String>,
}

#[derive(Deserialize)]
struct LoginReply {
    token: String,
}

#[derive(Deserialize)]
struct ThreadEntry {
    id: String,
    authors: String,
    subject: String,
    unread: bool,
}

#[derive(Deserialize)]
struct MessageEntry {
    id: String,
    raw: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cc: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bcc: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    in_reply_to: Option<&'a str>,
}

impl HttpAccount {
    /// Creates an unauthenticated account handle.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Network`] when the HTTP client cannot be
    /// constructed.
    pub fn new(credentials: Credentials) -> Result<Self, AccountError> {
        let http = HttpClient::builder()
            .user_agent(concat!("mailpager/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| AccountError::Network(err.to_string()))?;
        Ok(Self {
            http,
            credentials,
            token: None,
            standard: STANDARD_FOLDERS.map(str::to_string).to_vec(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.credentials.url.trim_end_matches('/'))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn dispatch(&self, builder: RequestBuilder) -> Result<Response, AccountError> {
        let response = self
            .authorized(builder)
            .send()
            .map_err(|err| AccountError::Network(err.to_string()))?;
        match response.status() {
            StatusCode::UNAUTHORIZED => Err(AccountError::Authentication(
                "gateway rejected the session".to_string(),
            )),
            StatusCode::NOT_IMPLEMENTED => Err(AccountError::Unsupported(
                "operation not offered by this gateway".to_string(),
            )),
            status if status.is_success() => Ok(response),
            status => Err(AccountError::Network(format!(
                "gateway returned {status}"
            ))),
        }
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, AccountError> {
        debug!(path, "gateway request");
        self.dispatch(self.http.get(self.endpoint(path)))?
            .json()
            .map_err(|err| AccountError::Network(err.to_string()))
    }

    fn threads(&self, path: &str) -> Result<Vec<Thread>, AccountError> {
        let entries: Vec<ThreadEntry> = self.get_json(path)?;
        Ok(entries
            .into_iter()
            .map(|entry| Thread {
                id: entry.id,
                authors: entry.authors,
                subject: entry.subject,
                unread: entry.unread,
            })
            .collect())
    }
}

impl Account for HttpAccount {
    fn login(&mut self) -> Result<(), AccountError> {
        let reply = self
            .dispatch(self.http.post(self.endpoint("login")).json(&serde_json::json!({
                "email": self.credentials.email,
                "password": self.credentials.password,
            })))
            .map_err(|err| match err {
                // a rejected login is an authentication failure even
                // though the gateway answers it with a plain 4xx
                AccountError::Network(msg) => AccountError::Authentication(msg),
                other => other,
            })?
            .json::<LoginReply>()
            .map_err(|err| AccountError::Network(err.to_string()))?;
        self.token = Some(reply.token);
        Ok(())
    }

    fn standard_folders(&self) -> &[String] {
        &self.standard
    }

    fn label_names(&mut self) -> Result<Vec<String>, AccountError> {
        self.get_json("labels")
    }

    fn threads_by_folder(&mut self, name: &str) -> Result<Vec<Thread>, AccountError> {
        self.threads(&format!("threads?folder={name}"))
    }

    fn threads_by_label(&mut self, name: &str) -> Result<Vec<Thread>, AccountError> {
        self.threads(&format!("threads?label={name}"))
    }

    fn messages(&mut self, thread: &Thread) -> Result<Vec<RawMessage>, AccountError> {
        let entries: Vec<MessageEntry> =
            self.get_json(&format!("threads/{}/messages", thread.id))?;
        Ok(entries
            .into_iter()
            .map(|entry| RawMessage {
                id: entry.id,
                source: entry.raw,
            })
            .collect())
    }

    fn archive(&mut self, thread: &Thread) -> Result<(), AccountError> {
        let path = format!("threads/{}/archive", thread.id);
        self.dispatch(self.http.post(self.endpoint(&path)))?;
        Ok(())
    }

    fn report_spam(&mut self, thread: &Thread) -> Result<(), AccountError> {
        let path = format!("threads/{}/spam", thread.id);
        self.dispatch(self.http.post(self.endpoint(&path)))?;
        Ok(())
    }

    fn send(&mut self, message: &OutgoingMessage) -> Result<(), AccountError> {
        let request = SendRequest {
            to: &message.to,
            subject: &message.subject,
            body: &message.body,
            cc: message.cc.as_deref(),
            bcc: message.bcc.as_deref(),
            in_reply_to: message.in_reply_to.as_deref(),
        };
        self.dispatch(self.http.post(self.endpoint("send")).json(&request))
            .map_err(|err| match err {
                AccountError::Network(msg) => AccountError::Send(msg),
                other => other,
            })?;
        Ok(())
    }
}
