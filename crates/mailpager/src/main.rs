//! mailpager - minimal terminal webmail client.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod backend;

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mailpager_core::{repl, Account, Client, Config, EditorCommand, StatePaths, resolve_editor};
use mailpager_mime::Html2Text;

use backend::{Credentials, HttpAccount};

const DEFAULT_POLL_SECONDS: u64 = 30;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailpager=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let paths = StatePaths::discover();
    paths.ensure().with_context(|| {
        format!("cannot create state directory {}", paths.dir.display())
    })?;
    let config = Config::load(&paths.config)
        .with_context(|| format!("cannot read config {}", paths.config.display()))?;

    let credentials = credentials_from(&config, &paths)?;
    let mut account = HttpAccount::new(credentials)?;
    account.login().context("login failed")?;
    info!("logged in");

    let poll_interval = config
        .get("poll")
        .and_then(|value| value.parse().ok())
        .map_or(Duration::from_secs(DEFAULT_POLL_SECONDS), Duration::from_secs);
    let editor = EditorCommand(resolve_editor(&config));

    let mut client = Client::new(
        account,
        io::stdout(),
        Box::new(editor),
        Box::new(Html2Text),
        paths,
        poll_interval,
    );

    let unread = client.unread_in_inbox()?;
    println!("You have {unread} unread messages in your inbox");

    let lines = spawn_stdin_pump();
    repl::run(&mut client, &lines)?;
    Ok(())
}

fn credentials_from(config: &Config, paths: &StatePaths) -> anyhow::Result<Credentials> {
    let field = |key: &str| {
        config.get(key).map(str::to_string).with_context(|| {
            format!(
                "missing '{key}' in {}; expected url, email and password lines",
                paths.config.display()
            )
        })
    };
    Ok(Credentials {
        url: field("url")?,
        email: field("email")?,
        password: field("password")?,
    })
}

/// Reads stdin lines on a thread so `wait` can poll while staying
/// cancellable by the next line. Dropping the sender on EOF closes the
/// channel, which the loop treats as quit.
fn spawn_stdin_pump() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
