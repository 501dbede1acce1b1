//! Configuration file and on-disk state paths.
//!
//! The config is a flat `key=value` file. A missing file is the same as
//! an empty one; every lookup has a caller-supplied default so first
//! runs work without any setup.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Parsed `key=value` configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    values: HashMap<String, String>,
}

impl Config {
    /// Loads the config file, treating a missing file as empty.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the file exists but cannot be read.
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err),
        };
        Ok(Self::parse(&text))
    }

    /// Parses `key=value` lines; blank lines and `#` comments skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let values = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect();
        Self { values }
    }

    /// Looks up a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Looks up a key, computing a default when absent.
    pub fn get_or_else(&self, key: &str, default: impl FnOnce() -> String) -> String {
        self.get(key).map_or_else(default, str::to_string)
    }
}

/// Where the client keeps its files.
#[derive(Debug, Clone)]
pub struct StatePaths {
    /// The state directory itself.
    pub dir: PathBuf,
    /// The `key=value` config file.
    pub config: PathBuf,
    /// The pending outgoing draft.
    pub draft: PathBuf,
    /// Scratch file handed to the editor when opening threads.
    pub scratch: PathBuf,
}

impl StatePaths {
    /// Paths rooted at the platform config directory.
    ///
    /// Falls back to `.mailpager` under the current directory when no
    /// config directory can be determined.
    #[must_use]
    pub fn discover() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mailpager");
        Self::rooted_at(dir)
    }

    /// Paths rooted at an explicit directory.
    #[must_use]
    pub fn rooted_at(dir: PathBuf) -> Self {
        Self {
            config: dir.join("config"),
            draft: dir.join("draft"),
            scratch: dir.join("scratch"),
            dir,
        }
    }

    /// Creates the state directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the directory cannot be created.
    pub fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }
}

/// Picks the editor command: config `editor`, then `$EDITOR`, then `vi`.
#[must_use]
pub fn resolve_editor(config: &Config) -> String {
    config.get_or_else("editor", || {
        std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string())
    })
}
