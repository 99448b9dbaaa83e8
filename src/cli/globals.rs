use crate::session::{ApiClient, FileStorage, Notifier, SessionStore};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Settings shared by every client subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub session_dir: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, session_dir: Option<PathBuf>) -> Self {
        Self {
            api_url,
            session_dir: session_dir.unwrap_or_else(default_session_dir),
        }
    }

    /// Open the session store and restore whatever was persisted.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn open_session(&self, notifier: Box<dyn Notifier>) -> Result<SessionStore> {
        let api = ApiClient::new(self.api_url.as_str()).context("Failed to build API client")?;
        let storage = FileStorage::new(&self.session_dir);

        Ok(SessionStore::open(api, Box::new(storage), notifier))
    }
}

/// `<data dir>/lipa`, or `./.lipa` when the platform has no data dir.
fn default_session_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".lipa"), |dir| dir.join("lipa"))
}
