//! Command-line front end: shared context and one module per command group

pub mod commands;

use clap::ValueEnum;
use serde::Serialize;

use crate::client::{ApiClient, AuthToken};
use crate::config::CredentialStore;
use crate::error::Result;

/// Output format for list and show commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Everything a command needs to reach the API on behalf of a profile
#[derive(Debug, Clone)]
pub struct Context {
    pub profile: Option<String>,
    pub api_url: String,
    pub format: OutputFormat,
}

impl Context {
    pub fn new(profile: Option<String>, api_url: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            profile,
            api_url: api_url.into(),
            format,
        }
    }

    pub fn store(&self) -> Result<CredentialStore> {
        CredentialStore::new(self.profile.clone())
    }

    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.api_url)
    }

    /// Client plus the stored token, or `NotAuthenticated` when logged out
    pub fn authenticated(&self) -> Result<(ApiClient, AuthToken)> {
        let token = self.store()?.require()?;
        Ok((self.client()?, token))
    }

    /// Print `value` as pretty JSON when JSON output is selected.
    /// Returns `false` when the caller should render a table instead.
    pub fn emit_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<bool> {
        if self.format != OutputFormat::Json {
            return Ok(false);
        }
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(true)
    }
}

/// Shorten `s` to at most `max` characters, marking the cut with `...`
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
