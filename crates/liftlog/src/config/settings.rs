//! Optional `config.toml` settings

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::Result;

/// API base URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

const SETTINGS_FILENAME: &str = "config.toml";

/// User settings read from `<config_dir>/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Base URL of the liftlog API
    pub api_url: Option<String>,
    /// Credential profile used when `--profile` is not given
    pub profile: Option<String>,
}

impl Settings {
    /// Load settings from the default location, falling back to defaults when the file is absent
    pub fn load() -> Result<Self> {
        Self::load_in(super::config_dir().ok().as_deref())
    }

    /// Load `config.toml` from `dir`. Without a config directory there is no file to read.
    pub fn load_in(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::from_path(&dir.join(SETTINGS_FILENAME)),
            None => {
                debug!("no config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Pick the API URL: explicit value (flag or env) first, then the file, then the default
    pub fn resolve_api_url(&self, explicit: Option<&str>) -> String {
        let non_blank = |url: &&str| !url.trim().is_empty();
        explicit
            .filter(non_blank)
            .or(self.api_url.as_deref().filter(non_blank))
            .unwrap_or(DEFAULT_API_URL)
            .to_string()
    }

    /// Pick the credential profile: explicit value first, then the file
    pub fn resolve_profile(&self, explicit: Option<String>) -> Option<String> {
        explicit.or_else(|| self.profile.clone())
    }
}
