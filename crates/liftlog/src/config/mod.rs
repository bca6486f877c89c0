mod credentials;
mod settings;

pub use credentials::CredentialStore;
pub use settings::{Settings, DEFAULT_API_URL};

use crate::error::{LiftlogError, Result};
use std::path::{Path, PathBuf};

/// Default configuration directory name
const CONFIG_DIR_NAME: &str = "liftlog";

/// Get the configuration directory path
/// Returns ~/.config/liftlog on Unix, ~/Library/Application Support/liftlog on macOS
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(CONFIG_DIR_NAME))
        .ok_or_else(|| LiftlogError::config("Could not determine config directory"))
}

/// Get the data directory path for storing credentials
/// Returns ~/.local/share/liftlog on Unix, ~/Library/Application Support/liftlog on macOS
pub fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|p| p.join(CONFIG_DIR_NAME))
        .ok_or_else(|| LiftlogError::config("Could not determine data directory"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
