use crate::client::AuthToken;
use crate::error::{LiftlogError, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

const SESSION_FILENAME: &str = "session.json";
const SERVICE_NAME: &str = "liftlog";

/// Manages credential storage for the API token of one profile.
/// File-based, with a best-effort copy in the system keyring that is read
/// back when the session file is missing.
pub struct CredentialStore {
    profile: String,
    base_dir: PathBuf,
    use_keyring: bool,
}

impl CredentialStore {
    /// Create a new credential store for the given profile
    pub fn new(profile: Option<String>) -> Result<Self> {
        let profile = profile.unwrap_or_else(|| "default".to_string());
        let base_dir = super::data_dir()?.join(&profile);
        super::ensure_dir(&base_dir)?;

        Ok(Self {
            profile,
            base_dir,
            use_keyring: true,
        })
    }

    /// Create a file-only credential store with a custom base directory (for testing)
    pub fn with_dir(profile: impl Into<String>, base_dir: PathBuf) -> Result<Self> {
        let profile = profile.into();
        let dir = base_dir.join(&profile);
        super::ensure_dir(&dir)?;

        Ok(Self {
            profile,
            base_dir: dir,
            use_keyring: false,
        })
    }

    /// Get the profile name
    pub fn profile(&self) -> &str {
        &self.profile
    }

    fn session_path(&self) -> PathBuf {
        self.base_dir.join(SESSION_FILENAME)
    }

    /// Save the token to storage
    pub fn save(&self, token: &AuthToken) -> Result<()> {
        let path = self.session_path();
        let json = serde_json::to_string_pretty(token)?;
        fs::write(&path, json)?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Load the token from the session file, or from the keyring when the file is missing
    pub fn load(&self) -> Result<Option<AuthToken>> {
        let path = self.session_path();
        if !path.exists() {
            if !self.use_keyring {
                return Ok(None);
            }
            return match self.load_from_keyring() {
                Ok(token) => Ok(token),
                Err(e) => {
                    debug!(error = %e, "keyring unavailable");
                    Ok(None)
                }
            };
        }

        let json = fs::read_to_string(&path)?;
        let token: AuthToken = serde_json::from_str(&json)?;
        Ok(Some(token))
    }

    /// Load the token or fail with [`LiftlogError::NotAuthenticated`]
    pub fn require(&self) -> Result<AuthToken> {
        self.load()?.ok_or(LiftlogError::NotAuthenticated)
    }

    /// Check if credentials exist
    pub fn has_credentials(&self) -> bool {
        self.session_path().exists()
    }

    /// Clear all stored credentials
    pub fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn keyring_entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(SERVICE_NAME, &self.profile)
            .map_err(|e| LiftlogError::Keyring(e.to_string()))
    }

    /// Try to store the token in the system keyring
    pub fn store_in_keyring(&self, token: &AuthToken) -> Result<()> {
        let json = serde_json::to_string(token)?;
        self.keyring_entry()?
            .set_password(&json)
            .map_err(|e| LiftlogError::Keyring(e.to_string()))?;

        debug!(profile = %self.profile, "stored token in keyring");
        Ok(())
    }

    /// Read the token back from the system keyring
    pub fn load_from_keyring(&self) -> Result<Option<AuthToken>> {
        let secret = match self.keyring_entry()?.get_password() {
            Ok(secret) => secret,
            Err(keyring::Error::NoEntry) => return Ok(None),
            Err(e) => return Err(LiftlogError::Keyring(e.to_string())),
        };

        match serde_json::from_str(&secret) {
            Ok(token) => {
                debug!(profile = %self.profile, "loaded token from keyring");
                Ok(Some(token))
            }
            Err(e) => {
                warn!(profile = %self.profile, error = %e, "ignoring unreadable keyring entry");
                Ok(None)
            }
        }
    }

    /// Delete the token from the system keyring
    pub fn delete_from_keyring(&self) -> Result<()> {
        match self.keyring_entry()?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(LiftlogError::Keyring(e.to_string())),
        }
    }
}
