use thiserror::Error;

/// Main error type for liftlog
#[derive(Error, Debug)]
pub enum LiftlogError {
    #[error("Authentication required. Please run 'liftlog auth login' first.")]
    NotAuthenticated,

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Keyring error: {0}")]
    Keyring(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LiftlogError>;

impl LiftlogError {
    /// Create a configuration error from a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid response error from a message
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create an invalid parameter error from a message
    pub fn invalid_param(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Create a validation error for input rejected before any request is made
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the error came from the network or the server rather than local input
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Api { .. } | Self::NotFound(_) | Self::InvalidResponse(_)
        )
    }
}

/// Render an error as a short message for the terminal.
pub fn format_user_error(err: &LiftlogError) -> String {
    match err {
        LiftlogError::Http(e) if e.is_timeout() => {
            "The server did not respond in time. Check your connection and try again.".to_string()
        }
        LiftlogError::Http(e) if e.is_connect() => {
            "Could not reach the server. Check the API URL (--api-url or LIFTLOG_API_URL)."
                .to_string()
        }
        LiftlogError::Api { status, message } if message.trim().is_empty() => {
            format!("Server returned status {}", status)
        }
        other => other.to_string(),
    }
}
