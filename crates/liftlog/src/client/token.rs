use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bearer credential for API requests, obtained from `/login`.
/// Passed explicitly to every authenticated call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthToken {
    pub username: String,
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default = "Utc::now")]
    pub issued_at: DateTime<Utc>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl AuthToken {
    pub fn new(username: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            access_token: access_token.into(),
            token_type: default_token_type(),
            issued_at: Utc::now(),
        }
    }

    /// Returns the Authorization header value.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// How long ago the token was issued, in whole minutes
    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.issued_at).num_minutes()
    }
}
