//! Login and registration payloads

use serde::{Deserialize, Serialize};

use crate::error::{LiftlogError, Result};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response from `/login`. A missing `jwt` means the login was refused.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub jwt: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(LiftlogError::validation("Username cannot be empty."));
        }
        if self.password != self.confirm_password {
            return Err(LiftlogError::validation("Passwords do not match."));
        }
        Ok(())
    }
}
