//! User profile models

use serde::{Deserialize, Serialize};

use crate::error::{LiftlogError, Result};

/// Minimum length of a new password, after trimming
pub const MIN_PASSWORD_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role_name: String,
}

/// Request body for `/profile/change-password`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl PasswordChange {
    /// Build a change request, checking the new password against its confirmation
    pub fn new(current: String, new: String, confirm: &str) -> Result<Self> {
        if new != confirm {
            return Err(LiftlogError::validation(
                "New password and confirm password do not match.",
            ));
        }
        let trimmed = new.trim();
        if trimmed.is_empty() {
            return Err(LiftlogError::validation("New password cannot be empty."));
        }
        if trimmed.chars().count() < MIN_PASSWORD_LEN {
            return Err(LiftlogError::validation(format!(
                "New password cannot be shorter than {} characters.",
                MIN_PASSWORD_LEN
            )));
        }

        Ok(Self {
            current_password: current,
            new_password: new,
        })
    }
}
