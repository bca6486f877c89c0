//! Profile commands for liftlog

use crate::cli::Context;
use crate::error::Result;
use crate::models::PasswordChange;

use super::auth::rpassword_prompt;

/// Show user profile
pub async fn show(ctx: &Context) -> Result<()> {
    let (client, token) = ctx.authenticated()?;
    let profile = client.profile(&token).await?;

    if ctx.emit_json(&profile)? {
        return Ok(());
    }

    println!("User Profile");
    println!("{}", "-".repeat(40));
    if let Some(id) = profile.id {
        println!("ID:       {}", id);
    }
    println!("Username: {}", profile.username);
    if !profile.email.is_empty() {
        println!("Email:    {}", profile.email);
    }
    if !profile.role_name.is_empty() {
        println!("Role:     {}", profile.role_name);
    }

    Ok(())
}

/// Change the account password
pub async fn change_password(ctx: &Context) -> Result<()> {
    let (client, token) = ctx.authenticated()?;

    let current = rpassword_prompt("Current password: ")?;
    let new = rpassword_prompt("New password: ")?;
    let confirm = rpassword_prompt("Confirm new password: ")?;

    let change = PasswordChange::new(current, new, &confirm)?;
    client.change_password(&token, &change).await?;

    println!("Password updated successfully.");
    Ok(())
}
