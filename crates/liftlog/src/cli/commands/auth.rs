//! Authentication commands for liftlog

use crate::cli::Context;
use crate::error::{LiftlogError, Result};
use crate::models::RegisterRequest;
use std::io::{self, Write};
use tracing::debug;

/// Execute the login command
pub async fn login(ctx: &Context, username: Option<String>) -> Result<()> {
    let store = ctx.store()?;

    if let Some(token) = store.load()? {
        println!(
            "Already logged in as {}. Use 'liftlog auth logout' to log out first.",
            token.username
        );
        return Ok(());
    }

    let username = match username {
        Some(u) => u,
        None => prompt_line("Username: ")?,
    };
    let password = rpassword_prompt("Password: ")?;

    println!("Logging in...");
    let client = ctx.client()?;
    let token = client.login(&username, &password).await?;

    store.save(&token)?;
    if let Err(e) = store.store_in_keyring(&token) {
        debug!(error = %e, "keyring unavailable, token kept in file only");
    }

    println!("Successfully logged in!");
    println!("Profile: {}", store.profile());

    Ok(())
}

/// Execute the register command
pub async fn register(ctx: &Context, username: Option<String>, email: Option<String>) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt_line("Username: ")?,
    };
    let email = match email {
        Some(e) => e,
        None => prompt_line("Email: ")?,
    };
    let password = rpassword_prompt("Password: ")?;
    let confirm_password = rpassword_prompt("Confirm password: ")?;

    let request = RegisterRequest {
        username,
        email,
        password,
        confirm_password,
    };

    let client = ctx.client()?;
    client.register(&request).await?;

    println!("Registration successful. Please log in with your new credentials:");
    println!("  liftlog auth login --username {}", request.username);
    Ok(())
}

/// Execute the logout command
pub async fn logout(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;

    let had_file = store.has_credentials();
    let had_keyring = matches!(store.load_from_keyring(), Ok(Some(_)));
    store.clear()?;
    if let Err(e) = store.delete_from_keyring() {
        debug!(error = %e, "could not clear keyring entry");
    }

    if had_file || had_keyring {
        println!("Successfully logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

/// Execute the status command
pub async fn status(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;

    match store.load() {
        Ok(Some(token)) => {
            println!("Status:   Logged in");
            println!("Profile:  {}", store.profile());
            println!("User:     {}", token.username);
            println!("Server:   {}", ctx.api_url);

            let age = token.age_minutes();
            if age >= 60 * 24 {
                println!("Token:    issued {} days ago", age / (60 * 24));
            } else if age >= 60 {
                println!("Token:    issued {} hours ago", age / 60);
            } else {
                println!("Token:    issued {} minutes ago", age);
            }
        }
        Ok(None) => {
            println!("Status: Not logged in");
            println!("Run 'liftlog auth login' to authenticate.");
        }
        Err(LiftlogError::Json(_)) => {
            println!("Status: Credentials corrupted");
            println!("Run 'liftlog auth logout' then 'liftlog auth login' to fix.");
        }
        Err(e) => return Err(e),
    }

    Ok(())
}

/// Read one trimmed line from stdin after printing `prompt`
pub(crate) fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompt for password without echoing
pub(crate) fn rpassword_prompt(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let password = rpassword::read_password()?;
    Ok(password)
}
