//! Interactive prompts

use dialoguer::{Confirm, Input, Password};

use crate::error::{CfError, Result};
use crate::session::is_valid_target;

fn prompt_failed(e: dialoguer::Error) -> CfError {
    CfError::Session(format!("Prompt failed: {}", e))
}

/// Ask for the API endpoint until it looks like an http(s) URL
pub fn prompt_target() -> Result<String> {
    Input::<String>::new()
        .with_prompt("API endpoint")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if is_valid_target(input) {
                Ok(())
            } else {
                Err("Endpoint must start with http:// or https://")
            }
        })
        .interact_text()
        .map_err(prompt_failed)
}

pub fn prompt_skip_ssl_verification(default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt("Skip TLS certificate verification?")
        .default(default)
        .interact()
        .map_err(prompt_failed)
}

pub fn prompt_username() -> Result<String> {
    Input::<String>::new()
        .with_prompt("Login")
        .interact_text()
        .map_err(prompt_failed)
}

pub fn prompt_password() -> Result<String> {
    Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(prompt_failed)
}

/// Ask before a destructive action
///
/// Skipped (treated as confirmed) with `-y` or in batch mode.
pub fn confirm_action(prompt: &str, yes: bool, batch: bool) -> Result<bool> {
    if yes || batch {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(prompt_failed)
}
