//! UI utilities for terminal output
//!
//! This module provides user interface components like progress spinners
//! and interactive prompts.

mod prompt;
mod spinner;

pub use prompt::{
    confirm_action, prompt_password, prompt_skip_ssl_verification, prompt_target,
    prompt_username,
};
pub use spinner::{create_spinner, finish_spinner};
