//! Session persistence
//!
//! Keeps the target and token pair between runs so commands do not need a
//! fresh login, and writes refreshed tokens back after every command.

mod bootstrap;
mod models;
mod store;

pub use bootstrap::{is_valid_target, login, open, ActiveSession, LoginRequest, SessionOptions};
pub use models::Session;
pub use store::SessionStore;
