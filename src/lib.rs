//! cfctl - Cloud Foundry v2 API client library and CLI
//!
//! The library side is an OAuth2 credential manager that refreshes the
//! access token when the API rejects it, and a generic resource manager
//! that lists, fetches, creates and deletes entities of any domain from a
//! per-domain configuration.
//!
//! # Example
//!
//! ```bash
//! # Log in and save the session
//! cfctl login --target https://api.example.com -u admin
//!
//! # List applications in a space
//! cfctl list apps -f space_guid=5b2f3a7c-0d3e-4c8b-9a53-1c2d3e4f5a6b
//!
//! # Show an organization by name
//! cfctl get org my-org -o yaml
//!
//! # Application environment
//! cfctl app env my-app
//! ```

pub mod cf;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod ui;

pub use cf::{
    AppState, CfClient, ClientOptions, CredentialManager, CredentialStatus, Domain, DomainConfig,
    Entity, Filter, Identifier, ResourceManager, TargetInfo, TokenPair, TransportConfig,
};
pub use cli::{Cli, Command, OutputFormat};
pub use error::{CfError, Result};
pub use session::{ActiveSession, Session, SessionStore};
