//! Cloud Foundry v2 API client module
//!
//! This module provides the OAuth2 credential manager and a generic resource
//! manager driven by per-domain configuration.

pub mod applications;
mod client;
mod credentials;
pub mod domains;
pub mod guid;
mod info;
mod models;
pub mod resource;
mod transport;

pub use applications::AppState;
pub use client::{CfClient, ClientOptions};
pub use credentials::{CredentialManager, CredentialStatus, TokenPair};
pub use domains::{Domain, DomainConfig};
pub use guid::{is_guid, Identifier};
pub use info::TargetInfo;
pub use models::{Entity, EntityMetadata, Page};
pub use resource::{Filter, ResourceManager};
pub use transport::TransportConfig;
