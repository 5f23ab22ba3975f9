//! Output formatting module
//!
//! Handles different output formats: table, JSON, YAML

mod common;
mod entities;

pub use common::{output_raw, render_structured};
pub use entities::{output_entities, output_entity};
