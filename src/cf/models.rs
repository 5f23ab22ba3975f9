//! Cloud Foundry v2 API data models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generic `{metadata, entity}` envelope returned for every resource
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entity {
    pub metadata: EntityMetadata,
    #[serde(default)]
    pub entity: Map<String, Value>,
}

/// Entity metadata; only the guid is interpreted
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EntityMetadata {
    pub guid: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity {
    pub fn guid(&self) -> &str {
        &self.metadata.guid
    }

    /// String value of an entity field, if present and a string
    pub fn field(&self, name: &str) -> Option<&str> {
        self.entity.get(name).and_then(Value::as_str)
    }
}

/// One page of a collection response
#[derive(Deserialize, Debug)]
pub struct Page<T> {
    #[serde(default)]
    pub total_results: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default = "Vec::new")]
    pub resources: Vec<T>,
}
