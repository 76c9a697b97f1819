//! Congregation record

use super::ids::CongregationId;
use serde::{Deserialize, Serialize};

/// A congregation as listed by the public `/congregations` endpoint
///
/// Fields the client does not use are kept in `extra` so a create payload
/// can round-trip whatever the server expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Congregation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CongregationId>,

    pub name: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Congregation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("congregation name cannot be empty".to_string());
        }
        Ok(())
    }
}
