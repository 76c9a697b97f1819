//! Team domain model

use super::ids::{CongregationId, TeamId};
use super::person::Person;
use serde::{Deserialize, Serialize};

/// Congregation name as embedded in team responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CongregationRef {
    pub name: String,
}

/// A field-service group inside a congregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TeamId>,

    pub name: String,

    pub congregation_id: CongregationId,

    #[serde(default)]
    pub people: Vec<Person>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub congregation: Option<CongregationRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_people: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_active_people: Option<u32>,
}

impl Team {
    /// New team payload for the create endpoint
    pub fn new(name: impl Into<String>, congregation_id: CongregationId) -> Self {
        Self {
            id: None,
            name: name.into(),
            congregation_id,
            people: Vec::new(),
            congregation: None,
            total_people: None,
            total_active_people: None,
        }
    }

    /// Member count, preferring the server aggregate over the embedded list
    pub fn member_count(&self) -> u32 {
        self.total_people.unwrap_or(self.people.len() as u32)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("team name cannot be empty".to_string());
        }
        Ok(())
    }
}
