//! Person (publisher) domain model

use super::ids::{CongregationId, PersonId, TeamId};
use serde::{Deserialize, Serialize};

/// Sex of a person as stored by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sex {
    Female,
    Male,
}

/// A congregation member whose field service is reported monthly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Server id; absent when creating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PersonId>,

    pub congregation_id: CongregationId,

    pub team_id: TeamId,

    pub first_name: String,

    pub last_name: String,

    /// ISO date (`YYYY-MM-DD` or full timestamp)
    pub birth_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baptism_date: Option<String>,

    pub sex: Sex,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_elder: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ministerial_servant: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_regular_pioneer: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_special_pioneer: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_field_missionary: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_other_sheep: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_anointed: Option<bool>,

    /// Set by the server on list endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub already_sent_last_report: Option<bool>,
}

impl Person {
    /// "First Last" with surrounding whitespace trimmed from each part
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Regular pioneers report hours every month
    pub fn reports_hours(&self) -> bool {
        self.is_regular_pioneer.unwrap_or(false) || self.is_special_pioneer.unwrap_or(false)
    }

    /// People are active unless the server says otherwise
    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }

    /// Checks the fields the API requires before a create or update
    pub fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() {
            return Err("first_name cannot be empty".to_string());
        }
        if self.last_name.trim().is_empty() {
            return Err("last_name cannot be empty".to_string());
        }
        if self.birth_date.trim().is_empty() {
            return Err("birth_date cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Sorts people by last name, the order used in publisher pickers
pub fn sort_by_last_name(people: &mut [Person]) {
    people.sort_by(|a, b| a.last_name.trim().cmp(b.last_name.trim()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Person {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "congregation_id": 1,
            "team_id": 2,
            "first_name": " Ana ",
            "last_name": "Pérez",
            "birth_date": "1990-05-01",
            "sex": "FEMALE",
            "is_regular_pioneer": true
        }))
        .unwrap()
    }

    #[test]
    fn test_person_deserialize() {
        let person = sample();
        assert_eq!(person.id, Some(PersonId::new(3)));
        assert_eq!(person.sex, Sex::Female);
        assert!(person.reports_hours());
        assert!(person.is_active());
        assert_eq!(person.display_name(), "Ana Pérez");
    }

    #[test]
    fn test_person_serialize_skips_unset_flags() {
        let mut person = sample();
        person.id = None;
        let json = serde_json::to_value(&person).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("is_elder").is_none());
        assert_eq!(json["sex"], "FEMALE");
    }

    #[test]
    fn test_person_validate() {
        let mut person = sample();
        assert!(person.validate().is_ok());
        person.last_name = "  ".to_string();
        assert!(person.validate().is_err());
    }

    #[test]
    fn test_sort_by_last_name() {
        let mut a = sample();
        a.last_name = "Zapata".to_string();
        let mut b = sample();
        b.last_name = "Alvarez".to_string();
        let mut people = vec![a, b];
        sort_by_last_name(&mut people);
        assert_eq!(people[0].last_name, "Alvarez");
    }
}
