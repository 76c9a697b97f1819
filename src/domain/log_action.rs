//! Audit log entries

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogActionKind {
    Create,
    Update,
    Delete,
}

/// Entity the audited action touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEntity {
    PublisherReport,
    Team,
    Person,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogActionUser {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
}

/// One audited change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogAction {
    pub id: u64,
    pub action: LogActionKind,
    pub entity: LogEntity,
    pub entity_id: u64,
    #[serde(default)]
    pub before: Option<serde_json::Value>,
    #[serde(default)]
    pub after: Option<serde_json::Value>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub user: LogActionUser,
    #[serde(default)]
    pub person_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub last_page: u64,
}

/// One page of `/log-actions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogActionsPage {
    pub data: Vec<LogAction>,
    pub meta: PageMeta,
}

impl LogActionsPage {
    pub fn has_next(&self) -> bool {
        self.meta.page < self.meta.last_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserialize() {
        let page: LogActionsPage = serde_json::from_value(serde_json::json!({
            "data": [{
                "id": 1,
                "action": "UPDATE",
                "entity": "PublisherReport",
                "entity_id": 44,
                "after": {"hours": 10},
                "createdAt": "2024-06-01T12:00:00.000Z",
                "user": {"id": 2, "first_name": "Luis", "last_name": "Gómez"},
                "person_name": "Ana Pérez"
            }],
            "meta": {"total": 21, "page": 1, "last_page": 3}
        }))
        .unwrap();
        assert_eq!(page.data[0].action, LogActionKind::Update);
        assert_eq!(page.data[0].entity, LogEntity::PublisherReport);
        assert!(page.data[0].before.is_none());
        assert!(page.has_next());
    }
}
