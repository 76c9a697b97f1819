//! Monthly publisher report model and list query

use super::ids::{PersonId, PublisherReportId};
use serde::{Deserialize, Serialize};

/// One person's field-service activity for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublisherReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PublisherReportId>,

    pub person_id: PersonId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Calendar month, 1-12
    pub month: u32,

    pub participated: bool,

    pub bible_courses: u32,

    pub is_auxiliary_pioneer: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,
}

impl PublisherReport {
    /// Builds a new report for `person_id` covering `year`/`month`
    pub fn new(person_id: PersonId, year: i32, month: u32) -> Self {
        Self {
            id: None,
            person_id,
            service_year: None,
            year: Some(year),
            month,
            participated: false,
            bible_courses: 0,
            is_auxiliary_pioneer: false,
            hours: None,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Reported hours imply participation
    pub fn normalized(mut self) -> Self {
        if self.hours.unwrap_or(0) > 0 {
            self.participated = true;
        }
        if self.notes.as_deref().map(str::trim) == Some("") {
            self.notes = None;
        }
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(1..=12).contains(&self.month) {
            return Err(format!("month must be between 1 and 12, got {}", self.month));
        }
        if self.is_auxiliary_pioneer && self.hours.is_none() {
            return Err("hours are required for auxiliary pioneer reports".to_string());
        }
        Ok(())
    }
}

/// Sort direction for report listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid order '{other}'. Must be one of: asc, desc")),
        }
    }
}

/// Filters for `GET /publisher-reports`
#[derive(Debug, Clone, PartialEq)]
pub struct PublisherReportQuery {
    pub person_id: PersonId,
    pub service_year: Option<i32>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub limit: Option<u32>,
    pub order: Option<SortOrder>,
}

impl PublisherReportQuery {
    pub fn for_person(person_id: PersonId) -> Self {
        Self {
            person_id,
            service_year: None,
            year: None,
            month: None,
            limit: None,
            order: None,
        }
    }

    pub fn service_year(mut self, service_year: i32) -> Self {
        self.service_year = Some(service_year);
        self
    }

    pub fn period(mut self, year: i32, month: u32) -> Self {
        self.year = Some(year);
        self.month = Some(month);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Query pairs in the order the API documents them; unset filters are omitted
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("person_id", self.person_id.to_string())];
        if let Some(service_year) = self.service_year {
            pairs.push(("service_year", service_year.to_string()));
        }
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        if let Some(month) = self.month {
            pairs.push(("month", month.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(order) = self.order {
            pairs.push(("order", order.as_str().to_string()));
        }
        pairs
    }
}
