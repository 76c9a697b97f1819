//! Congregation dashboard report

use serde::{Deserialize, Serialize};

/// Totals for publishers, who do not report hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PublisherTotals {
    pub reports: u32,
    pub bible_courses: u32,
}

/// Totals for pioneers, who report hours
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PioneerTotals {
    pub reports: u32,
    pub bible_courses: u32,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub publishers: PublisherTotals,
    pub regular_pioneers: PioneerTotals,
    pub auxiliary_pioneers: PioneerTotals,
}

/// Home dashboard for one congregation and month
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CongregationHomeReport {
    pub total_teams: u32,
    pub total_people: u32,
    pub total_active_people: u32,
    pub expected_reports: u32,
    pub registered_reports: u32,
    pub missing_reports: u32,
    pub summary: ReportSummary,
}

impl CongregationHomeReport {
    /// Share of expected reports already registered, 0-100
    pub fn completion_rate(&self) -> f64 {
        if self.expected_reports == 0 {
            return 100.0;
        }
        f64::from(self.registered_reports) / f64::from(self.expected_reports) * 100.0
    }

    /// Bible courses across every category
    pub fn total_bible_courses(&self) -> u32 {
        self.summary.publishers.bible_courses
            + self.summary.regular_pioneers.bible_courses
            + self.summary.auxiliary_pioneers.bible_courses
    }
}
