//! Reporting periods and service years
//!
//! A service year runs from September to August and is named after the
//! calendar year in which it ends: September 2023 through August 2024 is
//! service year 2024.

use chrono::{DateTime, Datelike, NaiveDate};

/// Last day of the month on which the previous month is still being reported
const REPORTING_GRACE_DAY: u32 = 20;

const MONTHS_ES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Service year that contains `year`/`month`
pub fn service_year_for(year: i32, month: u32) -> i32 {
    if month >= 9 {
        year + 1
    } else {
        year
    }
}

/// A calendar month being reported on
///
/// Ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ServicePeriod {
    pub year: i32,
    pub month: u32,
}

impl ServicePeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, String> {
        if !(1..=12).contains(&month) {
            return Err(format!("month must be between 1 and 12, got {month}"));
        }
        Ok(Self { year, month })
    }

    /// Period a new report defaults to on `today`
    ///
    /// Until the 20th, publishers are still handing in last month's report.
    pub fn initial(today: NaiveDate) -> Self {
        if today.day() <= REPORTING_GRACE_DAY {
            if today.month() == 1 {
                return Self {
                    year: today.year() - 1,
                    month: 12,
                };
            }
            return Self {
                year: today.year(),
                month: today.month() - 1,
            };
        }
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Calendar month `month` of service year `service_year`
    pub fn in_service_year(service_year: i32, month: u32) -> Self {
        let year = if month >= 9 { service_year - 1 } else { service_year };
        Self { year, month }
    }

    pub fn service_year(&self) -> i32 {
        service_year_for(self.year, self.month)
    }

    /// Spanish month name, e.g. "Marzo"
    pub fn month_name(&self) -> &'static str {
        MONTHS_ES[(self.month.clamp(1, 12) - 1) as usize]
    }
}

impl std::fmt::Display for ServicePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// Formats an API date as "1 de Mayo, 1990"
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, read in UTC. Returns `None`
/// for empty or unparseable input.
pub fn format_long_date(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.naive_utc().date()))?;
    Some(format!(
        "{} de {}, {}",
        date.day(),
        MONTHS_ES[date.month0() as usize],
        date.year()
    ))
}
