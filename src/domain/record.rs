//! A publisher's record card for one service year
//!
//! The card always lists twelve months, September first. Months without a
//! report get an empty placeholder so gaps are visible, except for past
//! service years with no reports at all, which yield an empty card.

use super::ids::PersonId;
use super::period::ServicePeriod;
use super::publisher_report::PublisherReport;
use chrono::NaiveDate;

/// Calendar months in service-year order
pub const SERVICE_YEAR_MONTHS: [u32; 12] = [9, 10, 11, 12, 1, 2, 3, 4, 5, 6, 7, 8];

/// One row of the record card
#[derive(Debug, Clone, PartialEq)]
pub struct RecordMonth {
    pub period: ServicePeriod,
    pub report: PublisherReport,
    /// No report was found; `report` is an empty stand-in
    pub placeholder: bool,
    /// The month currently being reported
    pub is_current: bool,
    /// Not reportable yet
    pub is_future: bool,
}

/// Builds the record card for `person_id` from the reports of one service year
///
/// `today` decides which month is current (see [`ServicePeriod::initial`]).
/// Reports outside `service_year` are ignored; if two share a month the last
/// one wins.
pub fn service_year_record(
    person_id: PersonId,
    reports: &[PublisherReport],
    service_year: i32,
    today: NaiveDate,
) -> Vec<RecordMonth> {
    let current = ServicePeriod::initial(today);

    let in_year: Vec<&PublisherReport> = reports
        .iter()
        .filter(|r| r.service_year.map_or(true, |sy| sy == service_year))
        .collect();

    if in_year.is_empty() && service_year < current.service_year() {
        return Vec::new();
    }

    SERVICE_YEAR_MONTHS
        .iter()
        .map(|&month| {
            let period = ServicePeriod::in_service_year(service_year, month);
            let found = in_year.iter().rev().find(|r| r.month == month);

            let (report, placeholder) = match found {
                Some(report) => ((*report).clone(), false),
                None => {
                    let mut empty = PublisherReport::new(person_id, period.year, month);
                    empty.service_year = Some(service_year);
                    empty.hours = Some(0);
                    (empty, true)
                }
            };

            RecordMonth {
                period,
                report,
                placeholder,
                is_current: period == current,
                is_future: period > current,
            }
        })
        .collect()
}

/// Sum of reported hours on the card
pub fn total_hours(record: &[RecordMonth]) -> u32 {
    record.iter().map(|m| m.report.hours.unwrap_or(0)).sum()
}

/// Average hours per listed month, `0.0` for an empty card
pub fn average_hours(record: &[RecordMonth]) -> f64 {
    if record.is_empty() {
        return 0.0;
    }
    f64::from(total_hours(record)) / record.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn report(month: u32, hours: u32) -> PublisherReport {
        let year = if month >= 9 { 2024 } else { 2025 };
        let mut report = PublisherReport::new(PersonId::new(7), year, month);
        report.service_year = Some(2025);
        report.participated = true;
        report.hours = Some(hours);
        report
    }

    #[test]
    fn test_months_are_in_service_year_order() {
        let record = service_year_record(PersonId::new(7), &[], 2025, date(2025, 3, 25));
        let months: Vec<u32> = record.iter().map(|m| m.report.month).collect();
        assert_eq!(months, SERVICE_YEAR_MONTHS.to_vec());
        assert_eq!(record[0].period, ServicePeriod { year: 2024, month: 9 });
        assert_eq!(record[11].period, ServicePeriod { year: 2025, month: 8 });
    }

    #[test]
    fn test_missing_months_get_empty_placeholders() {
        let record = service_year_record(
            PersonId::new(7),
            &[report(10, 12), report(2, 5)],
            2025,
            date(2025, 3, 25),
        );

        assert_eq!(record.len(), 12);
        assert!(!record[1].placeholder);
        assert_eq!(record[1].report.hours, Some(12));
        assert!(!record[5].placeholder);

        let september = &record[0];
        assert!(september.placeholder);
        assert!(!september.report.participated);
        assert_eq!(september.report.hours, Some(0));
        assert_eq!(september.report.bible_courses, 0);
        assert_eq!(september.report.person_id, PersonId::new(7));
        assert_eq!(september.report.service_year, Some(2025));
        assert_eq!(september.report.year, Some(2024));

        assert_eq!(total_hours(&record), 17);
    }

    #[test]
    fn test_current_and_future_flags() {
        // On 10 March, February is still being reported
        let record = service_year_record(PersonId::new(7), &[], 2025, date(2025, 3, 10));

        let current: Vec<u32> = record
            .iter()
            .filter(|m| m.is_current)
            .map(|m| m.report.month)
            .collect();
        assert_eq!(current, vec![2]);

        let future: Vec<u32> = record
            .iter()
            .filter(|m| m.is_future)
            .map(|m| m.report.month)
            .collect();
        assert_eq!(future, vec![3, 4, 5, 6, 7, 8]);
        assert!(record[..5].iter().all(|m| !m.is_future));
    }

    #[test]
    fn test_whole_next_service_year_is_future() {
        let record = service_year_record(PersonId::new(7), &[], 2026, date(2025, 3, 25));
        assert!(record.iter().all(|m| m.is_future && !m.is_current));
    }

    #[test]
    fn test_past_year_without_reports_is_empty() {
        let record = service_year_record(PersonId::new(7), &[], 2023, date(2025, 3, 25));
        assert!(record.is_empty());
        assert_eq!(average_hours(&record), 0.0);
    }

    #[test]
    fn test_past_year_with_reports_is_filled() {
        let mut old = report(11, 8);
        old.service_year = Some(2023);
        let record = service_year_record(PersonId::new(7), &[old], 2023, date(2025, 3, 25));
        assert_eq!(record.len(), 12);
        assert!(record.iter().all(|m| !m.is_current && !m.is_future));
        assert_eq!(average_hours(&record), 8.0 / 12.0);
    }
}
