//! `home` - congregation dashboard for one month

use super::{finish, CommandContext, EXIT_CONFIG};
use crate::adapters::api::ReportsApi;
use crate::domain::{CongregationId, ServicePeriod};
use clap::Args;

/// Arguments for the home command
#[derive(Args, Debug)]
pub struct HomeArgs {
    /// Congregation id
    #[arg(long, env = "FIELDSERVICE_CONGREGATION_ID")]
    pub congregation: CongregationId,

    /// Calendar year; defaults to the month currently being reported
    #[arg(long, requires = "month")]
    pub year: Option<i32>,

    /// Calendar month 1-12
    #[arg(long, requires = "year")]
    pub month: Option<u32>,
}

impl HomeArgs {
    fn period(&self) -> Result<ServicePeriod, String> {
        match (self.year, self.month) {
            (Some(year), Some(month)) => ServicePeriod::new(year, month),
            _ => Ok(ServicePeriod::initial(chrono::Local::now().date_naive())),
        }
    }

    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let period = match self.period() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let context = match CommandContext::load(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let reports = ReportsApi::new(context.client);
        let result = reports
            .congregation_home(self.congregation, period)
            .await
            .map(|home| {
                println!("📊 {} {} (service year {})", period.month_name(), period.year, period.service_year());
                println!();
                println!("  Teams: {}", home.total_teams);
                println!("  People: {} ({} active)", home.total_people, home.total_active_people);
                println!(
                    "  Reports: {}/{} ({:.1}%), {} missing",
                    home.registered_reports,
                    home.expected_reports,
                    home.completion_rate(),
                    home.missing_reports
                );
                println!();
                println!(
                    "  Publishers: {} reports, {} bible courses",
                    home.summary.publishers.reports, home.summary.publishers.bible_courses
                );
                println!(
                    "  Regular pioneers: {} reports, {} bible courses, {} hours",
                    home.summary.regular_pioneers.reports,
                    home.summary.regular_pioneers.bible_courses,
                    home.summary.regular_pioneers.hours
                );
                println!(
                    "  Auxiliary pioneers: {} reports, {} bible courses, {} hours",
                    home.summary.auxiliary_pioneers.reports,
                    home.summary.auxiliary_pioneers.bible_courses,
                    home.summary.auxiliary_pioneers.hours
                );
            });

        Ok(finish("Failed to load dashboard", result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_period() {
        let args = HomeArgs {
            congregation: CongregationId::new(1),
            year: Some(2024),
            month: Some(13),
        };
        assert!(args.period().is_err());
    }
}
