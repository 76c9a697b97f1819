//! `reports` - monthly publisher reports

use super::{finish, CommandContext};
use crate::adapters::api::PublisherReportsApi;
use crate::domain::{
    average_hours, service_year_record, total_hours, PersonId, PublisherReport, PublisherReportId,
    PublisherReportQuery, RecordMonth, Result, ServicePeriod, SortOrder,
};
use clap::{Args, Subcommand};

/// Arguments for the reports command
#[derive(Args, Debug)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub action: ReportsAction,
}

/// Editable report fields
#[derive(Args, Debug, Default)]
pub struct ReportFields {
    /// Took part in the ministry this month
    #[arg(long)]
    pub participated: Option<bool>,

    #[arg(long)]
    pub bible_courses: Option<u32>,

    /// Served as auxiliary pioneer; requires --hours
    #[arg(long)]
    pub auxiliary: Option<bool>,

    #[arg(long)]
    pub hours: Option<u32>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl ReportFields {
    fn apply(&self, report: &mut PublisherReport) {
        if let Some(participated) = self.participated {
            report.participated = participated;
        }
        if let Some(bible_courses) = self.bible_courses {
            report.bible_courses = bible_courses;
        }
        if let Some(auxiliary) = self.auxiliary {
            report.is_auxiliary_pioneer = auxiliary;
        }
        if let Some(hours) = self.hours {
            report.hours = Some(hours);
        }
        if let Some(ref notes) = self.notes {
            report.notes = Some(notes.clone());
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ReportsAction {
    /// List a person's reports
    List {
        #[arg(long)]
        person: PersonId,

        #[arg(long)]
        service_year: Option<i32>,

        #[arg(long, requires = "month")]
        year: Option<i32>,

        #[arg(long, requires = "year")]
        month: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,

        /// asc or desc
        #[arg(long)]
        order: Option<SortOrder>,
    },

    /// Show one report
    Show { id: PublisherReportId },

    /// Month-by-month record card for a service year, gaps included
    Record {
        #[arg(long)]
        person: PersonId,

        /// Defaults to the service year currently being reported
        #[arg(long)]
        service_year: Option<i32>,
    },

    /// Register a report; the period defaults to the month currently being reported
    Create {
        #[arg(long)]
        person: PersonId,

        #[arg(long, requires = "month")]
        year: Option<i32>,

        #[arg(long, requires = "year")]
        month: Option<u32>,

        #[command(flatten)]
        fields: ReportFields,
    },

    /// Change fields of an existing report
    Update {
        id: PublisherReportId,

        #[command(flatten)]
        fields: ReportFields,
    },

    /// Reports cannot be deleted; always fails
    Delete { id: PublisherReportId },
}

fn print_report(report: &PublisherReport) {
    let id = report.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    let period = match report.year {
        Some(year) => format!("{year}-{:02}", report.month),
        None => format!("????-{:02}", report.month),
    };
    let hours = report.hours.map(|h| format!("{h} h")).unwrap_or_default();
    println!(
        "  {:>6}  {}  {:<3} courses {:<3} {:<6} {}{}",
        id,
        period,
        if report.participated { "yes" } else { "no" },
        report.bible_courses,
        hours,
        if report.is_auxiliary_pioneer { "auxiliary " } else { "" },
        report.notes.as_deref().unwrap_or("")
    );
}

/// One record card row, e.g. `SEP 2024  yes  12 h  courses 1  < current`
fn record_line(month: &RecordMonth) -> String {
    let report = &month.report;
    let status = if month.is_future {
        "  "
    } else if report.participated {
        "yes"
    } else {
        "no"
    };
    let mut line = format!(
        "{} {}  {:<3} {:>3} h  courses {}",
        short_month(month.period.month),
        month.period.year,
        status,
        report.hours.unwrap_or(0),
        report.bible_courses
    );
    if report.is_auxiliary_pioneer {
        line.push_str("  auxiliary");
    }
    if month.is_current {
        line.push_str("  < current");
    } else if month.placeholder && !month.is_future {
        line.push_str("  missing");
    }
    line
}

fn short_month(month: u32) -> &'static str {
    const SHORT: [&str; 12] = [
        "ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SEP", "OCT", "NOV", "DIC",
    ];
    SHORT[(month.clamp(1, 12) - 1) as usize]
}

fn period_or_current(year: Option<i32>, month: Option<u32>) -> Result<ServicePeriod> {
    match (year, month) {
        (Some(year), Some(month)) => {
            ServicePeriod::new(year, month).map_err(crate::domain::AppError::Validation)
        }
        _ => Ok(ServicePeriod::initial(chrono::Local::now().date_naive())),
    }
}

impl ReportsArgs {
    async fn run(&self, reports: &PublisherReportsApi) -> Result<()> {
        match &self.action {
            ReportsAction::List {
                person,
                service_year,
                year,
                month,
                limit,
                order,
            } => {
                let mut query = PublisherReportQuery::for_person(*person);
                if let Some(service_year) = service_year {
                    query = query.service_year(*service_year);
                }
                if let (Some(year), Some(month)) = (year, month) {
                    query = query.period(*year, *month);
                }
                if let Some(limit) = limit {
                    query = query.limit(*limit);
                }
                if let Some(order) = order {
                    query = query.order(*order);
                }

                let list = reports.list(&query).await?;
                println!("📋 {} reports", list.len());
                for report in &list {
                    print_report(report);
                }
            }
            ReportsAction::Show { id } => {
                print_report(&reports.get(*id).await?);
            }
            ReportsAction::Record {
                person,
                service_year,
            } => {
                let today = chrono::Local::now().date_naive();
                let service_year =
                    service_year.unwrap_or_else(|| ServicePeriod::initial(today).service_year());
                let query = PublisherReportQuery::for_person(*person).service_year(service_year);
                let list = reports.list(&query).await?;
                let record = service_year_record(*person, &list, service_year, today);

                println!("📋 Service year {service_year}");
                if record.is_empty() {
                    println!("   No reports");
                    return Ok(());
                }
                for month in &record {
                    println!("  {}", record_line(month));
                }
                println!(
                    "   Total {} h, average {:.1} h",
                    total_hours(&record),
                    average_hours(&record)
                );
            }
            ReportsAction::Create {
                person,
                year,
                month,
                fields,
            } => {
                let period = period_or_current(*year, *month)?;
                let mut report = PublisherReport::new(*person, period.year, period.month);
                fields.apply(&mut report);
                let created = reports.create(report).await?;
                println!("✅ Report registered for {} {}", period.month_name(), period.year);
                print_report(&created);
            }
            ReportsAction::Update { id, fields } => {
                let mut report = reports.get(*id).await?;
                fields.apply(&mut report);
                let updated = reports.update(*id, report).await?;
                println!("✅ Updated");
                print_report(&updated);
            }
            ReportsAction::Delete { id } => {
                reports.delete(*id).await?;
            }
        }
        Ok(())
    }

    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let context = match CommandContext::load(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        let reports = PublisherReportsApi::new(context.client);
        Ok(finish("Reports request failed", self.run(&reports).await))
    }
}
