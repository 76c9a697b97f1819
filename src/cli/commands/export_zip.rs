//! `export-zip` - download the publisher records archive for a service year

use super::{fail, CommandContext, EXIT_OK};
use crate::adapters::api::ReportsApi;
use crate::adapters::artifact::saver_for;
use crate::config::SaveTarget;
use crate::core::export::{PollPolicy, ZipExportRequest, ZipExporter};
use crate::domain::{CongregationId, ServicePeriod, ZipProgress};
use clap::Args;
use std::io::Write;
use tokio::sync::watch;

/// Arguments for the export-zip command
#[derive(Args, Debug)]
pub struct ExportZipArgs {
    /// Congregation id
    #[arg(long, env = "FIELDSERVICE_CONGREGATION_ID")]
    pub congregation: CongregationId,

    /// Service year (September-August, named by the year it ends);
    /// defaults to the one currently being reported
    #[arg(long)]
    pub service_year: Option<i32>,

    /// Override export.target (download or share)
    #[arg(long)]
    pub target: Option<SaveTarget>,

    /// Override export.download_dir
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Do not print progress
    #[arg(short, long)]
    pub quiet: bool,
}

/// One progress line, e.g. `processing 40% (20/50) Ana Pérez.pdf`
pub fn progress_line(progress: &ZipProgress) -> String {
    let mut line = format!(
        "{} {:>3.0}% ({}/{})",
        progress.status, progress.percent, progress.completed, progress.total
    );
    if let Some(ref file) = progress.current_file {
        line.push(' ');
        line.push_str(file);
    }
    line
}

impl ExportZipArgs {
    fn service_year(&self) -> i32 {
        self.service_year.unwrap_or_else(|| {
            ServicePeriod::initial(chrono::Local::now().date_naive()).service_year()
        })
    }

    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let context = match CommandContext::load(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let mut export_config = context.config.export.clone();
        if let Some(target) = self.target {
            tracing::info!(target = %target, "Overriding export target from CLI");
            export_config.target = target;
        }
        if let Some(ref dir) = self.output_dir {
            export_config.download_dir = dir.clone();
        }

        let request = ZipExportRequest {
            congregation_id: self.congregation,
            service_year: self.service_year(),
        };

        let reports = ReportsApi::new(context.client);
        let saver = saver_for(&export_config);
        let policy = PollPolicy::from_config(&export_config).with_cancel(shutdown_signal);
        let exporter = ZipExporter::new(&reports, saver.as_ref(), policy);

        println!(
            "📦 Generating ZIP for congregation {} service year {}",
            request.congregation_id, request.service_year
        );

        let quiet = self.quiet;
        let on_progress: &mut (dyn FnMut(&ZipProgress) + Send) = &mut |progress| {
            if quiet {
                return;
            }
            let mut stdout = std::io::stdout();
            let _ = write!(stdout, "\r   {:<72}", progress_line(progress));
            if progress.status.is_terminal() {
                let _ = writeln!(stdout);
            }
            let _ = stdout.flush();
        };

        let result = exporter
            .download_congregation_publishers_service_year_zip(request, Some(on_progress))
            .await;

        match result {
            Ok(outcome) => {
                if outcome.shared {
                    println!("✅ Saved and shared {}", outcome.path.display());
                } else {
                    println!("✅ Saved {}", outcome.path.display());
                }
                println!(
                    "   {} bytes, {} polls, {:.1}s",
                    outcome.bytes,
                    outcome.attempts,
                    outcome.duration.as_secs_f64()
                );
                Ok(EXIT_OK)
            }
            Err(e) => {
                if !quiet {
                    println!();
                }
                Ok(fail("ZIP export failed", &e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JobId, ZipStatus};

    #[test]
    fn test_progress_line() {
        let mut progress = ZipProgress::pending(JobId::new("j").unwrap());
        assert_eq!(progress_line(&progress), "pending   0% (0/0)");

        progress.status = ZipStatus::Processing;
        progress.percent = 40.0;
        progress.completed = 20;
        progress.total = 50;
        progress.current_file = Some("Ana Pérez.pdf".to_string());
        assert_eq!(progress_line(&progress), "processing  40% (20/50) Ana Pérez.pdf");
    }

    #[test]
    fn test_explicit_service_year() {
        let args = ExportZipArgs {
            congregation: CongregationId::new(1),
            service_year: Some(2024),
            target: None,
            output_dir: None,
            quiet: true,
        };
        assert_eq!(args.service_year(), 2024);
    }
}
