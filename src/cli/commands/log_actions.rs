//! `log-actions` - audit log

use super::{finish, CommandContext};
use crate::adapters::api::LogActionsApi;
use clap::Args;

/// Arguments for the log-actions command
#[derive(Args, Debug)]
pub struct LogActionsArgs {
    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u32>,

    /// Entries per page
    #[arg(long)]
    pub limit: Option<u32>,
}

impl LogActionsArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let context = match CommandContext::load(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let log = LogActionsApi::new(context.client);
        let result = log.list(self.page, self.limit).await.map(|page| {
            for entry in &page.data {
                let subject = entry
                    .person_name
                    .clone()
                    .unwrap_or_else(|| format!("{:?} {}", entry.entity, entry.entity_id));
                let action = format!("{:?}", entry.action).to_uppercase();
                println!(
                    "  {}  {:<6} {:<40} by {} {}",
                    entry.created_at,
                    action,
                    subject,
                    entry.user.first_name,
                    entry.user.last_name
                );
            }
            println!();
            println!(
                "Page {} of {} ({} entries)",
                page.meta.page, page.meta.last_page, page.meta.total
            );
            if page.has_next() {
                println!("Next: --page {}", page.meta.page + 1);
            }
        });

        Ok(finish("Failed to load audit log", result))
    }
}
