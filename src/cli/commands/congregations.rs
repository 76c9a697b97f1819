//! `congregations` - public congregation directory

use super::{finish, CommandContext};
use crate::adapters::api::CongregationsApi;
use crate::domain::{Congregation, Result};
use clap::{Args, Subcommand};

/// Arguments for the congregations command
#[derive(Args, Debug)]
pub struct CongregationsArgs {
    #[command(subcommand)]
    pub action: CongregationsAction,
}

#[derive(Subcommand, Debug)]
pub enum CongregationsAction {
    /// List congregations
    List,

    /// Register a congregation
    Create {
        #[arg(long)]
        name: String,
    },
}

impl CongregationsArgs {
    async fn run(&self, congregations: &CongregationsApi) -> Result<()> {
        match &self.action {
            CongregationsAction::List => {
                for congregation in congregations.list().await? {
                    let id = congregation
                        .id
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!("  {:>5}  {}", id, congregation.name);
                }
            }
            CongregationsAction::Create { name } => {
                let created = congregations.create(&Congregation::new(name.clone())).await?;
                let id = created.id.map(|id| id.to_string()).unwrap_or_default();
                println!("✅ Created congregation {} ({})", created.name, id);
            }
        }
        Ok(())
    }

    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let context = match CommandContext::load(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        let congregations = CongregationsApi::new(context.client);
        Ok(finish("Congregations request failed", self.run(&congregations).await))
    }
}
