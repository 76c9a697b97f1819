//! `teams` - field-service groups

use super::{finish, CommandContext};
use crate::adapters::api::TeamsApi;
use crate::domain::{CongregationId, Result, Team, TeamId};
use clap::{Args, Subcommand};

/// Arguments for the teams command
#[derive(Args, Debug)]
pub struct TeamsArgs {
    #[command(subcommand)]
    pub action: TeamsAction,
}

#[derive(Subcommand, Debug)]
pub enum TeamsAction {
    /// List the teams of a congregation
    List {
        #[arg(long, env = "FIELDSERVICE_CONGREGATION_ID")]
        congregation: CongregationId,
    },

    /// Show one team and its members
    Show { id: TeamId },

    /// Create a team
    Create {
        #[arg(long, env = "FIELDSERVICE_CONGREGATION_ID")]
        congregation: CongregationId,

        #[arg(long)]
        name: String,
    },

    /// Rename a team
    Rename {
        id: TeamId,

        #[arg(long)]
        name: String,
    },

    /// Delete a team
    Delete { id: TeamId },
}

fn print_team(team: &Team) {
    let id = team.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    let active = team
        .total_active_people
        .map(|n| format!(", {n} active"))
        .unwrap_or_default();
    println!("  {:>4}  {:<24} {} people{}", id, team.name, team.member_count(), active);
}

impl TeamsArgs {
    async fn run(&self, teams: &TeamsApi) -> Result<()> {
        match &self.action {
            TeamsAction::List { congregation } => {
                let list = teams.list_by_congregation(*congregation).await?;
                println!("🧑‍🤝‍🧑 {} teams", list.len());
                for team in &list {
                    print_team(team);
                }
            }
            TeamsAction::Show { id } => {
                let team = teams.get(*id).await?;
                print_team(&team);
                for person in &team.people {
                    println!("        - {}", person.display_name());
                }
            }
            TeamsAction::Create { congregation, name } => {
                let created = teams.create(&Team::new(name.clone(), *congregation)).await?;
                println!("✅ Created");
                print_team(&created);
            }
            TeamsAction::Rename { id, name } => {
                let mut team = teams.get(*id).await?;
                team.name = name.clone();
                let updated = teams.update(*id, &team).await?;
                println!("✅ Renamed");
                print_team(&updated);
            }
            TeamsAction::Delete { id } => {
                teams.delete(*id).await?;
                println!("🗑️  Deleted team {id}");
            }
        }
        Ok(())
    }

    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let context = match CommandContext::load(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        let teams = TeamsApi::new(context.client);
        Ok(finish("Teams request failed", self.run(&teams).await))
    }
}
