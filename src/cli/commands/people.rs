//! `people` - congregation members

use super::{finish, read_json, CommandContext};
use crate::adapters::api::PeopleApi;
use crate::domain::{format_long_date, person::sort_by_last_name, CongregationId, Person, PersonId, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments for the people command
#[derive(Args, Debug)]
pub struct PeopleArgs {
    #[command(subcommand)]
    pub action: PeopleAction,
}

#[derive(Subcommand, Debug)]
pub enum PeopleAction {
    /// List the people of a congregation, sorted by last name
    List {
        #[arg(long, env = "FIELDSERVICE_CONGREGATION_ID")]
        congregation: CongregationId,

        /// Hide inactive people
        #[arg(long)]
        active_only: bool,
    },

    /// Show one person
    Show { id: PersonId },

    /// Create a person from a JSON file
    Create {
        #[arg(long)]
        file: PathBuf,
    },

    /// Replace a person from a JSON file
    Update {
        id: PersonId,
        #[arg(long)]
        file: PathBuf,
    },

    /// Delete a person
    Delete { id: PersonId },
}

fn print_person(person: &Person) {
    let id = person.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    let mut roles = Vec::new();
    if person.is_elder.unwrap_or(false) {
        roles.push("elder");
    }
    if person.is_ministerial_servant.unwrap_or(false) {
        roles.push("ministerial servant");
    }
    if person.is_regular_pioneer.unwrap_or(false) {
        roles.push("regular pioneer");
    }
    if person.is_special_pioneer.unwrap_or(false) {
        roles.push("special pioneer");
    }
    if !person.is_active() {
        roles.push("inactive");
    }

    println!(
        "  {:>5}  {:<32} team {:<4} {}",
        id,
        person.display_name(),
        person.team_id,
        roles.join(", ")
    );
}

impl PeopleArgs {
    async fn run(&self, people: &PeopleApi) -> Result<()> {
        match &self.action {
            PeopleAction::List {
                congregation,
                active_only,
            } => {
                let mut list = people.list_by_congregation(*congregation).await?;
                if *active_only {
                    list.retain(Person::is_active);
                }
                sort_by_last_name(&mut list);
                println!("👥 {} people", list.len());
                for person in &list {
                    print_person(person);
                }
            }
            PeopleAction::Show { id } => {
                let person = people.get(*id).await?;
                print_person(&person);
                if let Some(born) = format_long_date(&person.birth_date) {
                    println!("         born {born}");
                }
                if let Some(baptized) = person.baptism_date.as_deref().and_then(format_long_date) {
                    println!("         baptized {baptized}");
                }
            }
            PeopleAction::Create { file } => {
                let person: Person = read_json(file)?;
                let created = people.create(&person).await?;
                println!("✅ Created");
                print_person(&created);
            }
            PeopleAction::Update { id, file } => {
                let person: Person = read_json(file)?;
                let updated = people.update(*id, &person).await?;
                println!("✅ Updated");
                print_person(&updated);
            }
            PeopleAction::Delete { id } => {
                people.delete(*id).await?;
                println!("🗑️  Deleted person {id}");
            }
        }
        Ok(())
    }

    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let context = match CommandContext::load(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        let people = PeopleApi::new(context.client);
        Ok(finish("People request failed", self.run(&people).await))
    }
}
