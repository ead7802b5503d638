//! `roster` — command-line front-end for a Roster API server.
//!
//! # Usage
//!
//! ```
//! roster --url http://localhost:7003 list
//! roster add --first-name Alice --last-name Anderson --dob 1990-01-01 \
//!   --department 1 --email alice@example.com
//! roster --config ~/.config/roster/config.toml departments
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use roster_client::{ClientConfig, RemoteRegistryClient};
use roster_core::{
  department::Department,
  person::Person,
  service::{DepartmentCatalog, PersonService},
};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Command-line client for the Roster personnel register")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the roster server (default: http://localhost:7003).
  #[arg(long, env = "ROSTER_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List everyone, ordered by last name.
  List,
  /// Show one person.
  Show { id: i64 },
  /// Add a new person.
  Add {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name:  String,
    /// Date of birth, `YYYY-MM-DD`.
    #[arg(long)]
    dob:        NaiveDate,
    #[arg(long)]
    department: i64,
    #[arg(long)]
    email:      String,
  },
  /// Change fields of an existing person; omitted fields keep their value.
  Update {
    id:         i64,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name:  Option<String>,
    #[arg(long)]
    dob:        Option<NaiveDate>,
    #[arg(long)]
    department: Option<i64>,
    #[arg(long)]
    email:      Option<String>,
  },
  /// Delete a person.
  Delete { id: i64 },
  /// List departments.
  Departments,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flag / env overrides config file, which overrides the default.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| "http://localhost:7003".to_string());

  let client = RemoteRegistryClient::new(ClientConfig::new(base_url))?;
  run(&client, args.command).await
}

async fn run(client: &RemoteRegistryClient, command: Command) -> Result<()> {
  match command {
    Command::List => {
      let Ok(people) = client.list_people().await;
      for person in &people {
        println!("{}", format_person(person));
      }
    }
    Command::Show { id } => {
      let Ok(person) = client.get_person(id).await;
      let Some(person) = person else {
        bail!("person {id} not found or service unavailable");
      };
      println!("{}", format_person(&person));
    }
    Command::Add { first_name, last_name, dob, department, email } => {
      let person = Person::new(first_name, last_name, dob, department, email);
      let Some(saved) = client.save_person(person).await else {
        bail!("person could not be saved");
      };
      println!("{}", format_person(&saved));
    }
    Command::Update { id, first_name, last_name, dob, department, email } => {
      let Ok(existing) = client.get_person(id).await;
      let Some(mut person) = existing else {
        bail!("person {id} not found or service unavailable");
      };
      if let Some(v) = first_name {
        person.first_name = v;
      }
      if let Some(v) = last_name {
        person.last_name = v;
      }
      if let Some(v) = dob {
        person.date_of_birth = Some(v);
      }
      if let Some(v) = department {
        person.department_id = v;
        person.department = None;
      }
      if let Some(v) = email {
        person.email = v;
      }
      let Some(saved) = client.save_person(person).await else {
        bail!("person {id} could not be updated");
      };
      println!("{}", format_person(&saved));
    }
    Command::Delete { id } => {
      let Ok(deleted) = client.delete_person(id).await;
      if !deleted {
        bail!("person {id} could not be deleted");
      }
      println!("deleted person {id}");
    }
    Command::Departments => {
      let Ok(departments) = client.list_departments().await;
      for Department { id, name } in &departments {
        println!("{id:>4}  {name}");
      }
    }
  }
  Ok(())
}

fn format_person(p: &Person) -> String {
  let dob = p
    .date_of_birth
    .map(|d| d.format("%Y-%m-%d").to_string())
    .unwrap_or_default();
  format!(
    "{:>4}  {:<20} {:<20} {:<10}  {:<16} {}",
    p.id,
    p.last_name,
    p.first_name,
    dob,
    p.department_name().unwrap_or("-"),
    p.email,
  )
}
