//! `kin` — command-line front end for the Kin import engine.
//!
//! # Usage
//!
//! ```
//! kin parse tree.ged
//! kin suggest tree.ged --people people.json
//! kin import tree.ged --people people.json --decisions decisions.json
//! ```
//!
//! People snapshots are JSON arrays of people; decision files map xrefs
//! to `"create"`, `"skip"`, or `{"match": "<person uuid>"}`. Imports run
//! against an in-memory store — a dry run that prints what a real
//! backend would have written.

use std::{
  collections::BTreeMap,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kin_core::person::Person;
use kin_gedcom::ParseReport;
use kin_import::{Decision, ImportSession};
use kin_store_memory::MemoryStore;
use serde::Deserialize;
use serde_json::json;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "kin", about = "GEDCOM import tooling for Kin")]
struct Cli {
  /// Path to a TOML config file (owner_id, people_file).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Parse a GEDCOM file and print the decoded document.
  Parse {
    /// The GEDCOM file to read.
    file: PathBuf,
  },

  /// Print match suggestions for a file against a people snapshot.
  Suggest {
    file: PathBuf,

    /// JSON snapshot of existing people.
    #[arg(long)]
    people: Option<PathBuf>,

    /// Tree owner; defaults to the config value, then the snapshot.
    #[arg(long)]
    owner: Option<Uuid>,
  },

  /// Dry-run an import against an in-memory store.
  Import {
    file: PathBuf,

    /// JSON snapshot of existing people to seed the store with.
    #[arg(long)]
    people: Option<PathBuf>,

    /// JSON map of xref → decision.
    #[arg(long)]
    decisions: PathBuf,

    /// Tree owner; defaults to the config value, then the snapshot.
    #[arg(long)]
    owner: Option<Uuid>,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  owner_id:    Option<Uuid>,
  #[serde(default)]
  people_file: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<ConfigFile> {
  match path {
    Some(path) => {
      let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
      toml::from_str(&raw).context("parsing config file")
    }
    None => Ok(ConfigFile::default()),
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let config = load_config(cli.config.as_deref())?;

  match cli.command {
    Command::Parse { file } => parse_command(&file),
    Command::Suggest {
      file,
      people,
      owner,
    } => suggest_command(&file, people, owner, &config),
    Command::Import {
      file,
      people,
      decisions,
      owner,
    } => import_command(&file, people, &decisions, owner, &config).await,
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

fn parse_command(file: &Path) -> Result<()> {
  let report = read_gedcom(file)?;
  report_warnings(&report);

  let summary = json!({
    "individuals_count": report.document.individuals.len(),
    "families_count": report.document.families.len(),
    "document": report.document,
  });
  println!("{}", serde_json::to_string_pretty(&summary)?);
  Ok(())
}

fn suggest_command(
  file: &Path,
  people: Option<PathBuf>,
  owner: Option<Uuid>,
  config: &ConfigFile,
) -> Result<()> {
  let report = read_gedcom(file)?;
  report_warnings(&report);

  let people = load_people(people.as_deref(), config)?;
  let owner = resolve_owner(owner, config, &people);

  let session = ImportSession::new(owner, display_name(file), report);
  let suggestions = session.suggestions(&people);
  println!("{}", serde_json::to_string_pretty(&suggestions)?);
  Ok(())
}

async fn import_command(
  file: &Path,
  people: Option<PathBuf>,
  decisions: &Path,
  owner: Option<Uuid>,
  config: &ConfigFile,
) -> Result<()> {
  let report = read_gedcom(file)?;
  report_warnings(&report);

  let people = load_people(people.as_deref(), config)?;
  let owner = resolve_owner(owner, config, &people);

  let raw = std::fs::read_to_string(decisions).with_context(|| {
    format!("reading decisions file {}", decisions.display())
  })?;
  let decisions: BTreeMap<String, Decision> =
    serde_json::from_str(&raw).context("parsing decisions file")?;

  let store = MemoryStore::new();
  for person in people {
    store.seed(person);
  }

  let mut session = ImportSession::new(owner, display_name(file), report);
  let stats = session.execute(&store, decisions).await?;

  let outcome = json!({
    "stats": stats,
    "people": store.people(),
    "relationships": store.relationships(),
  });
  println!("{}", serde_json::to_string_pretty(&outcome)?);
  Ok(())
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn read_gedcom(file: &Path) -> Result<ParseReport> {
  let bytes = std::fs::read(file)
    .with_context(|| format!("reading {}", file.display()))?;
  Ok(kin_gedcom::parse(&bytes))
}

fn report_warnings(report: &ParseReport) {
  for warning in &report.warnings {
    tracing::warn!("{warning}");
  }
}

fn load_people(
  flag: Option<&Path>,
  config: &ConfigFile,
) -> Result<Vec<Person>> {
  let path = flag.or(config.people_file.as_deref());
  match path {
    Some(path) => {
      let raw = std::fs::read_to_string(path).with_context(|| {
        format!("reading people snapshot {}", path.display())
      })?;
      serde_json::from_str(&raw).context("parsing people snapshot")
    }
    None => Ok(Vec::new()),
  }
}

/// CLI flag overrides config, which overrides the snapshot's owner.
fn resolve_owner(
  flag: Option<Uuid>,
  config: &ConfigFile,
  people: &[Person],
) -> Uuid {
  flag
    .or(config.owner_id)
    .or_else(|| people.first().map(|p| p.owner_id))
    .unwrap_or_else(|| {
      let owner = Uuid::new_v4();
      tracing::warn!(%owner, "no owner id supplied; using a fresh one");
      owner
    })
}

fn display_name(file: &Path) -> String {
  file
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_else(|| file.display().to_string())
}
