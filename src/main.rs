use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intake_core::config::{max_slots_from_attr, read_optional_source, read_source};
use intake_core::{
    derive_age, Catalog, DependentSelection, FormConfig, IntakeForm, SelectOption, SlotList,
};
use intake_rut::Rut;

#[derive(Parser)]
#[command(name = "ssmo-intake")]
#[command(about = "Intake form helpers: RUT checks, facility cascades, pathology slots")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean, normalise, format or validate a RUT
    Rut {
        #[command(subcommand)]
        action: RutAction,
    },
    /// Derive age in whole years from a birth date
    Age {
        /// Birth date (YYYY-MM-DD or DD/MM/YYYY)
        birth_date: String,
        /// Reference date (defaults to today, UTC)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Show the facility options for a preselected facility or a district
    Facilities {
        /// Catalog JSON file (falls back to INTAKE_CATALOG_PATH)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Preselected facility name
        #[arg(long)]
        preselect: Option<String>,
        /// District to switch to after initialisation
        #[arg(long)]
        district: Option<String>,
    },
    /// Show pathology slots after seeding and optional edits
    Pathologies {
        /// JSON array of existing selections (falls back to INTAKE_PATHOLOGIES_PATH)
        #[arg(long)]
        values: Option<PathBuf>,
        /// Maximum number of slots (falls back to INTAKE_MAX_PATHOLOGIES)
        #[arg(long)]
        max: Option<String>,
        /// Slot edits applied in order, as INDEX=VALUE
        #[arg(long = "set")]
        edits: Vec<String>,
    },
    /// Initialise the whole form from the environment and print its state
    Form,
}

#[derive(Subcommand)]
enum RutAction {
    /// Strip everything except digits and K
    Clean { value: String },
    /// Canonical form, with legacy 0 rewritten to K
    Normalize { value: String },
    /// Display form, e.g. 12.345.678-5
    Format { value: String },
    /// Exit with an error if the check character is wrong
    Validate { value: String },
    /// Compute the check character for a body
    CheckDigit { body: String },
    /// Show canonical and display forms plus the issuance band
    Inspect { value: String },
}

/// Command-line entry point.
///
/// # Environment Variables
/// - `INTAKE_CATALOG_PATH`: district to facility catalog JSON
/// - `INTAKE_ORIGIN_FACILITY`: preselected origin facility
/// - `INTAKE_REFERRAL_FACILITY`: preselected referral facility
/// - `INTAKE_PATHOLOGIES_PATH`: JSON array of existing pathology selections
/// - `INTAKE_MAX_PATHOLOGIES`: maximum number of pathology slots
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ssmo_intake=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Rut { action }) => run_rut(action)?,
        Some(Commands::Age { birth_date, today }) => {
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            match derive_age(&birth_date, today) {
                Some(age) => println!("{}", age),
                None => println!(),
            }
        }
        Some(Commands::Facilities {
            catalog,
            preselect,
            district,
        }) => {
            let catalog_path = catalog.or_else(|| env_path("INTAKE_CATALOG_PATH"));
            let text = read_optional_source(catalog_path.as_deref())?;
            let catalog = std::sync::Arc::new(Catalog::from_json_lenient(&text));
            tracing::info!("loaded catalog with {} district(s)", catalog.len());

            let mut pair = DependentSelection::new(catalog);
            pair.initialise(preselect.as_deref());
            if let Some(district) = district {
                pair.change_district(&district);
            }
            print_pair("facility", &pair);
        }
        Some(Commands::Pathologies { values, max, edits }) => {
            let values_path = values.or_else(|| env_path("INTAKE_PATHOLOGIES_PATH"));
            let text = read_optional_source(values_path.as_deref())?;
            let max = max_slots_from_attr(
                max.or_else(|| std::env::var("INTAKE_MAX_PATHOLOGIES").ok()),
            );

            let mut slots = SlotList::from_json(max, &text);
            for edit in edits {
                let (index, value) = edit
                    .split_once('=')
                    .with_context(|| format!("expected INDEX=VALUE, got '{}'", edit))?;
                let index: usize = index
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid slot index '{}'", index))?;
                slots.set(index, value)?;
            }
            print_slots(&slots);
        }
        Some(Commands::Form) => {
            let config = config_from_env()?;
            let form = IntakeForm::initialise(&config);
            print_pair("origin", &form.origin);
            print_pair("referral", &form.referral);
            print_slots(&form.pathologies);
        }
        None => {
            println!("Use 'ssmo-intake --help' for commands");
        }
    }

    Ok(())
}

fn run_rut(action: RutAction) -> anyhow::Result<()> {
    match action {
        RutAction::Clean { value } => println!("{}", intake_rut::clean(&value)),
        RutAction::Normalize { value } => println!("{}", intake_rut::normalize(&value)),
        RutAction::Format { value } => println!("{}", intake_rut::format(&value)),
        RutAction::Validate { value } => {
            let rut = Rut::parse(&value)?;
            println!("{} is valid", rut);
        }
        RutAction::CheckDigit { body } => println!("{}", intake_rut::check_digit(&body)?),
        RutAction::Inspect { value } => {
            let rut = Rut::parse(&value)?;
            println!("canonical: {}", rut.canonical());
            println!("display:   {}", rut);
            if let Some(band) = rut.issuance_band() {
                if band.needs_review() {
                    tracing::warn!("{}", band);
                }
                println!("band:      {}", band);
            }
        }
    }
    Ok(())
}

fn config_from_env() -> anyhow::Result<FormConfig> {
    let catalog_json = match env_path("INTAKE_CATALOG_PATH") {
        Some(path) => read_source(&path)
            .with_context(|| format!("reading catalog {}", path.display()))?,
        None => String::new(),
    };
    let pathologies_json = read_optional_source(env_path("INTAKE_PATHOLOGIES_PATH").as_deref())?;

    Ok(FormConfig::from_sources(
        &catalog_json,
        std::env::var("INTAKE_ORIGIN_FACILITY").ok(),
        std::env::var("INTAKE_REFERRAL_FACILITY").ok(),
        &pathologies_json,
        std::env::var("INTAKE_MAX_PATHOLOGIES").ok(),
    ))
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

fn print_pair(label: &str, pair: &DependentSelection) {
    println!(
        "{} district: {}",
        label,
        pair.district().unwrap_or("(unresolved)")
    );
    for option in pair.facility_options() {
        print_option(option, pair.facility().unwrap_or_default() == option.value);
    }
}

fn print_slots(slots: &SlotList) {
    println!("slots: {}/{}", slots.len(), slots.max());
    for (index, value) in slots.values().into_iter().enumerate() {
        println!("  [{}] {}", index, if value.is_empty() { "(blank)" } else { value });
    }
}

fn print_option(option: &SelectOption, selected: bool) {
    let marker = if selected { "*" } else { " " };
    let label = if option.value.is_empty() {
        format!("({})", option.label)
    } else {
        option.label.clone()
    };
    println!("  {} {}", marker, label);
}
