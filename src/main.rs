//! SpentWise settings tool
//!
//! Inspect and reset the persisted SpentWise settings outside the application.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use spentwise_settings::storage::{JsonFileBackend, SETTINGS_FILE};
use spentwise_settings::types::options::choices_for;
use spentwise_settings::{Category, SettingKey, SettingsStore};

// =============================================================================
// CLI Arguments
// =============================================================================

/// SpentWise settings tool
#[derive(Parser, Debug)]
#[command(name = "spentwise-settings")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding settings.json (defaults to the user data directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List settings with their effective values
    Show {
        /// Only list one category
        #[arg(short, long)]
        category: Option<CategoryArg>,
    },

    /// Print the effective value of one setting
    Get {
        /// Stored key name, e.g. darkMode
        key: String,
    },

    /// Reset settings to their defaults
    Reset {
        /// What to reset
        target: ResetTarget,
    },

    /// Print where the settings are stored
    Path,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CategoryArg {
    Account,
    App,
    Notifications,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Account => Category::Account,
            CategoryArg::App => Category::AppPreferences,
            CategoryArg::Notifications => Category::Notifications,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ResetTarget {
    All,
    Account,
    App,
    Notifications,
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let store = match &args.data_dir {
        Some(dir) => SettingsStore::open(JsonFileBackend::new(dir.join(SETTINGS_FILE))),
        None => SettingsStore::open_default()?,
    };

    match args.command {
        Command::Show { category } => show(&store, category.map(Category::from)),
        Command::Get { key } => get(&store, &key)?,
        Command::Reset { target } => reset(&store, target)?,
        Command::Path => println!("{}", store.location()),
    }

    Ok(())
}

fn show(store: &SettingsStore, only: Option<Category>) {
    let snapshot = store.snapshot();
    for category in Category::ALL {
        if only.is_some_and(|c| c != category) {
            continue;
        }

        println!("[{}]", category);
        for entry in snapshot.iter().filter(|e| e.key.category() == category) {
            let marker = if entry.stored { "" } else { "  (default)" };
            println!("  {:<20} {}{}", entry.key.name(), entry.value, marker);
        }
        println!();
    }
}

fn get(store: &SettingsStore, name: &str) -> Result<()> {
    let Some(key) = SettingKey::from_name(name) else {
        let known: Vec<&str> = SettingKey::all().map(SettingKey::name).collect();
        bail!("Unknown setting '{}'. Known settings: {}", name, known.join(", "));
    };

    println!("{}", store.get(key));
    if let Some(choices) = choices_for(key) {
        println!("choices: {}", choices.join(", "));
    }
    Ok(())
}

fn reset(store: &SettingsStore, target: ResetTarget) -> Result<()> {
    match target {
        ResetTarget::All => store.reset_all_settings()?,
        ResetTarget::Account => store.reset_account_settings()?,
        ResetTarget::App => store.reset_app_preferences()?,
        ResetTarget::Notifications => store.reset_notification_settings()?,
    }
    println!("Settings reset ({:?}).", target);
    Ok(())
}
