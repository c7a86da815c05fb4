//! CLI interface for student-records

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::console::{self, Printer};
use crate::operations;
use crate::store::RecordStore;
use crate::types::{SortKey, SortOrder};

#[derive(Parser, Debug)]
#[command(name = "student-records")]
#[command(about = "Manage student records kept in a comma-separated text file", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Store file to use instead of the configured one
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Configuration file to use instead of the default location
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive menu (default when no command given)
    Menu,
    /// Print all records
    List {
        /// Sort by name, age or grade
        #[arg(short, long)]
        sort_by: Option<SortKey>,
        /// Sort descending
        #[arg(short, long, requires = "sort_by")]
        desc: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Case-insensitive substring search on names
    Search {
        /// Part of a name
        query: String,
        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },
    /// Count, averages, top and lowest grade
    Stats {
        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set the store file path
        #[arg(long)]
        set_store_path: Option<String>,
        /// Enable or disable coloured output
        #[arg(long)]
        set_color: Option<bool>,
        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
        /// Print the default configuration
        #[arg(long)]
        print_default: bool,
    },
}

pub fn run() -> Result<()> {
    execute(Cli::parse())
}

pub fn execute(cli: Cli) -> Result<()> {
    let config_path = config::resolve_config_path(cli.config_file.as_deref())?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => console::run(&load_config(&config_path, cli.file)?),
        Commands::List { sort_by, desc, json } => {
            let config = load_config(&config_path, cli.file)?;
            let order = if desc { SortOrder::Descending } else { SortOrder::Ascending };
            let store = RecordStore::new(&config.store.path);
            list_records(&store, sort_by, order, json, io::stdout().lock(), &stdout_display(&config))
        }
        Commands::Search { query, json } => {
            let config = load_config(&config_path, cli.file)?;
            let store = RecordStore::new(&config.store.path);
            search_records(&store, &query, json, io::stdout().lock(), &stdout_display(&config))
        }
        Commands::Stats { json } => {
            let config = load_config(&config_path, cli.file)?;
            let store = RecordStore::new(&config.store.path);
            show_statistics(&store, json, io::stdout().lock(), &stdout_display(&config))
        }
        Commands::Config { show, set_store_path, set_color, reset, print_default } => {
            manage_config(&config_path, show, set_store_path, set_color, reset, print_default)
        }
    }
}

/// Load configuration and apply the `--file` override
fn load_config(path: &Path, file: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::load_from(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    if let Some(file) = file {
        config.store.path = file;
    }
    tracing::debug!("Using store {}", config.store.path.display());
    Ok(config)
}

/// Display settings for stdout; no colour when it is redirected
fn stdout_display(config: &Config) -> config::DisplayConfig {
    config.display.for_output(io::stdout().is_terminal())
}

/// `config` subcommand. The first flag given wins.
fn manage_config(
    path: &Path,
    show: bool,
    set_store_path: Option<String>,
    set_color: Option<bool>,
    reset: bool,
    print_default: bool,
) -> Result<()> {
    if reset {
        config::reset_config(path)
    } else if let Some(store_path) = set_store_path {
        config::set_store_path(path, &store_path)
    } else if let Some(enabled) = set_color {
        config::set_color(path, enabled)
    } else if print_default {
        print!("{}", config::default_config_toml());
        Ok(())
    } else if show {
        config::show_config(path)
    } else {
        println!("Use --show to view configuration or --help for options.");
        Ok(())
    }
}

/// One-shot listing, optionally sorted
pub fn list_records<W: Write>(
    store: &RecordStore,
    sort_by: Option<SortKey>,
    order: SortOrder,
    json: bool,
    out: W,
    display: &config::DisplayConfig,
) -> Result<()> {
    let mut records = store.load()?;
    if let Some(key) = sort_by {
        operations::sort_records(&mut records, key, order);
    }

    if json {
        return write_json(out, &records);
    }

    let mut printer = Printer::new(out, display);
    if records.is_empty() {
        printer.info("No students found.")?;
    } else {
        let title = if sort_by.is_some() { "Sorted Students" } else { "Student Records" };
        printer.table(title, &records)?;
    }
    Ok(())
}

/// One-shot search
pub fn search_records<W: Write>(
    store: &RecordStore,
    query: &str,
    json: bool,
    out: W,
    display: &config::DisplayConfig,
) -> Result<()> {
    if query.trim().is_empty() {
        anyhow::bail!(crate::error::InputError::EmptyQuery);
    }
    let records = store.load()?;
    let found = operations::search(&records, query);

    if json {
        return write_json(out, &found);
    }

    let mut printer = Printer::new(out, display);
    if found.is_empty() {
        printer.info(&format!("No student found matching '{}'.", query.trim()))?;
    } else {
        printer.matches(&found)?;
    }
    Ok(())
}

/// One-shot statistics
pub fn show_statistics<W: Write>(
    store: &RecordStore,
    json: bool,
    out: W,
    display: &config::DisplayConfig,
) -> Result<()> {
    let records = store.load()?;
    let stats = operations::statistics(&records);

    if json {
        return write_json(out, &stats);
    }

    let mut printer = Printer::new(out, display);
    match stats {
        Some(stats) => printer.statistics(&stats)?,
        None => printer.info("No students found.")?,
    }
    Ok(())
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(mut out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value).context("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}
