//! Designlint CLI
//!
//! Checks a serialized design document against a configurable style guide.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use designlint::{
    Configuration, DocumentProvider, Engine, FileStore, JsonDocument, JsonFormatter,
    OutputFormatter, TextFormatter,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "designlint",
    version,
    about = "Design standards checker",
    long_about = "Walks a design document tree and reports deviations from a \
                  configurable style guide: colors, typography, spacing, \
                  components, naming, accessibility."
)]
struct Cli {
    /// Document JSON file to check
    document: Option<PathBuf>,

    /// Configuration store file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Check only the root node, skip children
    #[arg(long)]
    shallow: bool,

    /// Check the document's recorded selection instead of the root
    #[arg(long)]
    selection: bool,

    /// Check one node by id instead of the root
    #[arg(long)]
    node: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Hide the statistics line
    #[arg(long)]
    no_stats: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    export_config: bool,

    /// Write a default configuration blob to the --config store and exit
    #[arg(long, requires = "config")]
    init_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    if cli.init_config {
        // clap guarantees --config is present here
        let path = cli.config.context("--init-config requires --config")?;
        let mut store = FileStore::new(&path);
        Configuration::default().save_to(&mut store)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(0);
    }

    let config = match &cli.config {
        Some(path) => {
            Configuration::load_from(&FileStore::new(path)).unwrap_or_else(|| {
                log::warn!(
                    "no usable configuration in {}, using defaults",
                    path.display()
                );
                Configuration::default()
            })
        }
        None => Configuration::default(),
    };

    if cli.export_config {
        println!("{}", config.export_text()?);
        return Ok(0);
    }

    let document_path = cli
        .document
        .context("no document file given (see --help)")?;
    let doc = JsonDocument::from_path(&document_path)
        .with_context(|| format!("could not read {}", document_path.display()))?;

    let engine = Engine::new(&config, &doc);
    let deep = !cli.shallow;

    let result = if let Some(id) = &cli.node {
        let node = doc
            .node_by_id(id)
            .with_context(|| format!("node '{}' not found in the document", id))?;
        engine.evaluate(node, deep)
    } else if cli.selection {
        let roots = doc.selection();
        if roots.is_empty() {
            bail!("document has no recorded selection");
        }
        engine.evaluate_all(&roots, deep)
    } else {
        engine.evaluate(&doc.root, deep)
    };

    let output = match cli.format {
        Format::Text => TextFormatter {
            colored: !cli.no_color,
            show_stats: !cli.no_stats,
        }
        .format(&result),
        Format::Json => JsonFormatter::new().format(&result),
    };
    print!("{}", output);

    Ok(if result.passed { 0 } else { 1 })
}
