//! genlint CLI - gatekeeper for generated code and documents

mod json;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use colored::*;
use genlint_core::{config::CONFIG_FILE_NAME, validate_path, LintConfig, ValidationReport};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "genlint")]
#[command(author, version)]
#[command(
    about = "Validate generated code and documents against project constraints",
    long_about = "Validate generated code and documents against project constraints.\n\nChecks: banned technologies • naming • Vue/C# conventions • doc provenance • JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// File or directory to validate
    path: Option<PathBuf>,

    /// Project root holding the constraints and prompt registry files (defaults to current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Config file path (defaults to <root>/.genlint.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a file or directory
    Validate {
        /// File or directory to validate
        path: PathBuf,
    },

    /// Initialize config file
    Init {
        /// Output path for config
        #[arg(default_value = CONFIG_FILE_NAME)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Some(Commands::Validate { path }) => validate_command(path, &cli),
        Some(Commands::Init { output }) => init_command(output),
        None => match &cli.path {
            Some(path) => validate_command(path, &cli),
            None => {
                let _ = Cli::command().print_help();
                process::exit(1);
            }
        },
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout stays the report
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli, root: &Path) -> anyhow::Result<LintConfig> {
    if let Some(path) = &cli.config {
        return LintConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    let default_path = root.join(CONFIG_FILE_NAME);
    if default_path.is_file() {
        return LintConfig::load(&default_path)
            .with_context(|| format!("failed to load config {}", default_path.display()));
    }

    Ok(LintConfig::default())
}

/// Returns whether the run passed
fn validate_command(path: &Path, cli: &Cli) -> anyhow::Result<bool> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    // Findings carry canonical paths, keep the root comparable for relative output
    let root = root.canonicalize().unwrap_or(root);
    let config = load_config(cli, &root)?;

    if cli.format == OutputFormat::Text && cli.verbose {
        println!("{} {}", "Validating:".cyan().bold(), path.display());
        println!("{} {}", "Root:".cyan().bold(), root.display());
        println!();
    }

    let report = validate_path(path, config, &root)?;

    match cli.format {
        OutputFormat::Json => {
            let output = json::report_to_json(&report, &root);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print_text_report(&report, cli.verbose),
    }

    Ok(report.passed())
}

fn print_text_report(report: &ValidationReport, verbose: bool) {
    print!("{}", report.render());

    if verbose {
        for finding in report.errors.iter().chain(report.warnings.iter()) {
            if let Some(suggestion) = &finding.suggestion {
                println!(
                    "{}:{} {} {}",
                    finding.file.display().to_string().dimmed(),
                    finding.line,
                    "help:".cyan(),
                    suggestion
                );
            }
        }
        println!();
    }

    println!("{}", "─".repeat(60).dimmed());
    if report.passed() {
        println!("{}", "✓ Validation passed".green().bold());
    } else {
        println!("{}", "✗ Validation failed".red().bold());
    }
}

fn init_command(output: &Path) -> anyhow::Result<bool> {
    let default_config = LintConfig::default();
    let toml_content = toml::to_string_pretty(&default_config)?;

    std::fs::write(output, toml_content)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{} Created config file: {}",
        "✓".green().bold(),
        output.display()
    );

    Ok(true)
}
