//! CLI for publist - Build publication lists from BibTeX files.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;

use publist::{
    add_publications, builtin_style_names, generate_output, telemetry::init_tracing, BasicEngine,
    GenerationContext, Settings,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Build ordered, rendered publication lists from BibTeX files
#[derive(Parser)]
#[command(name = "publist")]
#[command(version)]
#[command(after_help = "\
Examples:
  publist build --bib pubs.bib --style numeric
  publist build --config publist.toml -o publications.json
  publist styles")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit log records as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the publication list and print the generation context as JSON
    #[command(after_help = "\
Examples:
  publist build --bib pubs.bib --style minimal
  publist build -c publist.toml --sort key
  publist build -c publist.toml --style my-style.toml -o out.json

Sort criteria: date (newest first, default), key, name")]
    Build {
        /// Settings file (TOML with src, style, sort, suppress_bibtex_warning)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// BibTeX file (overrides `src`)
        #[arg(short, long)]
        bib: Option<PathBuf>,

        /// Style: builtin name (see 'styles' command) or path to a style file
        #[arg(short, long)]
        style: Option<String>,

        /// Sort criterion (overrides `sort`)
        #[arg(long)]
        sort: Option<String>,

        /// Log unsupported-field warnings at warning level
        #[arg(long)]
        show_bibtex_warnings: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available builtin styles
    Styles,
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 11 — settings file not found / invalid
    Settings(String),
    /// Exit 15 — cannot write output file
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::Settings(_) => 11,
            AppError::OutputFile(_) => 15,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Settings(msg) => {
                write!(
                    f,
                    "{}\n  hint: settings are TOML with the keys src, style, sort and suppress_bibtex_warning",
                    msg
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    init_tracing(cli.json_logs, level);

    match cli.command {
        Commands::Build {
            config,
            bib,
            style,
            sort,
            show_bibtex_warnings,
            output,
        } => {
            let mut settings = match config {
                Some(path) => Settings::load(&path)
                    .map_err(|e| AppError::Settings(format!("'{}': {}", path.display(), e)))?,
                None => Settings::default(),
            };
            if bib.is_some() {
                settings.src = bib;
            }
            if style.is_some() {
                settings.style = style;
            }
            if let Some(sort) = sort {
                settings.sort = sort;
            }
            if show_bibtex_warnings {
                settings.suppress_bibtex_warning = false;
            }
            build_command(&settings, output.as_deref())?;
        }
        Commands::Styles => {
            styles_command();
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Build the publication list and write the generation context.
fn build_command(settings: &Settings, output: Option<&Path>) -> Result<(), AppError> {
    let mut context = GenerationContext::new();
    let mut engine = BasicEngine::new();

    add_publications(settings, &mut context, &mut engine);

    let result = generate_output(&context);

    if let Some(output_path) = output {
        fs::write(output_path, &result).map_err(|e| {
            AppError::OutputFile(format!("'{}': {}", output_path.display(), e))
        })?;
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{}", result)
            .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    }

    Ok(())
}

/// List available builtin styles.
fn styles_command() {
    for name in builtin_style_names() {
        println!("{}", name);
    }
}
