//! `rostersync` — sync volunteer roster sheets into canonical JSON artifacts.

mod build;
mod exit_codes;
mod fetch;
mod sync;
mod util;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rostersync_pipeline::PipelineError;

use crate::build::ArtifactKind;

#[derive(Parser)]
#[command(name = "rostersync")]
#[command(about = "Sync volunteer roster sheets into canonical JSON artifacts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every configured sheet and write the JSON artifacts
    #[command(after_help = "Examples:
  rostersync sync
  rostersync sync --config event2026.toml --out-dir site/data")]
    Sync {
        /// Path to the roster TOML config
        #[arg(long, default_value = "roster.toml", env = "ROSTERSYNC_CONFIG")]
        config: PathBuf,

        /// Directory artifacts are written into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Build one artifact from a local CSV export
    #[command(after_help = "Examples:
  rostersync build assignments export-2026.csv
  rostersync build sites sites.csv --output site/data/sites.json
  rostersync build assignments export.csv --json | jq 'keys'")]
    Build {
        /// Which artifact to build
        kind: ArtifactKind,

        /// Local CSV file (a sheet export)
        input: PathBuf,

        /// Path to the roster TOML config (defaults apply when omitted)
        #[arg(long, env = "ROSTERSYNC_CONFIG")]
        config: Option<PathBuf>,

        /// Write the artifact here instead of the configured filename
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print the artifact JSON to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        json: bool,
    },

    /// Validate a roster config without fetching anything
    #[command(after_help = "Examples:
  rostersync validate roster.toml")]
    Validate {
        /// Path to the roster TOML config
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sync { config, out_dir } => sync::cmd_sync(&config, &out_dir),
        Commands::Build {
            kind,
            input,
            config,
            output,
            json,
        } => build::cmd_build(kind, &input, config.as_deref(), output.as_deref(), json),
        Commands::Validate { config } => cmd_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::from(exit_codes::EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = &e.hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(e.code)
        }
    }
}

fn cmd_validate(config_path: &Path) -> Result<(), CliError> {
    let config = util::load_config(config_path)?;
    let sheets = [
        ("assignments", config.sheets.assignments.is_some()),
        ("sites", config.sheets.sites.is_some()),
        ("signups", config.sheets.signups.is_some()),
    ];
    let configured: Vec<&str> = sheets
        .iter()
        .filter(|(_, present)| *present)
        .map(|(label, _)| *label)
        .collect();
    if configured.is_empty() {
        println!("{}: valid (no sheets configured)", config_path.display());
    } else {
        println!(
            "{}: valid ({})",
            config_path.display(),
            configured.join(", "),
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// Command error carrying its exit code and an optional operator hint.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn error(message: String) -> Self {
        Self {
            code: exit_codes::EXIT_ERROR,
            message,
            hint: None,
        }
    }

    pub fn usage(message: String) -> Self {
        Self {
            code: exit_codes::EXIT_USAGE,
            message,
            hint: None,
        }
    }

    /// Map a pipeline error onto the registered exit-code ranges.
    pub fn pipeline(err: PipelineError) -> Self {
        let (code, hint) = match &err {
            PipelineError::ConfigParse(_) | PipelineError::ConfigValidation(_) => {
                (exit_codes::EXIT_PIPELINE_CONFIG, None)
            }
            PipelineError::MissingColumn { field, .. } => (
                exit_codes::EXIT_PIPELINE_SCHEMA,
                Some(format!(
                    "the sheet's header for '{field}' changed; add it to [columns.*] in the config"
                )),
            ),
            PipelineError::CsvParse(_) => (exit_codes::EXIT_PIPELINE_PARSE, None),
        };
        Self {
            code,
            message: err.to_string(),
            hint,
        }
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }
}
