//! `rostersync build` — build one artifact from a local CSV export.
//!
//! Offline counterpart to `sync`: same pipeline, local file in. Useful
//! for dry-running a config change against last year's export before
//! pointing it at the live sheet.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use rostersync_pipeline::{
    build_assignments, build_signups, build_sites, export, rows_from_csv, SyncConfig,
};

use crate::util::{load_config, write_artifact};
use crate::CliError;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ArtifactKind {
    Assignments,
    Sites,
    Signups,
}

pub fn cmd_build(
    kind: ArtifactKind,
    input: &Path,
    config_path: Option<&Path>,
    output: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => SyncConfig::default(),
    };

    let text = fs::read_to_string(input)
        .map_err(|e| CliError::usage(format!("cannot read {}: {e}", input.display())))?;
    let rows = rows_from_csv(&text).map_err(CliError::pipeline)?;

    let serialize_err = |e: serde_json::Error| CliError::error(format!("serialization failed: {e}"));
    let (artifact, summary, default_name) = match kind {
        ArtifactKind::Assignments => {
            let (table, stats) =
                build_assignments(&rows, &config.columns.assignments).map_err(CliError::pipeline)?;
            (
                export::assignments_json(&table).map_err(serialize_err)?,
                format!(
                    "{} volunteer keys ({} skipped, {} duplicate)",
                    table.len(),
                    stats.skipped,
                    stats.duplicate_keys,
                ),
                config.output.assignments.clone(),
            )
        }
        ArtifactKind::Sites => {
            let (sites, stats) =
                build_sites(&rows, &config.columns.sites).map_err(CliError::pipeline)?;
            (
                export::sites_json(&sites).map_err(serialize_err)?,
                format!("{} sites ({} skipped)", sites.len(), stats.skipped),
                config.output.sites.clone(),
            )
        }
        ArtifactKind::Signups => {
            let (table, stats) =
                build_signups(&rows, &config.columns.signups).map_err(CliError::pipeline)?;
            (
                export::signups_json(&table).map_err(serialize_err)?,
                format!(
                    "{} signup keys ({} skipped, {} duplicate)",
                    table.len(),
                    stats.skipped,
                    stats.duplicate_keys,
                ),
                config.output.signups.clone(),
            )
        }
    };

    if json {
        println!("{artifact}");
    } else {
        let path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&default_name));
        write_artifact(&path, &artifact)?;
        eprintln!("{}: {summary}", path.display());
    }
    Ok(())
}
