//! `rostersync sync` — fetch every configured sheet and write artifacts.
//!
//! Artifacts are isolated: a failure in one sheet never blocks the
//! others, so a schema break in the sites sheet still leaves a fresh
//! assignments artifact. The command exits non-zero when anything
//! failed.

use std::path::Path;

use rostersync_pipeline::config::SheetRef;
use rostersync_pipeline::{
    build_assignments, build_signups, build_sites, export, rows_from_csv, Row, SyncConfig,
};

use crate::exit_codes;
use crate::fetch::{sheet_csv_url, SheetClient};
use crate::util::{load_config, write_artifact};
use crate::CliError;

pub fn cmd_sync(config_path: &Path, out_dir: &Path) -> Result<(), CliError> {
    let config = load_config(config_path)?;

    let configured = [
        config.sheets.assignments.is_some(),
        config.sheets.sites.is_some(),
        config.sheets.signups.is_some(),
    ]
    .into_iter()
    .filter(|c| *c)
    .count();
    if configured == 0 {
        return Err(CliError::usage("no sheets configured".to_string())
            .with_hint("add a [sheets.assignments] or [sheets.sites] table to the config"));
    }

    let client = SheetClient::new()?;
    let mut failures = 0usize;

    if let Some(sheet) = &config.sheets.assignments {
        if let Err(e) = sync_assignments(&client, &config, sheet, out_dir) {
            report("assignments", &e);
            failures += 1;
        }
    }
    if let Some(sheet) = &config.sheets.sites {
        if let Err(e) = sync_sites(&client, &config, sheet, out_dir) {
            report("sites", &e);
            failures += 1;
        }
    }
    if let Some(sheet) = &config.sheets.signups {
        if let Err(e) = sync_signups(&client, &config, sheet, out_dir) {
            report("signups", &e);
            failures += 1;
        }
    }

    if failures > 0 {
        return Err(CliError {
            code: exit_codes::EXIT_SYNC_PARTIAL,
            message: format!("{failures} of {configured} artifacts failed"),
            hint: None,
        });
    }
    Ok(())
}

fn report(label: &str, err: &CliError) {
    eprintln!("error: {label}: {}", err.message);
    if let Some(hint) = &err.hint {
        eprintln!("hint:  {hint}");
    }
}

fn fetch_rows(
    client: &SheetClient,
    config: &SyncConfig,
    label: &str,
    sheet: &SheetRef,
) -> Result<Vec<Row>, CliError> {
    let url = sheet_csv_url(&config.sheets.base_url, &sheet.sheet_id, &sheet.gid)?;
    eprintln!("fetching {label} sheet...");
    let text = client.fetch_csv(label, &url)?;
    rows_from_csv(&text).map_err(CliError::pipeline)
}

fn sync_assignments(
    client: &SheetClient,
    config: &SyncConfig,
    sheet: &SheetRef,
    out_dir: &Path,
) -> Result<(), CliError> {
    let rows = fetch_rows(client, config, "assignments", sheet)?;
    let (table, stats) =
        build_assignments(&rows, &config.columns.assignments).map_err(CliError::pipeline)?;
    let json = export::assignments_json(&table)
        .map_err(|e| CliError::error(format!("assignments serialization failed: {e}")))?;
    let path = out_dir.join(&config.output.assignments);
    write_artifact(&path, &json)?;
    eprintln!(
        "{}: {} volunteer keys ({} skipped, {} duplicate)",
        path.display(),
        table.len(),
        stats.skipped,
        stats.duplicate_keys,
    );
    Ok(())
}

fn sync_sites(
    client: &SheetClient,
    config: &SyncConfig,
    sheet: &SheetRef,
    out_dir: &Path,
) -> Result<(), CliError> {
    let rows = fetch_rows(client, config, "sites", sheet)?;
    let (sites, stats) = build_sites(&rows, &config.columns.sites).map_err(CliError::pipeline)?;
    let json = export::sites_json(&sites)
        .map_err(|e| CliError::error(format!("sites serialization failed: {e}")))?;
    let path = out_dir.join(&config.output.sites);
    write_artifact(&path, &json)?;
    eprintln!(
        "{}: {} sites ({} skipped)",
        path.display(),
        sites.len(),
        stats.skipped,
    );
    Ok(())
}

fn sync_signups(
    client: &SheetClient,
    config: &SyncConfig,
    sheet: &SheetRef,
    out_dir: &Path,
) -> Result<(), CliError> {
    let rows = fetch_rows(client, config, "signups", sheet)?;
    let (table, stats) =
        build_signups(&rows, &config.columns.signups).map_err(CliError::pipeline)?;
    let json = export::signups_json(&table)
        .map_err(|e| CliError::error(format!("signups serialization failed: {e}")))?;
    let path = out_dir.join(&config.output.signups);
    write_artifact(&path, &json)?;
    eprintln!(
        "{}: {} signup keys ({} skipped, {} duplicate)",
        path.display(),
        table.len(),
        stats.skipped,
        stats.duplicate_keys,
    );
    Ok(())
}
