//! Small helpers shared across commands.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use rostersync_pipeline::SyncConfig;

use crate::CliError;

pub fn load_config(path: &Path) -> Result<SyncConfig, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::usage(format!("cannot read config {}: {e}", path.display())))?;
    SyncConfig::from_toml(&text).map_err(CliError::pipeline)
}

/// Write an artifact atomically: temp file beside the target, then rename.
/// An interrupted run never leaves a partially written artifact behind.
pub fn write_artifact(path: &Path, json: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::error(format!("cannot create {}: {e}", parent.display()))
            })?;
        }
    }

    let mut tmp_name = OsString::from(path.as_os_str());
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    fs::write(&tmp, json)
        .map_err(|e| CliError::error(format!("cannot write {}: {e}", tmp.display())))?;
    fs::rename(&tmp, path)
        .map_err(|e| CliError::error(format!("cannot rename {} into place: {e}", tmp.display())))
}
