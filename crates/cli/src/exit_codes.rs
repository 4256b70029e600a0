//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract — cron jobs wrapping `rostersync sync` branch on
//! them, so changing an assigned code is a breaking change.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                                |
//! |---------|-----------|--------------------------------------------|
//! | 0       | Universal | Success                                    |
//! | 1       | Universal | General error (IO, unspecified)            |
//! | 2       | Universal | CLI usage error (bad args, missing file)   |
//! | 3-9     | pipeline  | Config / schema / input errors             |
//! | 50-59   | fetch     | Hosted-sheet CSV export errors             |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure (IO, serialization).
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Pipeline (3-9)
// =============================================================================

/// Config rejected (TOML parse failure or validation error).
pub const EXIT_PIPELINE_CONFIG: u8 = 3;

/// Schema error: a required field matched no column anywhere in the
/// dataset. The sheet layout drifted; fix `[columns.*]` in the config.
pub const EXIT_PIPELINE_SCHEMA: u8 = 4;

/// CSV input could not be parsed.
pub const EXIT_PIPELINE_PARSE: u8 = 5;

/// `sync` finished but one or more artifacts failed. Artifacts that
/// succeeded were still written.
pub const EXIT_SYNC_PARTIAL: u8 = 6;

// =============================================================================
// Fetch (50-59)
// =============================================================================

/// Upstream refused the export (401/403) - the sheet is not link-readable.
pub const EXIT_FETCH_FORBIDDEN: u8 = 51;

/// Request rejected by upstream (400).
pub const EXIT_FETCH_VALIDATION: u8 = 52;

/// Rate limited (429) and retries were exhausted.
pub const EXIT_FETCH_RATE_LIMIT: u8 = 53;

/// Upstream error (5xx, other 4xx) or network failure after retries.
pub const EXIT_FETCH_UPSTREAM: u8 = 54;
