//! `rostersync-pipeline` — Schema-tolerant roster normalization pipeline.
//!
//! Pure engine crate: receives pre-loaded rows (or CSV text), returns built
//! artifacts. No CLI, network, or filesystem dependencies.

pub mod builder;
pub mod coerce;
pub mod config;
pub mod error;
pub mod export;
pub mod key;
pub mod model;
pub mod resolve;
pub mod rows;

pub use builder::{build_assignments, build_sites, build_signups};
pub use config::SyncConfig;
pub use error::PipelineError;
pub use model::{Assignment, BuildStats, RosterEntry, RosterTable, Row, Signup, Site};
pub use rows::rows_from_csv;
