//! Run harness for bindcheck.
//!
//! This crate provides:
//! - Configuration: JSON config files merged with command-line overrides
//! - Run log: the human-readable `== Checking ...` log on stdout
//! - Structured log: optional JSONL mirror of every check event
//! - Runner + report: both checkers, failure aggregation and the exit status

#![forbid(unsafe_code)]

pub mod config;
pub mod report;
pub mod runlog;
pub mod runner;
pub mod structured_log;

pub use config::{CheckConfig, ConfigError, ConfigOverrides};
pub use report::CheckReport;
pub use runlog::{ConsoleLog, RunObserver};
pub use runner::{finish_run, run_checks};
