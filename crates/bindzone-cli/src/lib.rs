//! # bindzone-cli
//!
//! Command-line and menu front end for editing BIND zone files.
//!
//! ## Features
//!
//! - **Zone discovery**: zones and files read from `named.conf.local`
//! - **Record editing**: add, delete and update records with a preview
//! - **Safety**: timestamped backup before every change, serial bumped after
//! - **BIND tooling**: `named-checkzone`, `named-checkconf`, `rndc reload`
//! - **Interactive menu**: the default when no subcommand is given
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod education;
pub mod interactive;
pub mod logging;
pub mod output;

pub use cli::run;
