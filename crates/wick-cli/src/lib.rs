//! wick CLI - development server and build runner with live reload.
//!
//! This crate is the command-line shell around `wick-serve`: it parses
//! arguments, loads `wick.config.json` and `.env` files, resolves every
//! path to absolute form, and supplies the serve core with its two
//! collaborators - a build engine that runs the configured build command
//! and an asset copier that mirrors the configured copy pairs.
//!
//! # Architecture
//!
//! - [`cli`] - clap definitions for `wick serve` and `wick build`
//! - [`config`] - config file loading, merging, and path resolution
//! - [`env_file`] - `.env`-style file parsing for the build environment
//! - [`engine`] / [`copier`] - the shipped collaborator implementations
//! - [`error`] - error types with miette conversion at the binary boundary
//! - [`logger`] - structured logging built on tracing
//! - [`ui`] - terminal status messages and spinners

// Public modules
pub mod cli;
pub mod commands;
pub mod config;
pub mod copier;
pub mod engine;
pub mod env_file;
pub mod error;
pub mod logger;
pub mod ui;

// Re-export commonly used types
pub use config::WickConfig;
pub use error::{CliError, ConfigError, Result};
