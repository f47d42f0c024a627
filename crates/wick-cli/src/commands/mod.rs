//! Command implementations for the wick CLI.
//!
//! - [`serve`] - development server with live reload
//! - [`build`] - one-shot asset copy plus build
//!
//! Each command provides an `execute` function taking the parsed arguments.

pub mod build;
pub mod serve;

// Re-export execute functions for convenience
pub use build::execute as build_execute;
pub use serve::execute as serve_execute;
