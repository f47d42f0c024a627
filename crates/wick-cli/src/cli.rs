//! Command-line interface definition for wick.
//!
//! Defines the CLI structure using clap's derive macros. Paths accepted
//! here may be relative; they are resolved to absolute form by
//! [`crate::config`] before anything reaches the serve core.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// wick - serve and rebuild bundled web apps with live reload
#[derive(Parser, Debug)]
#[command(
    name = "wick",
    version,
    about = "Serve and rebuild bundled web apps with live reload",
    long_about = "wick serves a build output directory over HTTP and, in watch mode,\n\
                  reruns your build command and re-copies static assets whenever\n\
                  sources change, reloading connected browsers over Server-Sent Events."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available wick subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the output directory, rebuilding and reloading on changes
    ///
    /// Copies configured assets and runs the build command once, then serves
    /// the output root. With --watch, source and asset changes trigger a
    /// rebuild or re-copy plus a browser reload.
    Serve(ServeArgs),

    /// Copy assets and run the build command once
    ///
    /// The startup phase of `serve` without the server: one full asset copy
    /// followed by one build, then exit.
    Build(BuildArgs),
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Directory to serve (the build output root)
    ///
    /// Defaults to "dist", or the "root" field of wick.config.json.
    #[arg(value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Port to bind on 127.0.0.1
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Rebuild, re-copy assets and reload browsers on changes
    #[arg(short, long)]
    pub watch: bool,

    /// Source directory watched for rebuild-triggering changes
    ///
    /// Defaults to "src", or the "src" field of wick.config.json.
    #[arg(long, value_name = "DIR")]
    pub src: Option<PathBuf>,

    /// Static asset pair copied into the output tree, as FROM:TO
    ///
    /// Repeatable. Every change to any FROM side re-copies all pairs.
    #[arg(long = "copy", value_name = "FROM:TO")]
    pub copy: Vec<String>,

    /// Command run to (re)build the bundle
    ///
    /// Executed through the platform shell with the env file applied.
    /// Without one, wick serves statically and still live-reloads.
    #[arg(long = "build-cmd", value_name = "CMD")]
    pub build_cmd: Option<String>,

    /// Env file loaded into the build command's environment
    ///
    /// Defaults to ".env" in the working directory when present.
    #[arg(long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Working directory for resolving paths and running the build
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Static asset pair copied into the output tree, as FROM:TO
    #[arg(long = "copy", value_name = "FROM:TO")]
    pub copy: Vec<String>,

    /// Command run to build the bundle
    #[arg(long = "build-cmd", value_name = "CMD")]
    pub build_cmd: Option<String>,

    /// Env file loaded into the build command's environment
    #[arg(long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Working directory for resolving paths and running the build
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}
