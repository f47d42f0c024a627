//! Error types for the dev-server core.
//!
//! Failures fall into two classes with very different fates: startup
//! failures (initial copy, initial build, listener bind) abort the session
//! before it starts serving, while per-request and per-watch-cycle failures
//! are logged and isolated so the session keeps running.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the serve core.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The HTTP listener could not bind to the configured address
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address the listener tried to bind
        addr: SocketAddr,
        /// Underlying socket error
        source: std::io::Error,
    },

    /// The build engine reported a failed rebuild
    #[error("build failed: {0}")]
    Build(String),

    /// The asset copier reported a failed copy cycle
    #[error("asset copy failed: {0}")]
    Copy(String),

    /// Filesystem watcher errors
    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// A path handed to the watcher does not exist
    #[error("watched path does not exist: {}", .0.display())]
    WatchTargetMissing(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP server errors while serving
    #[error("server error: {0}")]
    Server(String),

    /// A serve session was asked to run more than once
    #[error("serve session already ran; create a fresh session to serve again")]
    SessionExhausted,
}

/// Result type alias using `ServeError` as the default error type.
pub type Result<T, E = ServeError> = std::result::Result<T, E>;
