//! Live-reload development server core for the wick toolchain.
//!
//! This crate contains the concurrent heart of wick: an HTTP server for the
//! bundled output directory, a Server-Sent-Events hub that pushes reload
//! notifications to connected browsers, filesystem watchers that trigger
//! rebuilds and asset re-copies, and the lifecycle that wires them together.
//!
//! The pieces that are *not* concurrent live elsewhere: argument parsing,
//! config loading, and path resolution happen in `wick-cli` before this
//! crate is ever entered. The build itself and the asset copying are
//! collaborators behind the [`BuildEngine`] and [`AssetCopier`] traits;
//! this crate decides *when* to invoke them, never *what* they do.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use wick_serve::{ServeOptions, ServeSession};
//! # use wick_serve::{AssetCopier, BuildEngine, CopyPair};
//! # struct Engine;
//! # #[async_trait::async_trait]
//! # impl BuildEngine for Engine {
//! #     async fn rebuild(&self) -> wick_serve::Result<()> { Ok(()) }
//! # }
//! # struct Copier;
//! # #[async_trait::async_trait]
//! # impl AssetCopier for Copier {
//! #     async fn copy_all(&self, _: &[CopyPair]) -> wick_serve::Result<()> { Ok(()) }
//! # }
//!
//! # async fn run() -> wick_serve::Result<()> {
//! let options = ServeOptions::new("/project/dist", ([127, 0, 0, 1], 3000).into())
//!     .with_watch("/project/src", vec![]);
//! let session = ServeSession::new(options, Arc::new(Engine), Arc::new(Copier));
//!
//! let shutdown = CancellationToken::new();
//! session.run(shutdown).await
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod hub;
pub mod options;
pub mod server;
pub mod session;
pub mod watch;

// Re-export commonly used types
pub use engine::{AssetCopier, BuildEngine, CopyPair};
pub use error::{Result, ServeError};
pub use hub::{ClientHandle, ReloadHub};
pub use options::ServeOptions;
pub use server::{build_router, ServerState, SharedState};
pub use session::{LifecycleState, ServeSession};
pub use watch::{FileChange, FileWatcher};
