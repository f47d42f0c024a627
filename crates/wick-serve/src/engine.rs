//! Collaborator seams: the build engine and the asset copier.
//!
//! The serve core decides *when* a rebuild or an asset copy happens, never
//! what either of them does. Implementations live with the caller; the
//! session holds one `Arc` of each for its whole lifetime.

use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// One static-asset mapping: copy `from` to `to`.
///
/// Both sides are absolute; relative paths are resolved by the CLI layer
/// before a pair reaches this crate. The set of pairs is fixed for the
/// lifetime of a serve session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPair {
    /// Source file or directory
    pub from: PathBuf,
    /// Destination file or directory under the served output tree
    pub to: PathBuf,
}

impl CopyPair {
    /// Create a new copy pair.
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The watched side of the pair.
    pub fn watch_path(&self) -> &Path {
        &self.from
    }
}

/// Produces the bundled application artifact.
///
/// `rebuild` is invoked once during session startup and then once per
/// source-change event. Calls may overlap when events arrive faster than a
/// rebuild completes; serializing overlapping rebuilds is the engine's own
/// concern.
#[async_trait]
pub trait BuildEngine: Send + Sync {
    /// Rebuild the application artifact.
    async fn rebuild(&self) -> Result<()>;
}

/// Copies configured static-asset pairs into the served output tree.
///
/// Every invocation re-copies **all** pairs in full; there is no
/// incremental or per-pair copying.
#[async_trait]
pub trait AssetCopier: Send + Sync {
    /// Copy every configured pair.
    async fn copy_all(&self, pairs: &[CopyPair]) -> Result<()>;
}
