//! Shipped asset copier.
//!
//! Every invocation mirrors every configured pair in full: files are copied
//! byte-for-byte, directories recursively. There is deliberately nothing
//! incremental here; a copy cycle after a change re-copies all pairs.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use wick_serve::{AssetCopier, CopyPair, Result, ServeError};

/// Filesystem-backed asset copier.
pub struct FsAssetCopier;

#[async_trait]
impl AssetCopier for FsAssetCopier {
    async fn copy_all(&self, pairs: &[CopyPair]) -> Result<()> {
        for pair in pairs {
            copy_pair(pair).await.map_err(|e| {
                ServeError::Copy(format!(
                    "{} -> {}: {}",
                    pair.from.display(),
                    pair.to.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

async fn copy_pair(pair: &CopyPair) -> io::Result<()> {
    let metadata = tokio::fs::metadata(&pair.from).await?;
    if metadata.is_dir() {
        copy_dir(&pair.from, &pair.to).await
    } else {
        if let Some(parent) = pair.to.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::copy(&pair.from, &pair.to).await?;
        Ok(())
    }
}

/// Depth-first directory copy over an explicit stack; async fns cannot
/// recurse without boxing.
async fn copy_dir(from: &Path, to: &Path) -> io::Result<()> {
    let mut stack: Vec<(PathBuf, PathBuf)> = vec![(from.to_path_buf(), to.to_path_buf())];

    while let Some((src, dst)) = stack.pop() {
        tokio::fs::create_dir_all(&dst).await?;

        let mut entries = tokio::fs::read_dir(&src).await?;
        while let Some(entry) = entries.next_entry().await? {
            let target = dst.join(entry.file_name());
            if entry.file_type().await?.is_dir() {
                stack.push((entry.path(), target));
            } else {
                tokio::fs::copy(entry.path(), target).await?;
            }
        }
    }

    Ok(())
}
