//! Serve session options.
//!
//! Everything in here arrives pre-resolved: the CLI layer turns arguments,
//! config files and the working directory into absolute paths before
//! constructing a `ServeOptions`.

use crate::engine::CopyPair;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Configuration for one serve session.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Output root the static file server serves from (absolute)
    pub root: PathBuf,

    /// Socket address the HTTP listener binds
    pub addr: SocketAddr,

    /// Whether watch mode (rebuild + re-copy + reload) is enabled
    pub watch: bool,

    /// Source tree watched for rebuild-triggering changes (absolute)
    pub source_dir: PathBuf,

    /// Static-asset pairs; the `from` side of each is watched
    pub copy_pairs: Vec<CopyPair>,
}

impl ServeOptions {
    /// Create options for a plain serve session (watch disabled).
    pub fn new(root: impl Into<PathBuf>, addr: SocketAddr) -> Self {
        Self {
            root: root.into(),
            addr,
            watch: false,
            source_dir: PathBuf::new(),
            copy_pairs: Vec::new(),
        }
    }

    /// Enable watch mode with the given source tree and copy pairs.
    pub fn with_watch(mut self, source_dir: impl Into<PathBuf>, copy_pairs: Vec<CopyPair>) -> Self {
        self.watch = true;
        self.source_dir = source_dir.into();
        self.copy_pairs = copy_pairs;
        self
    }

    /// Set the copy pairs without enabling watch mode.
    ///
    /// The initial copy in the session's startup phase runs over these even
    /// when nothing watches them afterwards.
    pub fn with_copy_pairs(mut self, copy_pairs: Vec<CopyPair>) -> Self {
        self.copy_pairs = copy_pairs;
        self
    }

    /// The server URL as a string.
    pub fn server_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_to_watch_disabled() {
        let options = ServeOptions::new("/project/dist", "127.0.0.1:3000".parse().unwrap());
        assert!(!options.watch);
        assert!(options.copy_pairs.is_empty());
    }

    #[test]
    fn with_watch_enables_watch_mode() {
        let pairs = vec![CopyPair::new("/project/public", "/project/dist/public")];
        let options = ServeOptions::new("/project/dist", "127.0.0.1:3000".parse().unwrap())
            .with_watch("/project/src", pairs.clone());
        assert!(options.watch);
        assert_eq!(options.source_dir, PathBuf::from("/project/src"));
        assert_eq!(options.copy_pairs, pairs);
    }

    #[test]
    fn server_url_format() {
        let options = ServeOptions::new("/project/dist", "127.0.0.1:3000".parse().unwrap());
        assert_eq!(options.server_url(), "http://127.0.0.1:3000");
    }
}
