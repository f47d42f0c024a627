//! Serve session lifecycle.
//!
//! One `ServeSession` is one serve: initial copy + build, bind, serve until
//! the shutdown token fires, coordinated teardown, done. The session never
//! restarts; callers create a fresh one.
//!
//! Shutdown is driven by an injected [`CancellationToken`] rather than a
//! process-wide signal handler, so the whole lifecycle runs under test
//! without real OS signals.

use crate::engine::{AssetCopier, BuildEngine, CopyPair};
use crate::error::{Result, ServeError};
use crate::hub::ReloadHub;
use crate::options::ServeOptions;
use crate::server::{build_router, ServerState};
use crate::watch::{FileChange, FileWatcher};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Where a session is in its life.
///
/// `Initializing → Serving → ShuttingDown → Stopped`, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Initial copy, initial build, listener bind
    Initializing,
    /// Accepting requests; watchers active in watch mode
    Serving,
    /// Draining connections, stopping watchers, closing the hub
    ShuttingDown,
    /// Done; `run` has returned
    Stopped,
}

/// A single serve session.
///
/// Owns the reload hub and the collaborator handles for its whole lifetime;
/// the build engine and asset copier are created once by the caller and
/// never recreated mid-session.
pub struct ServeSession {
    options: ServeOptions,
    engine: Arc<dyn BuildEngine>,
    copier: Arc<dyn AssetCopier>,
    hub: Arc<ReloadHub>,
    state: RwLock<LifecycleState>,
}

impl ServeSession {
    /// Create a session over pre-resolved options and collaborators.
    pub fn new(
        options: ServeOptions,
        engine: Arc<dyn BuildEngine>,
        copier: Arc<dyn AssetCopier>,
    ) -> Self {
        Self {
            options,
            engine,
            copier,
            hub: Arc::new(ReloadHub::new()),
            state: RwLock::new(LifecycleState::Initializing),
        }
    }

    /// The session's reload hub.
    pub fn hub(&self) -> &Arc<ReloadHub> {
        &self.hub
    }

    /// The session's options.
    pub fn options(&self) -> &ServeOptions {
        &self.options
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> LifecycleState {
        *self.state.read()
    }

    /// Run the session to completion.
    ///
    /// Serves until `shutdown` is cancelled, then tears down in order:
    /// stop accepting connections and drain in-flight responses, stop both
    /// watchers, close the hub. Returns once the session is `Stopped`.
    ///
    /// # Errors
    ///
    /// Startup failures (initial copy, initial build, listener bind,
    /// watcher setup) abort the session before it serves. After startup the
    /// only error source is the listener itself; rebuild and copy failures
    /// during watch cycles are logged and never propagate here.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<()> {
        if self.lifecycle() != LifecycleState::Initializing {
            return Err(ServeError::SessionExhausted);
        }

        self.copier.copy_all(&self.options.copy_pairs).await?;
        self.engine.rebuild().await?;

        let listener = tokio::net::TcpListener::bind(self.options.addr)
            .await
            .map_err(|source| ServeError::Bind {
                addr: self.options.addr,
                source,
            })?;

        let router = build_router(Arc::new(ServerState {
            root: self.options.root.clone(),
            watch: self.options.watch,
            hub: Arc::clone(&self.hub),
        }));

        // Watchers must outlive their loops; dropping a FileWatcher stops
        // event delivery.
        let mut watchers = Vec::new();
        let mut watch_tasks = Vec::new();

        if self.options.watch {
            let (source_watcher, source_rx) =
                FileWatcher::new(vec![self.options.source_dir.clone()])?;
            watchers.push(source_watcher);
            watch_tasks.push(tokio::spawn(source_watch_loop(
                source_rx,
                Arc::clone(&self.engine),
                Arc::clone(&self.hub),
                shutdown.child_token(),
            )));

            if !self.options.copy_pairs.is_empty() {
                let watch_paths = self
                    .options
                    .copy_pairs
                    .iter()
                    .map(|pair| pair.watch_path().to_path_buf())
                    .collect();
                let (asset_watcher, asset_rx) = FileWatcher::new(watch_paths)?;
                watchers.push(asset_watcher);
                watch_tasks.push(tokio::spawn(asset_watch_loop(
                    asset_rx,
                    Arc::clone(&self.copier),
                    Arc::new(self.options.copy_pairs.clone()),
                    Arc::clone(&self.hub),
                    shutdown.child_token(),
                )));
            }
        }

        *self.state.write() = LifecycleState::Serving;
        tracing::info!(
            addr = %self.options.addr,
            root = %self.options.root.display(),
            watch = self.options.watch,
            "serving"
        );

        // Open reload streams never end on their own, so the hub closes as
        // the listener stops accepting; otherwise draining in-flight
        // responses would wait forever.
        let hub = Arc::clone(&self.hub);
        let signal = shutdown.clone();
        let serve_result = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                signal.cancelled().await;
                hub.close_all();
            })
            .await;

        *self.state.write() = LifecycleState::ShuttingDown;
        tracing::info!("shutting down");

        // Covers the path where the listener failed without a cancellation.
        shutdown.cancel();
        for task in watch_tasks {
            let _ = task.await;
        }
        drop(watchers);
        self.hub.close_all();

        *self.state.write() = LifecycleState::Stopped;

        serve_result.map_err(|e| ServeError::Server(e.to_string()))
    }
}

/// React to source-tree changes: rebuild, then reload on success.
///
/// Every event spawns its own cycle, so nothing here prevents two rebuilds
/// from overlapping when events outpace the engine; serializing them is the
/// engine's concern. A failed rebuild is logged and suppresses that cycle's
/// reload, nothing more.
async fn source_watch_loop(
    mut rx: mpsc::Receiver<FileChange>,
    engine: Arc<dyn BuildEngine>,
    hub: Arc<ReloadHub>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            change = rx.recv() => {
                let Some(change) = change else { break };
                tracing::info!(path = %change.path().display(), "source changed");

                let engine = Arc::clone(&engine);
                let hub = Arc::clone(&hub);
                tokio::spawn(async move {
                    match engine.rebuild().await {
                        Ok(()) => hub.broadcast().await,
                        Err(e) => tracing::error!(error = %e, "rebuild failed, reload skipped"),
                    }
                });
            }
        }
    }
}

/// React to asset changes: re-copy every pair, then reload on success.
///
/// The whole pair set is re-copied no matter which path changed. Copy
/// failures get the same treatment as rebuild failures: logged, reload
/// suppressed, session keeps running.
async fn asset_watch_loop(
    mut rx: mpsc::Receiver<FileChange>,
    copier: Arc<dyn AssetCopier>,
    pairs: Arc<Vec<CopyPair>>,
    hub: Arc<ReloadHub>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            change = rx.recv() => {
                let Some(change) = change else { break };
                tracing::info!(path = %change.path().display(), "asset changed");

                let copier = Arc::clone(&copier);
                let pairs = Arc::clone(&pairs);
                let hub = Arc::clone(&hub);
                tokio::spawn(async move {
                    match copier.copy_all(&pairs).await {
                        Ok(()) => hub.broadcast().await,
                        Err(e) => tracing::error!(error = %e, "asset copy failed, reload skipped"),
                    }
                });
            }
        }
    }
}
