//! Serve command implementation.
//!
//! Resolves configuration, wires the collaborators into a serve session,
//! and runs it until Ctrl+C. The session itself owns the lifecycle; this
//! layer only translates the OS signal into the session's shutdown token.

use crate::cli::ServeArgs;
use crate::config::WickConfig;
use crate::copier::FsAssetCopier;
use crate::engine::{CommandBuildEngine, NoopBuildEngine};
use crate::error::Result;
use crate::ui;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use wick_serve::{BuildEngine, ServeOptions, ServeSession};

/// Execute the serve command.
///
/// # Errors
///
/// Returns errors for invalid configuration and for startup failures
/// (initial copy, initial build, listener bind). Failures after startup are
/// handled inside the session and never surface here.
pub async fn execute(args: ServeArgs) -> Result<()> {
    let config = WickConfig::from_serve_args(&args)?;

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let options = if args.watch {
        ServeOptions::new(config.root.clone(), addr)
            .with_watch(config.src.clone(), config.copy.clone())
    } else {
        ServeOptions::new(config.root.clone(), addr).with_copy_pairs(config.copy.clone())
    };

    let engine: Arc<dyn BuildEngine> = match &config.build_command {
        Some(command) => Arc::new(CommandBuildEngine::new(
            command,
            config.cwd.clone(),
            config.env.clone(),
        )),
        None => Arc::new(NoopBuildEngine),
    };

    let session = ServeSession::new(options, engine, Arc::new(FsAssetCopier));

    ui::info(&format!("Serving {}", config.root.display()));
    if args.watch {
        ui::info(&format!("Watching {} for changes", config.src.display()));
    }
    ui::info(&format!(
        "Starting development server at {}",
        session.options().server_url()
    ));
    ui::info("Press Ctrl+C to stop");

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            ui::info("Shutting down development server...");
            signal_token.cancel();
        }
    });

    session.run(shutdown).await?;

    ui::success("Development server stopped");
    Ok(())
}
