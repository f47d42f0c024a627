//! Build command implementation.
//!
//! The startup phase of serve without the server: one full asset copy
//! followed by one run of the build command, then exit.

use crate::cli::BuildArgs;
use crate::config::WickConfig;
use crate::copier::FsAssetCopier;
use crate::engine::CommandBuildEngine;
use crate::error::Result;
use crate::ui;
use std::time::Instant;
use wick_serve::{AssetCopier, BuildEngine};

/// Execute the build command.
///
/// # Errors
///
/// Returns errors for invalid configuration, failed copies, and a failing
/// build command.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let config = WickConfig::from_build_args(&args)?;
    let start = Instant::now();

    let spinner = ui::Spinner::new("Copying assets...");
    if let Err(e) = FsAssetCopier.copy_all(&config.copy).await {
        spinner.fail("Asset copy failed");
        return Err(e.into());
    }

    if let Some(command) = &config.build_command {
        spinner.set_message("Building...");
        let engine = CommandBuildEngine::new(command, config.cwd.clone(), config.env.clone());
        if let Err(e) = engine.rebuild().await {
            spinner.fail("Build failed");
            return Err(e.into());
        }
    }

    spinner.finish(&format!(
        "Build completed in {}ms",
        start.elapsed().as_millis()
    ));
    Ok(())
}
