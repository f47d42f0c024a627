//! Shipped build-engine implementations.
//!
//! wick deliberately does not know how to bundle; the build is whatever
//! command the user configured. `CommandBuildEngine` runs it through the
//! platform shell and reports the exit status as the rebuild result.

use async_trait::async_trait;
use std::path::PathBuf;
use wick_serve::{BuildEngine, Result, ServeError};

/// Runs the configured build command for every rebuild.
pub struct CommandBuildEngine {
    program: &'static str,
    args: Vec<String>,
    cwd: PathBuf,
    env: Vec<(String, String)>,
}

impl CommandBuildEngine {
    /// Wrap a command line in the platform shell.
    pub fn new(command: &str, cwd: PathBuf, env: Vec<(String, String)>) -> Self {
        let (program, args) = if cfg!(windows) {
            ("cmd", vec!["/C".to_string(), command.to_string()])
        } else {
            ("sh", vec!["-c".to_string(), command.to_string()])
        };
        Self {
            program,
            args,
            cwd,
            env,
        }
    }
}

#[async_trait]
impl BuildEngine for CommandBuildEngine {
    async fn rebuild(&self) -> Result<()> {
        tracing::debug!(command = ?self.args.last(), "running build command");

        let status = tokio::process::Command::new(self.program)
            .args(&self.args)
            .current_dir(&self.cwd)
            .envs(self.env.iter().cloned())
            .status()
            .await
            .map_err(|e| ServeError::Build(format!("failed to run build command: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(ServeError::Build(format!(
                "build command exited with {status}"
            )))
        }
    }
}

/// Engine for sessions with no build command configured.
///
/// Every rebuild succeeds immediately, which turns wick into a plain
/// live-reload static server: source changes still push reloads.
pub struct NoopBuildEngine;

#[async_trait]
impl BuildEngine for NoopBuildEngine {
    async fn rebuild(&self) -> Result<()> {
        Ok(())
    }
}
