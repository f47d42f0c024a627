//! Terminal UI utilities: status messages and a spinner.
//!
//! All output goes to stderr so piped stdout stays clean. Color handling
//! respects NO_COLOR and FORCE_COLOR and degrades gracefully when stderr is
//! not a terminal.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// Check if color output should be enabled.
///
/// NO_COLOR disables, FORCE_COLOR enables, otherwise terminal detection
/// decides.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::user_attended_stderr()
}

/// Initialize color support based on environment.
///
/// owo-colors respects NO_COLOR and terminal capabilities on its own; this
/// exists for explicit initialization at startup.
pub fn init_colors() {
    let _ = should_use_color();
}

/// Simple spinner for tasks without known duration.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Create and start a new spinner.
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("valid template")
                .tick_strings(&["◐", "◓", "◑", "◒"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// Update the spinner message while it's running.
    pub fn set_message(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    /// Finish with a success message.
    pub fn finish(&self, message: &str) {
        self.pb
            .finish_with_message(format!("{} {}", "✓".green(), message));
    }

    /// Finish with an error message.
    pub fn fail(&self, message: &str) {
        self.pb
            .finish_with_message(format!("{} {}", "✗".red(), message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_messages_do_not_panic() {
        success("Success message");
        info("Info message");
        warning("Warning message");
        error("Error message");
    }

    #[test]
    fn spinner_lifecycle_does_not_panic() {
        let spinner = Spinner::new("Working...");
        spinner.set_message("Still working...");
        spinner.finish("Done");
    }
}
