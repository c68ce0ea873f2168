//! Deployment health checks used by the `healthcheck` binary.

use std::fmt;
use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::models::Config;

/// A log file older than this is considered stale
pub const LOG_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    fn pass(message: impl Into<String>) -> Self {
        Self { status: CheckStatus::Pass, message: message.into() }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self { status: CheckStatus::Warn, message: message.into() }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self { status: CheckStatus::Fail, message: message.into() }
    }

    /// Warnings count as failures
    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = match self.status {
            CheckStatus::Pass => "✅",
            CheckStatus::Warn => "⚠️ ",
            CheckStatus::Fail => "❌",
        };
        write!(f, "{} {}", glyph, self.message)
    }
}

pub fn check_environment(config: &Config) -> CheckResult {
    match config.telegram_credentials() {
        Ok(_) => CheckResult::pass("Required environment variables are set"),
        Err(crate::error::ScreeningError::MissingCredentials(missing)) => {
            CheckResult::fail(format!("Missing environment variables: {}", missing.join(", ")))
        }
        Err(e) => CheckResult::fail(e.to_string()),
    }
}

pub fn check_excel_file(path: &Path) -> CheckResult {
    if path.is_file() {
        CheckResult::pass(format!("Excel file exists: {}", path.display()))
    } else {
        CheckResult::fail(format!("Excel file not found: {}", path.display()))
    }
}

pub fn check_output_directory(dir: &Path) -> CheckResult {
    if dir.is_dir() {
        CheckResult::pass("Output directory exists")
    } else {
        CheckResult::fail(format!("Output directory not found: {}", dir.display()))
    }
}

/// The log file must exist and have been written within [`LOG_MAX_AGE`] of `now`
pub fn check_log_file(path: &Path, now: SystemTime) -> CheckResult {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => return CheckResult::fail("Log file not found"),
    };
    let modified = match metadata.modified() {
        Ok(modified) => modified,
        Err(e) => return CheckResult::fail(format!("Error reading log file time: {}", e)),
    };

    // A modification time in the future counts as fresh
    let age = now.duration_since(modified).unwrap_or_default();
    if age > LOG_MAX_AGE {
        CheckResult::warn("Log file is older than 24 hours")
    } else {
        CheckResult::pass("Log file exists and is recent")
    }
}

/// Run every check in order
pub fn run_health_checks(config: &Config) -> Vec<CheckResult> {
    vec![
        check_environment(config),
        check_excel_file(&config.input_path()),
        check_output_directory(&config.output_dir),
        check_log_file(&config.log_file_path(), SystemTime::now()),
    ]
}
