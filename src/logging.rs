use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::models::config::LOG_FILE_NAME;

/// Where log lines end up besides the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    File(PathBuf),
    ConsoleOnly,
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Open the log file in `log_dir`, falling back to the working directory
/// and then to console-only logging.
pub fn open_log_file(log_dir: &Path) -> (Option<File>, LogDestination) {
    let primary = log_dir.join(LOG_FILE_NAME);
    let opened = std::fs::create_dir_all(log_dir).and_then(|_| open_append(&primary));
    match opened {
        Ok(file) => return (Some(file), LogDestination::File(primary)),
        Err(e) => eprintln!(
            "⚠️ Warning: Could not create log file in {}: {}",
            log_dir.display(),
            e
        ),
    }

    let fallback = PathBuf::from(".").join(LOG_FILE_NAME);
    match open_append(&fallback) {
        Ok(file) => {
            eprintln!("⚠️ Logging to {} instead", fallback.display());
            (Some(file), LogDestination::File(fallback))
        }
        Err(e) => {
            eprintln!("⚠️ Warning: Could not create any log file ({}), logging to console only", e);
            (None, LogDestination::ConsoleOnly)
        }
    }
}

/// Install the global subscriber: console plus the log file when one could be opened.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging(log_dir: &Path) -> LogDestination {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (file, destination) = open_log_file(log_dir);

    let file_layer = file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
    });

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init();
    if let Err(e) = result {
        eprintln!("⚠️ Logging already initialized: {}", e);
    }

    destination
}
