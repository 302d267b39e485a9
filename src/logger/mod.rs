//! Structured logger factory.
//!
//! Builds a [`Logger`] from either an explicit level name or an environment
//! profile ("development"/"production"), writing synchronously to any number
//! of destinations (stdout, stderr, or append-mode files).
//!
//! # Design Decisions
//! - JSON encoding in production, human-readable in development
//! - Unknown level names fall back to "info" instead of failing
//! - Development always keeps a console destination for local runs
//! - Each logger owns its own dispatcher, so independent loggers can coexist

use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use thiserror::Error;
use tracing::dispatcher::{self, Dispatch};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::Layer;

pub const DEVELOPMENT: &str = "development";
pub const PRODUCTION: &str = "production";

const STDOUT: &str = "stdout";
const STDERR: &str = "stderr";

/// Error type for logger construction.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// A file destination could not be opened.
    #[error("unable to open log destination {path}: {source}")]
    Destination {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Log severity names accepted by [`build`].
///
/// The last three share the error filter threshold; their extra semantics
/// (panic, process exit) live on the [`Logger`] methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Dpanic,
    Panic,
    Fatal,
}

impl Level {
    /// Resolve a level name, case-insensitively. Unrecognized names fall
    /// back to `Info`.
    pub fn parse(name: &str) -> Level {
        match name.to_lowercase().as_str() {
            "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" => Level::Warn,
            "error" => Level::Error,
            "dpanic" => Level::Dpanic,
            "panic" => Level::Panic,
            "fatal" => Level::Fatal,
            _ => Level::Info,
        }
    }

    fn filter(self) -> LevelFilter {
        match self {
            Level::Debug => LevelFilter::DEBUG,
            Level::Info => LevelFilter::INFO,
            Level::Warn => LevelFilter::WARN,
            Level::Error | Level::Dpanic | Level::Panic | Level::Fatal => LevelFilter::ERROR,
        }
    }
}

/// Where a log record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogDestination {
    Stdout,
    Stderr,
    File(String),
}

impl LogDestination {
    fn parse(raw: &str) -> LogDestination {
        match raw {
            STDOUT => LogDestination::Stdout,
            STDERR => LogDestination::Stderr,
            path => LogDestination::File(path.to_string()),
        }
    }

    fn is_console(&self) -> bool {
        matches!(self, LogDestination::Stdout | LogDestination::Stderr)
    }
}

/// Resolved logger configuration for one profile or level name.
#[derive(Debug, Clone, Copy)]
struct Profile {
    level: Level,
    json: bool,
    development: bool,
}

fn resolve_profile(profile_or_level: &str) -> Profile {
    match profile_or_level.to_lowercase().as_str() {
        DEVELOPMENT => Profile {
            level: Level::Debug,
            json: false,
            development: true,
        },
        PRODUCTION => Profile {
            level: Level::Info,
            json: true,
            development: false,
        },
        other => Profile {
            level: Level::parse(other),
            json: true,
            development: false,
        },
    }
}

/// Parse destination strings, applying the profile's defaults: an empty list
/// becomes stderr, and development guarantees a console destination.
fn resolve_destinations(profile: Profile, paths: &[String]) -> Vec<LogDestination> {
    let mut destinations: Vec<LogDestination> =
        paths.iter().map(|p| LogDestination::parse(p)).collect();

    if destinations.is_empty() {
        destinations.push(LogDestination::Stderr);
    }

    if profile.development && !destinations.iter().any(LogDestination::is_console) {
        destinations.push(LogDestination::Stderr);
    }

    destinations
}

fn layer_for(
    destination: &LogDestination,
    profile: Profile,
) -> Result<Box<dyn Layer<Registry> + Send + Sync>, LoggerError> {
    let writer = match destination {
        LogDestination::Stdout => BoxMakeWriter::new(io::stdout),
        LogDestination::Stderr => BoxMakeWriter::new(io::stderr),
        LogDestination::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggerError::Destination {
                    path: path.clone(),
                    source,
                })?;
            // Mutex keeps file writes synchronous; no background flusher.
            BoxMakeWriter::new(Mutex::new(file))
        }
    };

    let layer = if profile.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(destination.is_console())
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    Ok(layer)
}

/// A structured logger writing to a fixed set of destinations.
///
/// Cloning is cheap; clones share the underlying dispatcher.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    development: bool,
}

impl Logger {
    fn with<R>(&self, f: impl FnOnce() -> R) -> R {
        dispatcher::with_default(&self.dispatch, f)
    }

    pub fn debug(&self, msg: &str) {
        self.with(|| tracing::debug!("{msg}"));
    }

    pub fn info(&self, msg: &str) {
        self.with(|| tracing::info!("{msg}"));
    }

    pub fn warn(&self, msg: &str) {
        self.with(|| tracing::warn!("{msg}"));
    }

    pub fn error(&self, msg: &str) {
        self.with(|| tracing::error!("{msg}"));
    }

    /// Logs at error severity; panics when built with the development
    /// profile.
    pub fn dpanic(&self, msg: &str) {
        self.with(|| tracing::error!("{msg}"));
        if self.development {
            panic!("{msg}");
        }
    }

    /// Logs at error severity, then panics.
    pub fn panic(&self, msg: &str) -> ! {
        self.with(|| tracing::error!("{msg}"));
        panic!("{msg}");
    }

    /// Logs at error severity, then terminates the process with a non-zero
    /// exit code.
    pub fn fatal(&self, msg: &str) -> ! {
        self.with(|| tracing::error!("{msg}"));
        std::process::exit(1);
    }

    /// Install this logger's dispatcher as the process-global tracing
    /// default, so events emitted by libraries land in the same
    /// destinations. Can only succeed once per process.
    pub fn install(&self) -> Result<(), dispatcher::SetGlobalDefaultError> {
        dispatcher::set_global_default(self.dispatch.clone())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("development", &self.development)
            .finish()
    }
}

/// Build a logger for the given profile or level name and destinations.
///
/// `profile_or_level` is either an environment name ("development" /
/// "production", case-insensitive) or one of the level names understood by
/// [`Level::parse`]. An empty destination list defaults to stderr.
pub fn build(profile_or_level: &str, paths_to_logs: &[String]) -> Result<Logger, LoggerError> {
    let profile = resolve_profile(profile_or_level);
    let destinations = resolve_destinations(profile, paths_to_logs);

    let mut layers = Vec::with_capacity(destinations.len());
    for destination in &destinations {
        layers.push(layer_for(destination, profile)?);
    }

    let subscriber = Registry::default().with(layers).with(profile.level.filter());

    Ok(Logger {
        dispatch: Dispatch::new(subscriber),
        development: profile.development,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_level_names_case_insensitively() {
        let cases = [
            ("debug", Level::Debug),
            ("INFO", Level::Info),
            ("Warn", Level::Warn),
            ("error", Level::Error),
            ("DPanic", Level::Dpanic),
            ("panic", Level::Panic),
            ("FATAL", Level::Fatal),
        ];
        for (name, expected) in cases {
            assert_eq!(Level::parse(name), expected, "level {name}");
        }
    }

    #[test]
    fn unknown_level_names_fall_back_to_info() {
        assert_eq!(Level::parse("verbose"), Level::Info);
        assert_eq!(Level::parse(""), Level::Info);
    }

    #[test]
    fn empty_destination_list_defaults_to_stderr() {
        let profile = resolve_profile(PRODUCTION);
        let destinations = resolve_destinations(profile, &[]);
        assert_eq!(destinations, vec![LogDestination::Stderr]);
    }

    #[test]
    fn development_appends_a_console_destination() {
        let profile = resolve_profile(DEVELOPMENT);
        let destinations = resolve_destinations(profile, &["logs/log".to_string()]);
        assert_eq!(
            destinations,
            vec![
                LogDestination::File("logs/log".to_string()),
                LogDestination::Stderr,
            ]
        );
    }

    #[test]
    fn development_does_not_duplicate_console_destinations() {
        let profile = resolve_profile(DEVELOPMENT);
        let destinations =
            resolve_destinations(profile, &["stdout".to_string(), "logs/log".to_string()]);
        assert_eq!(
            destinations,
            vec![
                LogDestination::Stdout,
                LogDestination::File("logs/log".to_string()),
            ]
        );
    }

    #[test]
    fn profile_defaults() {
        let dev = resolve_profile("Development");
        assert_eq!(dev.level, Level::Debug);
        assert!(!dev.json);
        assert!(dev.development);

        let prod = resolve_profile("production");
        assert_eq!(prod.level, Level::Info);
        assert!(prod.json);

        // Anything else behaves like production with the parsed level.
        let other = resolve_profile("warn");
        assert_eq!(other.level, Level::Warn);
        assert!(other.json);
        assert!(!other.development);
    }

    #[test]
    fn invalid_destination_path_fails_construction() {
        let missing_dir = "/nonexistent-scaffold-test-dir/log";
        let err = build(PRODUCTION, &[missing_dir.to_string()]).unwrap_err();
        match err {
            LoggerError::Destination { path, .. } => assert_eq!(path, missing_dir),
        }
    }

    #[test]
    fn logger_writes_to_file_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log");
        let path_str = path.to_str().unwrap().to_string();

        let logger = build(PRODUCTION, &[path_str]).unwrap();
        logger.info("hello from the logger");
        logger.debug("filtered out at info");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("hello from the logger"));
        assert!(contents.contains("INFO"));
        assert!(!contents.contains("filtered out at info"));
    }
}
