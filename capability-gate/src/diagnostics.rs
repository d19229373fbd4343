//! Best-effort diagnostic records for gate decisions.
//!
//! Diagnostics are off unless the debug toggle is set at startup. None of the
//! loggers here can fail from the caller's point of view.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::DiagnosticsConfig;

/// Sink for diagnostic events.
pub trait DiagnosticLogger: Send + Sync {
    /// Record one event. Must never panic or surface an error.
    fn record(&self, event: &str, context: &Map<String, Value>);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl DiagnosticLogger for NoopLogger {
    fn record(&self, _event: &str, _context: &Map<String, Value>) {}
}

/// Forwards events to `tracing` at INFO level, so they show under the
/// default filter once diagnostics are switched on.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DiagnosticLogger for TracingLogger {
    fn record(&self, event: &str, context: &Map<String, Value>) {
        let context = Value::Object(context.clone());
        tracing::info!(event = %event, context = %context, "diagnostic");
    }
}

/// Appends one timestamped line per event to a file.
#[derive(Debug, Clone)]
pub struct FileLogger {
    path: PathBuf,
}

impl FileLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        Self { path }
    }

    fn append(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

impl DiagnosticLogger for FileLogger {
    fn record(&self, event: &str, context: &Map<String, Value>) {
        let line = format_line(event, context);
        if let Err(e) = self.append(&line) {
            tracing::trace!(path = %self.path.display(), error = %e, "Dropped diagnostic record");
        }
    }
}

/// `<rfc3339 timestamp> <event> key=value ...\n`
fn format_line(event: &str, context: &Map<String, Value>) -> String {
    let mut line = format!(
        "{} {}",
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        event
    );
    for (key, value) in context {
        line.push(' ');
        line.push_str(key);
        line.push('=');
        line.push_str(&value.to_string());
    }
    line.push('\n');
    line
}

/// Build the logger selected by configuration.
pub fn from_config(config: &DiagnosticsConfig) -> Arc<dyn DiagnosticLogger> {
    if !config.enabled {
        return Arc::new(NoopLogger);
    }
    match &config.log_path {
        Some(path) => Arc::new(FileLogger::new(path)),
        None => Arc::new(TracingLogger),
    }
}
