//! Structured logging for the Portcullis gateway.
//!
//! The [`Logger`] is a cheap value type: the sink, minimum level, and
//! output format live behind an `Arc` and are shared by every logger
//! derived from the same root, while each derivation carries its own
//! ordered set of inherited fields. Deriving a child logger never touches
//! the parent.
//!
//! Nothing in this module can fail observably. Unrecognized level names
//! degrade to `info`, unrecognized format selectors degrade to JSON, and
//! sink write errors are swallowed: logging must stay available even when
//! misconfigured.
//!
//! # Example
//!
//! ```
//! use portcullis_telemetry::{Logger, LoggingConfig};
//! use serde_json::json;
//!
//! let logger = Logger::new(&LoggingConfig::new("info", ""));
//! logger.info("gateway starting");
//!
//! let request_logger = logger.with_request_id("req-7f3a");
//! request_logger.info_with("routing upstream", &[("upstream", json!("billing"))]);
//! ```

use std::env;
use std::error::Error as StdError;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use serde_json::{json, Map, Value};

/// Minimum-severity threshold and record severity.
///
/// Ordering is `Debug < Info < Warn < Error`; a record is emitted when its
/// level is at or above the configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Diagnostic detail, suppressed by default.
    Debug,
    /// Normal operational events.
    Info,
    /// Recoverable anomalies.
    Warn,
    /// Failures.
    Error,
}

impl Level {
    /// Parse a level name, falling back to `Info` on unrecognized input.
    ///
    /// The match is exact: the recognized names are `debug`, `info`,
    /// `warn`, and `error`. Logging initialization must never abort the
    /// process, so there is no error path here.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    /// The lowercase name of this level, as emitted in records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output encoding, selected once per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line. The production default.
    #[default]
    Json,
    /// Compact human-readable line.
    Console,
}

impl LogFormat {
    /// Map the external format selector to an encoding.
    ///
    /// `"console"` selects the human-readable encoding; anything else,
    /// including the empty string, selects JSON.
    #[must_use]
    pub fn from_selector(selector: &str) -> Self {
        if selector == "console" {
            Self::Console
        } else {
            Self::Json
        }
    }
}

/// Process-wide logging configuration.
///
/// Resolved exactly once at startup and handed to [`Logger::new`]; there is
/// no ambient global to mutate, so re-initialization hazards do not exist.
/// Every `Logger` derived from the same root shares the decisions captured
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum emission level.
    pub level: Level,
    /// Output encoding.
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Build a configuration from the raw level name and format selector.
    ///
    /// Both inputs are lenient: unknown values degrade to `info` and JSON.
    #[must_use]
    pub fn new(level_name: &str, format_selector: &str) -> Self {
        Self {
            level: Level::parse(level_name),
            format: LogFormat::from_selector(format_selector),
        }
    }

    /// Resolve the configuration from `LOG_LEVEL` and `LOG_FORMAT`.
    ///
    /// Unset variables behave like empty strings: `info` level, JSON
    /// output. Never fails.
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("LOG_LEVEL").unwrap_or_default();
        let format = env::var("LOG_FORMAT").unwrap_or_default();
        Self::new(&level, &format)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: LogFormat::Json,
        }
    }
}

/// Field bag passed at a call site: ordered key/value pairs with
/// [`serde_json::Value`] as the concrete value union.
pub type FieldSlice<'a> = &'a [(&'a str, Value)];

struct LoggerShared {
    min_level: Level,
    format: LogFormat,
    sink: Mutex<Box<dyn Write + Send>>,
}

/// A leveled, field-annotated structured logger.
///
/// Cloning is cheap and derivation is pure: [`Logger::with_request_id`] and
/// [`Logger::with_field`] return new values carrying an extra inherited
/// field, leaving the original untouched. All loggers derived from one root
/// write to the same sink with the same level and format.
#[derive(Clone)]
pub struct Logger {
    shared: Arc<LoggerShared>,
    fields: Vec<(String, Value)>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.shared.min_level)
            .field("format", &self.shared.format)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Create a root logger writing to stdout.
    #[must_use]
    pub fn new(config: &LoggingConfig) -> Self {
        Self::with_sink(config, Box::new(io::stdout()))
    }

    /// Create a root logger writing to a caller-supplied sink.
    ///
    /// The sink serializes concurrent writes behind a mutex held for the
    /// duration of one record. Tests use this to capture output.
    #[must_use]
    pub fn with_sink(config: &LoggingConfig, sink: Box<dyn Write + Send>) -> Self {
        Self {
            shared: Arc::new(LoggerShared {
                min_level: config.level,
                format: config.format,
                sink: Mutex::new(sink),
            }),
            fields: Vec::new(),
        }
    }

    /// Derive a logger whose every record carries a `request_id` field.
    #[must_use]
    pub fn with_request_id(&self, request_id: &str) -> Self {
        self.with_field(fields::REQUEST_ID, json!(request_id))
    }

    /// Derive a logger whose every record carries the given field.
    #[must_use]
    pub fn with_field(&self, key: &str, value: impl Into<Value>) -> Self {
        let mut fields = self.fields.clone();
        fields.push((key.to_string(), value.into()));
        Self {
            shared: Arc::clone(&self.shared),
            fields,
        }
    }

    /// Log a debug message.
    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, message, &[], None);
    }

    /// Log a debug message with fields.
    pub fn debug_with(&self, message: &str, fields: FieldSlice<'_>) {
        self.emit(Level::Debug, message, fields, None);
    }

    /// Log an info message.
    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message, &[], None);
    }

    /// Log an info message with fields.
    pub fn info_with(&self, message: &str, fields: FieldSlice<'_>) {
        self.emit(Level::Info, message, fields, None);
    }

    /// Log a warning message.
    pub fn warn(&self, message: &str) {
        self.emit(Level::Warn, message, &[], None);
    }

    /// Log a warning message with fields.
    pub fn warn_with(&self, message: &str, fields: FieldSlice<'_>) {
        self.emit(Level::Warn, message, fields, None);
    }

    /// Log an error message.
    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message, &[], None);
    }

    /// Log an error message with fields and an optional associated failure.
    ///
    /// When a failure is given, its `Display` rendering is embedded under
    /// the `error` key.
    pub fn error_with(
        &self,
        message: &str,
        error: Option<&dyn StdError>,
        fields: FieldSlice<'_>,
    ) {
        self.emit(Level::Error, message, fields, error);
    }

    fn emit(
        &self,
        level: Level,
        message: &str,
        call_fields: FieldSlice<'_>,
        error: Option<&dyn StdError>,
    ) {
        if level < self.shared.min_level {
            return;
        }

        // JSON records carry the full sortable nanosecond timestamp; the
        // console encoder renders second precision for readability.
        let now = Utc::now();
        match self.shared.format {
            LogFormat::Json => {
                let time = now.to_rfc3339_opts(SecondsFormat::Nanos, true);
                self.emit_json(level, &time, message, call_fields, error);
            }
            LogFormat::Console => {
                let time = now.to_rfc3339_opts(SecondsFormat::Secs, true);
                self.emit_console(level, &time, message, call_fields, error);
            }
        }
    }

    fn emit_json(
        &self,
        level: Level,
        time: &str,
        message: &str,
        call_fields: FieldSlice<'_>,
        error: Option<&dyn StdError>,
    ) {
        let mut record = Map::new();
        record.insert("level".to_string(), json!(level.as_str()));
        record.insert("time".to_string(), json!(time));
        record.insert("message".to_string(), json!(message));
        for (key, value) in &self.fields {
            record.insert(key.clone(), value.clone());
        }
        // Call-site fields win over inherited ones on key collision.
        for (key, value) in call_fields {
            record.insert((*key).to_string(), value.clone());
        }
        if let Some(err) = error {
            record.insert(fields::ERROR.to_string(), json!(err.to_string()));
        }

        let mut sink = self.shared.sink.lock();
        // Best-effort emission: a failing sink never propagates.
        let _ = serde_json::to_writer(&mut *sink, &Value::Object(record));
        let _ = sink.write_all(b"\n");
    }

    fn emit_console(
        &self,
        level: Level,
        time: &str,
        message: &str,
        call_fields: FieldSlice<'_>,
        error: Option<&dyn StdError>,
    ) {
        let mut line = format!("{time} {:<5} {message}", level.as_str().to_uppercase());
        for (key, value) in &self.fields {
            line.push_str(&format!(" {key}={}", render_console_value(value)));
        }
        for (key, value) in call_fields {
            line.push_str(&format!(" {key}={}", render_console_value(value)));
        }
        if let Some(err) = error {
            line.push_str(&format!(" {}={err}", fields::ERROR));
        }

        let mut sink = self.shared.sink.lock();
        let _ = writeln!(sink, "{line}");
    }
}

// Strings print bare in console mode; everything else keeps its JSON shape.
fn render_console_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Canonical field names used across the gateway.
///
/// Use these for consistency between components that annotate records.
pub mod fields {
    /// Request ID field name.
    pub const REQUEST_ID: &str = "request_id";

    /// Error field name.
    pub const ERROR: &str = "error";

    /// HTTP method field name.
    pub const HTTP_METHOD: &str = "http_method";

    /// HTTP path field name.
    pub const HTTP_PATH: &str = "http_path";

    /// HTTP status code field name.
    pub const HTTP_STATUS: &str = "http_status";

    /// Upstream service field name.
    pub const UPSTREAM: &str = "upstream";

    /// Duration field name (in milliseconds).
    pub const DURATION_MS: &str = "duration_ms";
}
