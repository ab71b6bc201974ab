//! Structured, context-propagating logging for the Portcullis gateway.
//!
//! Every component of the gateway observes the world through this crate:
//! leveled, field-annotated records emitted as JSON with a sortable
//! nanosecond timestamp by default, or as compact console lines (second
//! precision) during development.
//!
//! The central type is the [`Logger`] value. A root logger is built once at
//! startup from an explicit [`LoggingConfig`]; request handling derives
//! child loggers that carry inherited context:
//!
//! ```
//! use portcullis_telemetry::{Logger, LoggingConfig};
//! use serde_json::json;
//!
//! let config = LoggingConfig::from_env();
//! let root = Logger::new(&config);
//!
//! // Per-request scope: the derived logger stamps every record.
//! let logger = root.with_request_id("01J9ZK3W");
//! logger.info_with("proxying", &[("upstream", json!("billing"))]);
//! ```
//!
//! There is no global mutable state: the level, format, and sink are fixed
//! inside the root logger's shared half, and derivation is a pure
//! construction that never affects the parent. The facility has no error
//! channel; misconfiguration degrades to defaults and sink failures are
//! swallowed, because logging must remain available regardless.

#![warn(missing_docs)]

pub mod logging;

pub use logging::{fields, FieldSlice, Level, LogFormat, Logger, LoggingConfig};
