//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → opentelemetry_sdk → FileSpanExporter → JSON lines
//! ```
//!
//! The level comes from the `trace_level` plugin option (default `info`) and
//! accepts any `EnvFilter` directive such as `bingeshelf=debug`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: Span exporter and tracer provider
//! - [`otlp`]: OTLP/JSON encoding
//! - [`rotating_file`]: Size-rotated line file

mod exporter;
mod init;
mod otlp;
mod rotating_file;

pub use init::init_tracing;
