//! Telemetry: structured logging setup and secret redaction.
//!
//! Counters are emitted through the `metrics` facade; installing a recorder
//! is left to the embedding application.

pub mod logging;

pub use logging::{
    init_logging, LogFormat, LoggingConfig, RedactionConfig, RedactionPattern,
    SensitiveFieldRedactor,
};
