//! Error types for the Attendance Engine.
//!
//! Calculation itself never fails: missing data degrades to defaults. The
//! errors here cover the boundaries around it, namely loading a policy file
//! and decoding an audit trace back out of a record's logs.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A loaded configuration value cannot be used by the engine.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A daily record carries no audit trace entry in its logs.
    #[error("No audit trace recorded for employee '{employee_code}' on {date}")]
    AuditTraceMissing {
        /// The employee the record belongs to.
        employee_code: String,
        /// The date of the record.
        date: NaiveDate,
    },

    /// An audit trace could not be encoded as a log entry.
    #[error("Failed to encode audit trace: {message}")]
    AuditTraceEncode {
        /// The underlying encoder message.
        message: String,
    },

    /// An audit trace entry could not be decoded.
    #[error("Failed to decode audit trace: {message}")]
    AuditTraceDecode {
        /// The underlying decoder message.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
