//! Centralized error types for vlog
//!
//! All errors are represented by the `VLogError` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, VLogError>`.
//!
//! Logging operations never hand these back to their callers: sink and
//! serialization failures are absorbed by the dispatcher. They surface from
//! config loading and sink construction.

use std::fmt;
use std::path::PathBuf;

/// All vlog errors
#[derive(Debug)]
pub enum VLogError {
    // === Sink ===
    /// Failed to bind the local UDP socket used by the telemetry sink
    SinkBind { source: std::io::Error },
    /// The sink's background sender is gone
    SinkClosed,
    /// Failed to bind the record listener
    ListenBind { port: u16, source: std::io::Error },

    // === Payload ===
    /// A report entry has no JSON representation
    Unserializable { kind: &'static str },
    /// JSON encoding failed
    Json { source: serde_json::Error },

    // === Config ===
    /// Config file could not be read
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Invalid config value
    ConfigValidation { field: &'static str, reason: String },
}

impl std::error::Error for VLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SinkBind { source }
            | Self::ListenBind { source, .. }
            | Self::ConfigRead { source, .. } => Some(source),
            Self::Json { source } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for VLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SinkBind { .. } => write!(f, "Cannot bind telemetry sink socket"),
            Self::SinkClosed => write!(f, "Telemetry sink is closed"),
            Self::ListenBind { port, .. } => write!(f, "Cannot bind listen port {}", port),
            Self::Unserializable { kind } => write!(f, "Cannot serialize {} value", kind),
            Self::Json { source } => write!(f, "JSON error: {}", source),
            Self::ConfigRead { path, .. } => write!(f, "Cannot read config: {}", path.display()),
            Self::ConfigValidation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
        }
    }
}

impl From<serde_json::Error> for VLogError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}

/// Alias for Result with VLogError
pub type Result<T> = std::result::Result<T, VLogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_messages() {
        let err = VLogError::Unserializable { kind: "function" };
        assert_eq!(err.to_string(), "Cannot serialize function value");

        let err = VLogError::ConfigValidation {
            field: "sink.udp_port",
            reason: "must be non-zero".into(),
        };
        assert_eq!(err.to_string(), "Invalid sink.udp_port: must be non-zero");
    }

    #[test]
    fn test_source_chain() {
        let err = VLogError::ListenBind {
            port: 9300,
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "busy"),
        };
        assert!(err.source().is_some());
        assert!(VLogError::SinkClosed.source().is_none());
    }
}
