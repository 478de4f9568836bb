//! Log levels and sink records
//!
//! Core types describing what a call is and what the telemetry sink
//! receives for it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Level of a leveled log call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Log,
    Info,
    Warn,
    Error,
    Table,
}

impl Level {
    /// Remote channel for this level (`None` = local-only)
    pub fn channel(self) -> Option<Channel> {
        match self {
            Self::Log | Self::Info => Some(Channel::Info),
            Self::Warn => Some(Channel::Warn),
            Self::Error => Some(Channel::Error),
            Self::Table => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity channel on the remote sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Info,
    Warn,
    Error,
}

/// Filter keyword operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    /// Replace the keyword set with a single keyword
    Set,
    /// Append a keyword
    Add,
}

/// What a sink was asked to do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordKind {
    /// One leveled report entry
    Report {
        channel: Channel,
        tag: String,
        payload: serde_json::Value,
    },
    /// Named analytics event
    Event {
        name: String,
        payload: serde_json::Value,
    },
    /// Filter keyword change
    Filter { op: FilterOp, keyword: String },
}

/// Record sent over the wire (serializable for UDP)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkRecord {
    pub timestamp: String, // HH:MM:SS.mmm
    pub kind: RecordKind,
}

impl SinkRecord {
    /// Current timestamp as HH:MM:SS.mmm
    #[inline]
    fn now() -> String {
        chrono::Local::now().format("%H:%M:%S%.3f").to_string()
    }

    pub fn new(kind: RecordKind) -> Self {
        Self {
            timestamp: Self::now(),
            kind,
        }
    }

    /// Create a leveled report record
    pub fn report(channel: Channel, tag: impl Into<String>, payload: serde_json::Value) -> Self {
        Self::new(RecordKind::Report {
            channel,
            tag: tag.into(),
            payload,
        })
    }

    /// Create an event record
    pub fn event(name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self::new(RecordKind::Event {
            name: name.into(),
            payload,
        })
    }

    /// Create a filter record
    pub fn filter(op: FilterOp, keyword: impl Into<String>) -> Self {
        Self::new(RecordKind::Filter {
            op,
            keyword: keyword.into(),
        })
    }

    /// One-line human summary, used by `vlog listen`
    pub fn summary(&self) -> String {
        match &self.kind {
            RecordKind::Report {
                channel,
                tag,
                payload,
            } => format!("[{}] {:?} {} {}", self.timestamp, channel, tag, payload),
            RecordKind::Event { name, payload } => {
                format!("[{}] event {} {}", self.timestamp, name, payload)
            }
            RecordKind::Filter { op, keyword } => {
                format!("[{}] filter {:?} {}", self.timestamp, op, keyword)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_channels() {
        assert_eq!(Level::Log.channel(), Some(Channel::Info));
        assert_eq!(Level::Info.channel(), Some(Channel::Info));
        assert_eq!(Level::Warn.channel(), Some(Channel::Warn));
        assert_eq!(Level::Error.channel(), Some(Channel::Error));
        assert_eq!(Level::Table.channel(), None);
    }

    #[test]
    fn test_record_serialization() {
        let record = SinkRecord::report(Channel::Warn, "pageA", serde_json::json!("hello"));
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("\"timestamp\""));
        assert!(json.contains("\"Report\""));
        assert!(json.contains("\"warn\""));
        assert!(json.contains("pageA"));
    }

    #[test]
    fn test_record_json_roundtrip() {
        let record = SinkRecord::filter(FilterOp::Add, "openid");
        let json = serde_json::to_string(&record).unwrap();

        let parsed: SinkRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_summary() {
        let record = SinkRecord::event("bi_x", serde_json::json!({"res": "{}"}));
        assert!(record.summary().contains("event bi_x"));
    }
}
