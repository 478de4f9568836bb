//! Remote telemetry sink
//!
//! The dispatcher talks to the sink only through `RemoteSink`. When there
//! is no sink, `NoopSink` stands in so call sites never check for absence.

use crate::error::Result;
use crate::logging::{Channel, FilterOp, RecordKind};
use parking_lot::Mutex;
use serde_json::Value as Json;

/// Remote telemetry operations
///
/// Calls are fire-and-forget. Errors returned here are logged by the
/// dispatcher and never reach the caller of a logging operation.
pub trait RemoteSink: Send + Sync {
    fn info(&self, tag: &str, payload: &Json) -> Result<()>;
    fn warn(&self, tag: &str, payload: &Json) -> Result<()>;
    fn error(&self, tag: &str, payload: &Json) -> Result<()>;
    fn event(&self, name: &str, payload: &Json) -> Result<()>;

    /// Whether the sink understands filter keywords
    fn supports_filter(&self) -> bool {
        false
    }

    fn set_filter_msg(&self, _keyword: &str) -> Result<()> {
        Ok(())
    }

    fn add_filter_msg(&self, _keyword: &str) -> Result<()> {
        Ok(())
    }
}

/// Route a report entry to the sink operation for its channel
pub fn send_report(sink: &dyn RemoteSink, channel: Channel, tag: &str, payload: &Json) -> Result<()> {
    match channel {
        Channel::Info => sink.info(tag, payload),
        Channel::Warn => sink.warn(tag, payload),
        Channel::Error => sink.error(tag, payload),
    }
}

// =============================================================================
// NoopSink
// =============================================================================

/// Sink used when no telemetry backend is available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl RemoteSink for NoopSink {
    fn info(&self, _tag: &str, _payload: &Json) -> Result<()> {
        Ok(())
    }

    fn warn(&self, _tag: &str, _payload: &Json) -> Result<()> {
        Ok(())
    }

    fn error(&self, _tag: &str, _payload: &Json) -> Result<()> {
        Ok(())
    }

    fn event(&self, _name: &str, _payload: &Json) -> Result<()> {
        Ok(())
    }
}

// =============================================================================
// MemorySink
// =============================================================================

/// Sink that records every call, for tests and embedding hosts that
/// forward records themselves
#[derive(Debug)]
pub struct MemorySink {
    records: Mutex<Vec<RecordKind>>,
    filter_support: bool,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            filter_support: true,
        }
    }

    /// A sink without filter keyword support
    pub fn without_filter() -> Self {
        Self {
            filter_support: false,
            ..Self::new()
        }
    }

    /// Snapshot of recorded calls, oldest first
    pub fn records(&self) -> Vec<RecordKind> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    fn push(&self, kind: RecordKind) -> Result<()> {
        self.records.lock().push(kind);
        Ok(())
    }

    fn push_report(&self, channel: Channel, tag: &str, payload: &Json) -> Result<()> {
        self.push(RecordKind::Report {
            channel,
            tag: tag.to_string(),
            payload: payload.clone(),
        })
    }
}

impl RemoteSink for MemorySink {
    fn info(&self, tag: &str, payload: &Json) -> Result<()> {
        self.push_report(Channel::Info, tag, payload)
    }

    fn warn(&self, tag: &str, payload: &Json) -> Result<()> {
        self.push_report(Channel::Warn, tag, payload)
    }

    fn error(&self, tag: &str, payload: &Json) -> Result<()> {
        self.push_report(Channel::Error, tag, payload)
    }

    fn event(&self, name: &str, payload: &Json) -> Result<()> {
        self.push(RecordKind::Event {
            name: name.to_string(),
            payload: payload.clone(),
        })
    }

    fn supports_filter(&self) -> bool {
        self.filter_support
    }

    fn set_filter_msg(&self, keyword: &str) -> Result<()> {
        self.push(RecordKind::Filter {
            op: FilterOp::Set,
            keyword: keyword.to_string(),
        })
    }

    fn add_filter_msg(&self, keyword: &str) -> Result<()> {
        self.push(RecordKind::Filter {
            op: FilterOp::Add,
            keyword: keyword.to_string(),
        })
    }
}
