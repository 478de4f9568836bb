//! Value classification
//!
//! Decides whether an argument may travel to the remote sink as-is.
//! The size and dunder-key thresholds are coarse heuristics that keep
//! unbounded or framework-internal structures off a metered channel.

use crate::constants::{
    DUNDER_PREFIX, MAX_DUNDER_KEYS, MAX_REPORT_ARRAY_LEN, MAX_REPORT_COLLECTION_SIZE,
};
use crate::value::Value;
use std::fmt;

/// Classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Safe to transmit or print as-is
    Simple,
    /// Must be summarized or dropped before transmission
    Complex,
}

/// Sentinel types substitutable by their name when a value cannot be sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialType {
    Undefined,
    Null,
    NaN,
    Infinity,
    NegativeInfinity,
}

impl SpecialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::Null => "Null",
            Self::NaN => "NaN",
            Self::Infinity => "Infinity",
            Self::NegativeInfinity => "NegativeInfinity",
        }
    }
}

impl fmt::Display for SpecialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a value for the report path
pub fn classify(value: &Value) -> Classification {
    if value.is_primitive() || !is_complex(value) {
        Classification::Simple
    } else {
        Classification::Complex
    }
}

/// Complexity predicate for structured values
fn is_complex(value: &Value) -> bool {
    match value {
        Value::Function(_) | Value::Promise | Value::Error { .. } => true,
        Value::WeakCollection => true,
        Value::Array(items) => items.len() >= MAX_REPORT_ARRAY_LEN,
        Value::Map(entries) => entries.len() >= MAX_REPORT_COLLECTION_SIZE,
        Value::Set(items) => items.len() >= MAX_REPORT_COLLECTION_SIZE,
        Value::Record(entries) => {
            entries
                .iter()
                .filter(|(key, _)| key.starts_with(DUNDER_PREFIX))
                .count()
                > MAX_DUNDER_KEYS
        }
        _ => false,
    }
}

/// Resolve the sentinel type of a value, if it has one
pub fn special_type_of(value: &Value) -> Option<SpecialType> {
    match value {
        Value::Undefined => Some(SpecialType::Undefined),
        Value::Null => Some(SpecialType::Null),
        Value::Number(n) if n.is_nan() => Some(SpecialType::NaN),
        Value::Number(n) if *n == f64::INFINITY => Some(SpecialType::Infinity),
        Value::Number(n) if *n == f64::NEG_INFINITY => Some(SpecialType::NegativeInfinity),
        _ => None,
    }
}
