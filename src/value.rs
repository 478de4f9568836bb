//! Dynamic argument values
//!
//! Log calls take heterogeneous argument lists, so every argument is lifted
//! into a `Value`. The variants mirror what an embedded script host can hand
//! over: primitives, containers, and opaque handles (functions, promises,
//! weak collections) that can be displayed but not transmitted.

use crate::error::{Result, VLogError};
use serde_json::Number;
use std::fmt;

/// Largest integer a double represents exactly (2^53)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single log argument
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    /// Symbol with its description
    Symbol(String),
    Array(Vec<Value>),
    /// Plain record, keys in insertion order
    Record(Vec<(String, Value)>),
    Map(Vec<(Value, Value)>),
    Set(Vec<Value>),
    /// WeakMap / WeakSet / WeakRef; contents are not enumerable
    WeakCollection,
    /// Function with its name (empty for anonymous)
    Function(String),
    /// Pending computation handle
    Promise,
    Error { name: String, message: String },
}

impl Value {
    /// Build a record from key/value pairs
    pub fn record<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Record(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(name.into())
    }

    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Short type name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Array(_) => "array",
            Self::Record(_) => "record",
            Self::Map(_) => "map",
            Self::Set(_) => "set",
            Self::WeakCollection => "weak collection",
            Self::Function(_) => "function",
            Self::Promise => "promise",
            Self::Error { .. } => "error",
        }
    }

    /// Primitive values are always safe to transmit as-is
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Undefined
                | Self::Bool(_)
                | Self::Number(_)
                | Self::BigInt(_)
                | Self::String(_)
                | Self::Symbol(_)
        )
    }

    /// Object-typed values get pretty-printed for display.
    ///
    /// `Null` counts as object-typed here (it prints as `null`), functions
    /// do not.
    pub fn is_object_typed(&self) -> bool {
        matches!(
            self,
            Self::Null
                | Self::Array(_)
                | Self::Record(_)
                | Self::Map(_)
                | Self::Set(_)
                | Self::WeakCollection
                | Self::Promise
                | Self::Error { .. }
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// JSON representation, following the usual stringify rules:
    /// undefined, functions and symbols vanish from records and become
    /// `null` inside arrays, non-finite numbers become `null`.
    ///
    /// Fails on big integers outside the `i64` range and on top-level values
    /// that have no representation at all.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        self.json_member()?.ok_or(VLogError::Unserializable { kind: self.kind() })
    }

    /// Pretty multi-line JSON text, used for console display
    pub fn to_pretty_string(&self) -> String {
        match self
            .to_json()
            .and_then(|json| serde_json::to_string_pretty(&json).map_err(VLogError::from))
        {
            Ok(text) => text,
            Err(_) => self.to_string(),
        }
    }

    /// `None` means "omit this member"
    fn json_member(&self) -> Result<Option<serde_json::Value>> {
        use serde_json::Value as Json;

        let json = match self {
            Self::Undefined | Self::Function(_) | Self::Symbol(_) => return Ok(None),
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => {
                Json::Number((*n as i64).into())
            }
            Self::Number(n) => Number::from_f64(*n).map(Json::Number).unwrap_or(Json::Null),
            Self::BigInt(n) => match i64::try_from(*n) {
                Ok(n) => Json::Number(n.into()),
                Err(_) => return Err(VLogError::Unserializable { kind: "bigint" }),
            },
            Self::String(s) => Json::String(s.clone()),
            Self::Array(items) | Self::Set(items) => Json::Array(
                items
                    .iter()
                    .map(|item| Ok(item.json_member()?.unwrap_or(Json::Null)))
                    .collect::<Result<_>>()?,
            ),
            Self::Record(entries) => {
                let mut map = serde_json::Map::with_capacity(entries.len());
                for (key, value) in entries {
                    if let Some(json) = value.json_member()? {
                        map.insert(key.clone(), json);
                    }
                }
                Json::Object(map)
            }
            Self::Map(entries) => Json::Array(
                entries
                    .iter()
                    .map(|(k, v)| {
                        Ok(Json::Array(vec![
                            k.json_member()?.unwrap_or(Json::Null),
                            v.json_member()?.unwrap_or(Json::Null),
                        ]))
                    })
                    .collect::<Result<_>>()?,
            ),
            Self::WeakCollection | Self::Promise => Json::Object(serde_json::Map::new()),
            Self::Error { name, message } => serde_json::json!({
                "name": name,
                "message": message,
            }),
        };
        Ok(Some(json))
    }
}

/// Number formatting the way script consoles show it: integral values
/// without a fractional part, named non-finite values.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        write!(f, "{}", if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => fmt_number(*n, f),
            Self::BigInt(n) => write!(f, "{}n", n),
            Self::String(s) => write!(f, "{}", s),
            Self::Symbol(desc) => write!(f, "Symbol({})", desc),
            Self::Array(_) | Self::Record(_) | Self::Set(_) | Self::Map(_) => {
                match self.to_json() {
                    Ok(json) => write!(f, "{}", json),
                    Err(_) => write!(f, "[{}]", self.kind()),
                }
            }
            Self::WeakCollection => write!(f, "Weak {{ <items unknown> }}"),
            Self::Function(name) if name.is_empty() => write!(f, "[Function (anonymous)]"),
            Self::Function(name) => write!(f, "[Function: {}]", name),
            Self::Promise => write!(f, "Promise {{ <pending> }}"),
            Self::Error { name, message } => write!(f, "{}: {}", name, message),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Self::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(f32, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Self::BigInt(n)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Self::Undefined)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Self::String(s),
            Json::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Json::Object(map) => Self::Record(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

/// Build a `Vec<Value>` argument list from heterogeneous expressions
///
/// ```
/// let args = vlog::vargs!["pageA", "hello", 42, true];
/// assert_eq!(args.len(), 4);
/// ```
#[macro_export]
macro_rules! vargs {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}
