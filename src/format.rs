//! Argument formatting
//!
//! Splits a raw argument list into a tag and content, and derives the
//! display form (objects pretty-printed) and the report form (classified,
//! complex values dropped, sentinels named).

use crate::classify::{classify, special_type_of, Classification, SpecialType};
use crate::constants::ROUTE_TAG_SUFFIX;
use crate::route::RouteProvider;
use crate::value::Value;
use tracing::debug;

/// A call's arguments after tag extraction
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedCall {
    /// Grouping label, also the report correlation key
    pub tag: String,
    /// Whether the tag came from the navigation context
    pub tag_from_route: bool,
    /// Arguments after tag extraction (full list when that leaves nothing)
    pub content: Vec<Value>,
    /// `content` with object-typed entries pretty-printed
    pub display_content: Vec<Value>,
}

impl FormattedCall {
    /// Prefix shown in front of the display content
    pub fn display_prefix(&self) -> String {
        if self.tag_from_route && !self.tag.is_empty() {
            format!("{}{}", self.tag, ROUTE_TAG_SUFFIX)
        } else {
            self.tag.clone()
        }
    }

    /// Content that may be transmitted
    pub fn report_content(&self) -> Vec<Value> {
        report_content(&self.content)
    }
}

/// Split `args` into tag and content
pub fn format_call(args: &[Value], route: &dyn RouteProvider) -> FormattedCall {
    let (tag, tag_from_route, content) = match args {
        [Value::String(first), rest @ ..] if !rest.is_empty() && !looks_like_literal(first) => {
            (first.clone(), false, rest.to_vec())
        }
        _ => (
            route.current_route().unwrap_or_default(),
            true,
            args.to_vec(),
        ),
    };

    // Never drop anything from the display path
    let content = if content.is_empty() {
        args.to_vec()
    } else {
        content
    };

    FormattedCall {
        tag,
        tag_from_route,
        display_content: display_content(&content),
        content,
    }
}

/// Object or array literal text is content, not a tag
fn looks_like_literal(s: &str) -> bool {
    s.starts_with('{') || s.starts_with('[')
}

/// Replace object-typed entries by their pretty-printed text
pub fn display_content(args: &[Value]) -> Vec<Value> {
    args.iter()
        .map(|arg| {
            if arg.is_object_typed() {
                Value::String(arg.to_pretty_string())
            } else {
                arg.clone()
            }
        })
        .collect()
}

/// Filter content through the classifier
///
/// Special sentinels become their name (`null` stays JSON-representable),
/// other simple values pass, complex ones are dropped.
pub fn report_content(content: &[Value]) -> Vec<Value> {
    content.iter().filter_map(report_value).collect()
}

fn report_value(value: &Value) -> Option<Value> {
    match special_type_of(value) {
        Some(SpecialType::Null) => return Some(Value::Null),
        Some(special) => return Some(Value::from(special.as_str())),
        None => {}
    }
    match classify(value) {
        Classification::Simple => Some(value.clone()),
        Classification::Complex => {
            debug!("Dropping complex {} from report", value.kind());
            None
        }
    }
}
