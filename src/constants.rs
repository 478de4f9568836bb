//! Application-wide constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Classification
// =============================================================================

/// Arrays with at least this many elements are not transmitted
pub const MAX_REPORT_ARRAY_LEN: usize = 30;

/// Maps and sets with at least this many entries are not transmitted
pub const MAX_REPORT_COLLECTION_SIZE: usize = 30;

/// Records with more than this many `__`-prefixed keys are treated as
/// framework internals
pub const MAX_DUNDER_KEYS: usize = 2;

/// Prefix marking framework-internal record keys
pub const DUNDER_PREFIX: &str = "__";

// =============================================================================
// Filter registry
// =============================================================================

/// Soft limit on the aggregate size of all filter keywords (bytes)
pub const FILTER_KEYWORDS_MAX_BYTES: usize = 1024;

// =============================================================================
// Events
// =============================================================================

/// Entry name selecting the analytics event handler
pub const REPORT_WE_DATA: &str = "reportWeData";

/// Key under which the serialized event info is transmitted
pub const EVENT_PAYLOAD_KEY: &str = "res";

// =============================================================================
// Display
// =============================================================================

/// Separator appended to a route when it stands in for the tag
pub const ROUTE_TAG_SUFFIX: &str = " : ";

/// Timestamp format for direct prints (MM/DD HH:MM:SS)
pub const PRINT_TIMESTAMP_FORMAT: &str = "%m/%d %H:%M:%S";

// =============================================================================
// Network
// =============================================================================

/// Default UDP port the telemetry sink sends records to
pub const DEFAULT_SINK_UDP_PORT: u16 = 9300;

/// Default host the telemetry sink sends records to
pub const DEFAULT_SINK_HOST: &str = "127.0.0.1";

/// UDP receive buffer size for the record listener
pub const UDP_BUFFER_SIZE: usize = 65535;

/// Channel capacity for records handed to the listener task
pub const CHANNEL_CAPACITY: usize = 256;
