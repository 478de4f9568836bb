//! vlog - color-tagged logging façade with opt-in remote reporting
//!
//! Every call prints locally. Leveled calls return a handle whose
//! `report()` forwards a classified, size-bounded subset of the arguments
//! to a telemetry sink.
//!
//! ```
//! use std::sync::Arc;
//! use vlog::{vargs, MemoryConsole, MemorySink, VLog, Value};
//!
//! let sink = Arc::new(MemorySink::new());
//! let log = VLog::builder()
//!     .console(Arc::new(MemoryConsole::new()))
//!     .sink(sink.clone())
//!     .build();
//!
//! log.info(vargs!["pages/index", "loaded", 3, Value::function("cb")]).report();
//! assert_eq!(sink.len(), 2);
//! ```

pub mod classify;
pub mod config;
pub mod console;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod format;
pub mod logging;
pub mod remote;
pub mod route;
pub mod style;
pub mod value;

pub use classify::{classify, special_type_of, Classification, SpecialType};
pub use config::Config;
pub use console::{Console, MemoryConsole, StyledLine, TerminalConsole};
pub use dispatch::{Call, NamedEvent, ReportHandle, VLog, VLogBuilder};
pub use error::{Result, VLogError};
pub use filter::FilterRegistry;
pub use format::{format_call, FormattedCall};
pub use logging::{Channel, Level, UdpSink};
pub use remote::{MemorySink, NoopSink, RemoteSink};
pub use route::{NoRoute, RouteProvider, StaticRoute};
pub use style::StyleConfig;
pub use value::Value;
