//! Levels, sink records and the UDP transport
//!
//! - `Level`/`Channel` - what a call is and where its report goes
//! - `SinkRecord` - wire form of a sink call
//! - `broadcast` - `UdpSink`, the UDP telemetry sink
//! - `receiver` - UDP record receiver used by `vlog listen`

pub mod broadcast;
pub mod entry;
pub mod receiver;

pub use broadcast::UdpSink;
pub use entry::{Channel, FilterOp, Level, RecordKind, SinkRecord};

/// Initialize internal tracing for vlog diagnostics
///
/// Call early in main() before any logging occurs.
/// Set `verbose` to true for debug-level output.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(false)
                .compact(),
        )
        .with(tracing_subscriber::EnvFilter::new(level))
        .try_init();
}
