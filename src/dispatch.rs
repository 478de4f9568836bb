//! Logging façade and report dispatch
//!
//! `VLog` renders every call to the console right away. Leveled calls hand
//! back a `ReportHandle`; only `report()` forwards anything to the remote
//! sink. Named events skip the handle and are reported immediately.

use crate::config::{Config, SinkKind};
use crate::console::{Console, StyledLine, TerminalConsole};
use crate::constants::{EVENT_PAYLOAD_KEY, PRINT_TIMESTAMP_FORMAT, REPORT_WE_DATA};
use crate::error::Result;
use crate::filter::FilterRegistry;
use crate::format::{display_content, format_call};
use crate::logging::{FilterOp, Level, UdpSink};
use crate::remote::{send_report, NoopSink, RemoteSink};
use crate::route::{NoRoute, RouteProvider, StaticRoute};
use crate::style::StyleConfig;
use crate::value::Value;
use crossterm::style::Color;
use serde_json::Value as Json;
use std::sync::Arc;
use tracing::{debug, warn};

// =============================================================================
// Calls
// =============================================================================

/// Named analytics event
#[derive(Debug, Clone, PartialEq)]
pub struct NamedEvent {
    /// Handler entry name (`reportWeData`)
    pub name: String,
    pub event_name: String,
    /// Sent as an opaque serialized blob
    pub info: serde_json::Map<String, Json>,
}

impl NamedEvent {
    /// Event for the `reportWeData` entry
    pub fn report_we_data(
        event_name: impl Into<String>,
        info: serde_json::Map<String, Json>,
    ) -> Self {
        Self {
            name: REPORT_WE_DATA.to_string(),
            event_name: event_name.into(),
            info,
        }
    }
}

/// Registered event handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventEntry {
    ReportWeData,
}

impl EventEntry {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            REPORT_WE_DATA => Some(Self::ReportWeData),
            _ => None,
        }
    }
}

/// What the callable entry point was given
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// Plain arguments: printed, never reported
    Print(Vec<Value>),
    /// Named event: printed and reported immediately
    Event(NamedEvent),
}

// =============================================================================
// VLog
// =============================================================================

/// Logging façade
pub struct VLog {
    console: Arc<dyn Console>,
    sink: Arc<dyn RemoteSink>,
    route: Arc<dyn RouteProvider>,
    filters: Arc<FilterRegistry>,
    style: StyleConfig,
    timestamps: bool,
}

impl Default for VLog {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl VLog {
    pub fn builder() -> VLogBuilder {
        VLogBuilder::default()
    }

    /// Build from config: style, sink backend, route fallback and
    /// startup filter keywords in the process-wide registry
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_config_with(config, FilterRegistry::global())
    }

    fn from_config_with(config: &Config, filters: Arc<FilterRegistry>) -> Result<Self> {
        config.validate()?;
        filters.set_max_bytes(config.filter.max_bytes);

        let sink: Arc<dyn RemoteSink> = match config.sink.kind {
            SinkKind::None => Arc::new(NoopSink),
            SinkKind::Udp => Arc::new(UdpSink::connect(
                &config.sink.host,
                config.sink.udp_port,
            )?),
        };
        let route: Arc<dyn RouteProvider> = match &config.route.current {
            Some(route) => Arc::new(StaticRoute(route.clone())),
            None => Arc::new(NoRoute),
        };

        let vlog = Self::builder()
            .style(StyleConfig::from_config(&config.display)?)
            .timestamps(config.display.timestamps)
            .sink(sink)
            .route(route)
            .filters(filters)
            .build();

        let mut keywords = config.filter.keywords.iter();
        if let Some(first) = keywords.next() {
            vlog.set_filter_msg(first.as_str());
        }
        for keyword in keywords {
            vlog.add_filter_msg(keyword.as_str());
        }

        Ok(vlog)
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    // === Callable entry point ===

    pub fn call(&self, call: Call) {
        match call {
            Call::Print(args) => self.print(args),
            Call::Event(event) => self.report_we_data(&event),
        }
    }

    /// Print with a timestamp prefix; never reported
    pub fn print(&self, args: Vec<Value>) {
        let prefix = if self.timestamps {
            format!(
                "[{}]",
                chrono::Local::now().format(PRINT_TIMESTAMP_FORMAT)
            )
        } else {
            String::new()
        };
        self.render(self.style.log, prefix, &display_content(&args));
    }

    /// Report a named event right away
    ///
    /// Always prints locally. The remote call is skipped when the entry
    /// name is unknown or the event name is empty.
    pub fn report_we_data(&self, event: &NamedEvent) {
        let event_name = event.event_name.to_lowercase();
        let info = Value::from(Json::Object(event.info.clone()));
        self.render(
            self.style.event,
            event_name.clone(),
            &display_content(&[info]),
        );

        if EventEntry::from_name(&event.name).is_none() {
            debug!("Unknown event entry '{}', not reported", event.name);
            return;
        }
        if event_name.is_empty() {
            debug!("Event without a name, not reported");
            return;
        }

        let blob = match serde_json::to_string(&event.info) {
            Ok(blob) => blob,
            Err(e) => {
                warn!("Cannot serialize info for event {}: {}", event_name, e);
                return;
            }
        };
        let payload = serde_json::json!({ EVENT_PAYLOAD_KEY: blob });
        if let Err(e) = self.sink.event(&event_name, &payload) {
            warn!("Event {} not delivered: {}", event_name, e);
        }
    }

    // === Leveled calls ===

    pub fn log(&self, args: Vec<Value>) -> ReportHandle<'_> {
        self.leveled(Level::Log, args)
    }

    pub fn info(&self, args: Vec<Value>) -> ReportHandle<'_> {
        self.leveled(Level::Info, args)
    }

    pub fn warn(&self, args: Vec<Value>) -> ReportHandle<'_> {
        self.leveled(Level::Warn, args)
    }

    pub fn error(&self, args: Vec<Value>) -> ReportHandle<'_> {
        self.leveled(Level::Error, args)
    }

    pub fn table(&self, args: Vec<Value>) -> ReportHandle<'_> {
        self.leveled(Level::Table, args)
    }

    /// Render a leveled call and return its report handle
    pub fn leveled(&self, level: Level, args: Vec<Value>) -> ReportHandle<'_> {
        let call = format_call(&args, self.route.as_ref());
        self.render(
            self.style.level_color(level),
            call.display_prefix(),
            &call.display_content,
        );
        ReportHandle {
            vlog: self,
            level,
            args,
        }
    }

    // === Filter keywords ===

    /// Replace the sink's filter keywords with `keyword`
    pub fn set_filter_msg(&self, keyword: impl Into<Value>) {
        self.apply_filter(FilterOp::Set, keyword.into());
    }

    /// Append `keyword` to the sink's filter keywords
    pub fn add_filter_msg(&self, keyword: impl Into<Value>) {
        self.apply_filter(FilterOp::Add, keyword.into());
    }

    fn apply_filter(&self, op: FilterOp, keyword: Value) {
        if !self.sink.supports_filter() {
            return;
        }
        let Some(keyword) = keyword.as_str() else {
            return;
        };

        let result = match op {
            FilterOp::Set => {
                self.filters.set(keyword);
                self.sink.set_filter_msg(keyword)
            }
            FilterOp::Add => {
                self.filters.add(keyword);
                self.sink.add_filter_msg(keyword)
            }
        };
        if let Err(e) = result {
            warn!("Filter keyword '{}' not delivered: {}", keyword, e);
        }
        self.render(self.style.tag, keyword.to_string(), &[]);
    }

    fn render(&self, color: Color, prefix: String, content: &[Value]) {
        self.console.write_line(&StyledLine {
            color,
            prefix,
            content: content.iter().map(Value::to_string).collect(),
        });
    }
}

// =============================================================================
// ReportHandle
// =============================================================================

/// Deferred, opt-in remote forwarding of one leveled call
pub struct ReportHandle<'a> {
    vlog: &'a VLog,
    level: Level,
    args: Vec<Value>,
}

impl ReportHandle<'_> {
    /// Forward the call to the remote sink
    ///
    /// Issues one sink call per transmittable content entry. Each call
    /// re-formats from the captured arguments; repeated calls re-send.
    /// `table` calls are re-printed locally instead.
    pub fn report(&self) {
        let vlog = self.vlog;
        let call = format_call(&self.args, vlog.route.as_ref());

        let Some(channel) = self.level.channel() else {
            vlog.render(
                vlog.style.table,
                call.display_prefix(),
                &call.display_content,
            );
            return;
        };

        for entry in call.report_content() {
            let payload = match report_payload(&entry) {
                Ok(payload) => payload,
                Err(e) => {
                    debug!("Skipping report entry: {}", e);
                    continue;
                }
            };
            if let Err(e) = send_report(vlog.sink.as_ref(), channel, &call.tag, &payload) {
                warn!("{} report for '{}' not delivered: {}", self.level, call.tag, e);
            }
        }
    }
}

/// JSON payload for one report entry; symbols go as their display text
pub fn report_payload(value: &Value) -> Result<Json> {
    match value {
        Value::Symbol(_) => Ok(Json::String(value.to_string())),
        _ => value.to_json(),
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for `VLog`
///
/// Defaults: terminal console, no sink, no route, default palette and the
/// process-wide filter registry.
pub struct VLogBuilder {
    console: Arc<dyn Console>,
    sink: Arc<dyn RemoteSink>,
    route: Arc<dyn RouteProvider>,
    filters: Option<Arc<FilterRegistry>>,
    style: StyleConfig,
    timestamps: bool,
}

impl Default for VLogBuilder {
    fn default() -> Self {
        Self {
            console: Arc::new(TerminalConsole::new()),
            sink: Arc::new(NoopSink),
            route: Arc::new(NoRoute),
            filters: None,
            style: StyleConfig::default(),
            timestamps: true,
        }
    }
}

impl VLogBuilder {
    pub fn console(mut self, console: Arc<dyn Console>) -> Self {
        self.console = console;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn RemoteSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn route(mut self, route: Arc<dyn RouteProvider>) -> Self {
        self.route = route;
        self
    }

    pub fn filters(mut self, filters: Arc<FilterRegistry>) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    pub fn timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    pub fn build(self) -> VLog {
        VLog {
            console: self.console,
            sink: self.sink,
            route: self.route,
            filters: self.filters.unwrap_or_else(FilterRegistry::global),
            style: self.style,
            timestamps: self.timestamps,
        }
    }
}
