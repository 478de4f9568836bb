//! Integration tests for the logging façade
//!
//! Drives the public API end to end with recording collaborators, and the
//! UDP sink through a real socket and the record receiver.

use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use vlog::logging::{receiver, FilterOp, RecordKind};
use vlog::{
    vargs, Call, Channel, FilterRegistry, MemoryConsole, MemorySink, NamedEvent, StaticRoute,
    UdpSink, VLog, Value,
};

// =============================================================================
// Helpers
// =============================================================================

struct Fixture {
    vlog: VLog,
    console: Arc<MemoryConsole>,
    sink: Arc<MemorySink>,
}

fn fixture() -> Fixture {
    let console = Arc::new(MemoryConsole::new());
    let sink = Arc::new(MemorySink::new());
    let vlog = VLog::builder()
        .console(console.clone())
        .sink(sink.clone())
        .route(Arc::new(StaticRoute("pages/index/index".into())))
        .filters(Arc::new(FilterRegistry::default()))
        .timestamps(false)
        .build();
    Fixture {
        vlog,
        console,
        sink,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_info_report_roundtrip() {
    let f = fixture();
    let handle = f.vlog.info(vargs!["pageA", "hello", 42]);

    // Nothing leaves before report()
    assert!(f.sink.is_empty());
    assert_eq!(f.console.texts(), vec!["pageA hello 42"]);

    handle.report();
    handle.report();

    let expected = vec![
        RecordKind::Report {
            channel: Channel::Info,
            tag: "pageA".into(),
            payload: json!("hello"),
        },
        RecordKind::Report {
            channel: Channel::Info,
            tag: "pageA".into(),
            payload: json!(42),
        },
    ];
    let records = f.sink.records();
    assert_eq!(records[..2], expected[..]);
    assert_eq!(records[2..], expected[..]);
}

#[test]
fn test_mixed_arguments_report_only_transmittable() {
    let f = fixture();
    let big = Value::Array((0..100).map(Value::from).collect());
    let framework = Value::record([
        ("__data__", 1),
        ("__route__", 2),
        ("__wxExparserNodeId__", 3),
    ]);

    f.vlog
        .error(vargs![
            "checkout",
            Value::record([("orderId", 7)]),
            big,
            framework,
            Value::function("onTap"),
            false
        ])
        .report();

    let payloads: Vec<serde_json::Value> = f
        .sink
        .records()
        .into_iter()
        .map(|r| match r {
            RecordKind::Report { payload, .. } => payload,
            other => panic!("Expected Report record, got {:?}", other),
        })
        .collect();
    assert_eq!(payloads, vec![json!({"orderId": 7}), json!(false)]);

    // Display keeps everything
    let line = &f.console.lines()[0];
    assert_eq!(line.content.len(), 5);
    assert_eq!(line.content[3], "[Function: onTap]");
}

#[test]
fn test_route_fallback_for_untagged_calls() {
    let f = fixture();
    f.vlog.warn(vargs![Value::record([("a", 1)]), "x"]).report();

    let tags: Vec<String> = f
        .sink
        .records()
        .into_iter()
        .filter_map(|r| match r {
            RecordKind::Report { tag, .. } => Some(tag),
            _ => None,
        })
        .collect();
    assert_eq!(tags, vec!["pages/index/index", "pages/index/index"]);
    assert!(f.console.texts()[0].starts_with("pages/index/index : "));
}

#[test]
fn test_event_and_filters_through_call_surface() {
    let f = fixture();
    let mut info = serde_json::Map::new();
    info.insert("k".into(), json!(1));

    f.vlog
        .call(Call::Event(NamedEvent::report_we_data("BI_X", info)));
    f.vlog.set_filter_msg("openid");
    f.vlog.add_filter_msg("wechatId");
    f.vlog.call(Call::Print(vargs!["local only"]));

    assert_eq!(
        f.sink.records(),
        vec![
            RecordKind::Event {
                name: "bi_x".into(),
                payload: json!({"res": "{\"k\":1}"}),
            },
            RecordKind::Filter {
                op: FilterOp::Set,
                keyword: "openid".into(),
            },
            RecordKind::Filter {
                op: FilterOp::Add,
                keyword: "wechatId".into(),
            },
        ]
    );
    assert_eq!(f.console.lines().len(), 4);
}

#[test]
fn test_default_facade_never_fails_without_sink() {
    let console = Arc::new(MemoryConsole::new());
    let vlog = VLog::builder()
        .console(console.clone())
        .filters(Arc::new(FilterRegistry::default()))
        .build();

    for handle in [
        vlog.log(vargs![]),
        vlog.info(vargs!["t", 1]),
        vlog.warn(vargs!["t", Value::Promise]),
        vlog.error(vargs!["t", Value::error("Error", "boom")]),
    ] {
        handle.report();
    }
    vlog.set_filter_msg("ignored");

    assert_eq!(console.lines().len(), 4);
}

#[tokio::test]
async fn test_udp_sink_to_receiver() {
    // Grab a free port, then hand it to the receiver
    let port = {
        let probe = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        probe.local_addr().unwrap().port()
    };
    let shutdown = Arc::new(AtomicBool::new(false));
    let mut rx = receiver::spawn_record_receiver(shutdown.clone(), port).unwrap();

    let vlog = VLog::builder()
        .console(Arc::new(MemoryConsole::new()))
        .sink(Arc::new(UdpSink::connect("127.0.0.1", port).unwrap()))
        .filters(Arc::new(FilterRegistry::default()))
        .build();
    vlog.warn(vargs!["pageA", "hello"]).report();

    let record = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("record not received in time")
        .expect("receiver closed");
    shutdown.store(true, Ordering::SeqCst);

    assert_eq!(
        record.kind,
        RecordKind::Report {
            channel: Channel::Warn,
            tag: "pageA".into(),
            payload: json!("hello"),
        }
    );
}
