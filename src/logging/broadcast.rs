//! UDP telemetry sink
//!
//! Sends `SinkRecord`s as newline-delimited JSON to a UDP port. Sending
//! happens on a background thread so logging calls never block on the
//! network; nothing is acknowledged or retried. Dropping the sink waits
//! for records already queued to go out.

use super::{Channel, FilterOp, SinkRecord};
use crate::error::{Result, VLogError};
use crate::remote::RemoteSink;
use serde_json::Value as Json;
use std::net::UdpSocket;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// Remote sink backed by a UDP socket
pub struct UdpSink {
    tx: Option<mpsc::Sender<SinkRecord>>,
    sender: Option<JoinHandle<()>>,
}

impl UdpSink {
    /// Bind a local socket and start the sender thread
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        // Bind up-front so callers can handle socket errors cleanly.
        let socket =
            UdpSocket::bind("0.0.0.0:0").map_err(|source| VLogError::SinkBind { source })?;
        let target = format!("{}:{}", host, port);
        let (tx, rx) = mpsc::channel::<SinkRecord>();

        let sender = thread::Builder::new()
            .name("vlog-udp-sink".to_string())
            .spawn(move || run_sender(rx, socket, target))
            .map_err(|source| VLogError::SinkBind { source })?;

        Ok(Self {
            tx: Some(tx),
            sender: Some(sender),
        })
    }

    fn send(&self, record: SinkRecord) -> Result<()> {
        self.tx
            .as_ref()
            .ok_or(VLogError::SinkClosed)?
            .send(record)
            .map_err(|_| VLogError::SinkClosed)
    }
}

impl Drop for UdpSink {
    fn drop(&mut self) {
        // Closing the channel ends the sender loop once the queue is empty
        drop(self.tx.take());
        if let Some(sender) = self.sender.take() {
            if sender.join().is_err() {
                debug!("UDP sink sender thread panicked");
            }
        }
    }
}

/// Run the sender loop (blocking, runs in thread)
fn run_sender(rx: mpsc::Receiver<SinkRecord>, socket: UdpSocket, target: String) {
    // Process records until every sender is dropped
    for record in rx {
        match serde_json::to_string(&record) {
            Ok(json) => {
                let msg = format!("{}\n", json);
                if let Err(e) = socket.send_to(msg.as_bytes(), &target) {
                    debug!("UDP sink send to {} failed: {}", target, e);
                }
            }
            Err(e) => debug!("UDP sink encode failed: {}", e),
        }
    }
}

impl RemoteSink for UdpSink {
    fn info(&self, tag: &str, payload: &Json) -> Result<()> {
        self.send(SinkRecord::report(Channel::Info, tag, payload.clone()))
    }

    fn warn(&self, tag: &str, payload: &Json) -> Result<()> {
        self.send(SinkRecord::report(Channel::Warn, tag, payload.clone()))
    }

    fn error(&self, tag: &str, payload: &Json) -> Result<()> {
        self.send(SinkRecord::report(Channel::Error, tag, payload.clone()))
    }

    fn event(&self, name: &str, payload: &Json) -> Result<()> {
        self.send(SinkRecord::event(name, payload.clone()))
    }

    fn supports_filter(&self) -> bool {
        true
    }

    fn set_filter_msg(&self, keyword: &str) -> Result<()> {
        self.send(SinkRecord::filter(FilterOp::Set, keyword))
    }

    fn add_filter_msg(&self, keyword: &str) -> Result<()> {
        self.send(SinkRecord::filter(FilterOp::Add, keyword))
    }
}
