//! Sink record receiver
//!
//! Receives `SinkRecord`s sent by `UdpSink`, for `vlog listen`.

use super::SinkRecord;
use crate::constants::{CHANNEL_CAPACITY, UDP_BUFFER_SIZE};
use crate::error::{Result, VLogError};
use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Spawn a UDP record receiver on the given port
pub fn spawn_record_receiver(
    shutdown: Arc<AtomicBool>,
    port: u16,
) -> Result<mpsc::Receiver<SinkRecord>> {
    let (tx, rx) = mpsc::channel::<SinkRecord>(CHANNEL_CAPACITY);

    // Bind up-front so callers can handle port-in-use cleanly.
    let socket = UdpSocket::bind(format!("127.0.0.1:{port}"))
        .map_err(|source| VLogError::ListenBind { port, source })?;
    socket
        .set_read_timeout(Some(Duration::from_millis(100)))
        .ok();

    std::thread::spawn(move || {
        run_receiver(socket, tx, shutdown);
    });

    Ok(rx)
}

/// Run the receiver loop (blocking, runs in thread)
fn run_receiver(socket: UdpSocket, tx: mpsc::Sender<SinkRecord>, shutdown: Arc<AtomicBool>) {
    let mut buf = vec![0u8; UDP_BUFFER_SIZE];

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match socket.recv_from(&mut buf) {
            Ok((len, _addr)) => {
                if let Ok(text) = std::str::from_utf8(&buf[..len]) {
                    for record in parse_records(text) {
                        if tx.blocking_send(record).is_err() {
                            return;
                        }
                    }
                }
            }
            Err(ref e)
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut =>
            {
                // Timeout - check shutdown and continue
                continue;
            }
            Err(e) => {
                debug!("Record receiver stopped: {}", e);
                break;
            }
        }
    }
}

/// Parse newline-delimited records, skipping malformed lines
fn parse_records(text: &str) -> Vec<SinkRecord> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str::<SinkRecord>(line).ok())
        .collect()
}
