//! vlog - color-tagged logging with opt-in remote reporting
//!
//! Usage:
//!   vlog print ARGS...                  Print with timestamp
//!   vlog log -l warn --report ARGS...   Leveled call, optionally reported
//!   vlog event EVENT_NAME [INFO_JSON]   Report a named event
//!   vlog filter set|add KEYWORD         Manage filter keywords
//!   vlog listen [--port PORT]           Show records sent by a UDP sink

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{parse_value, Cli, Command, FilterAction};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use vlog::logging::{init_tracing, receiver};
use vlog::{config, Call, NamedEvent, VLog, Value};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = config::load(cli.config.as_deref());

    let command = match cli.command {
        Command::Listen { port } => return run_listen(port.unwrap_or(cfg.sink.udp_port)),
        command => command,
    };

    // Dropping the façade at the end of main flushes the UDP sink
    let vlog = VLog::from_config(&cfg).context("Failed to set up logging from config")?;

    match command {
        Command::Print { args } => {
            vlog.call(Call::Print(args.iter().map(|a| parse_value(a)).collect()));
        }
        Command::Log {
            level,
            report,
            args,
        } => {
            let handle = vlog.leveled(level.into(), args.iter().map(|a| parse_value(a)).collect());
            if report {
                handle.report();
            }
        }
        Command::Event { event_name, info } => {
            let info = match serde_json::from_str::<serde_json::Value>(&info)
                .context("Event info is not valid JSON")?
            {
                serde_json::Value::Object(map) => map,
                other => bail!("Event info must be a JSON object, got {}", other),
            };
            vlog.call(Call::Event(NamedEvent::report_we_data(event_name, info)));
        }
        Command::Filter { action } => match action {
            FilterAction::Set { keyword } => vlog.set_filter_msg(Value::from(keyword)),
            FilterAction::Add { keyword } => vlog.add_filter_msg(Value::from(keyword)),
        },
        // Handled before the façade is built
        Command::Listen { .. } => {}
    }

    Ok(())
}

fn run_listen(port: u16) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    rt.block_on(async move {
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut rx = receiver::spawn_record_receiver(shutdown.clone(), port)
            .with_context(|| format!("Failed to listen on UDP port {}", port))?;
        eprintln!("Listening for vlog records on UDP {}", port);

        loop {
            tokio::select! {
                record = rx.recv() => match record {
                    Some(record) => println!("{}", record.summary()),
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        shutdown.store(true, Ordering::SeqCst);
        Ok::<(), anyhow::Error>(())
    })
}
