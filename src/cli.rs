//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vlog::{Level, Value};

// =============================================================================
// CLI Definition
// =============================================================================

/// Color-tagged logging with opt-in remote reporting
#[derive(Parser, Debug)]
#[command(name = "vlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file (default: vlog.toml next to the executable)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print arguments with a timestamp (never reported)
    Print {
        /// Arguments; valid JSON is parsed, anything else is a string
        args: Vec<String>,
    },

    /// Leveled log call
    Log {
        /// Log level
        #[arg(short, long, value_enum, default_value_t = LevelArg::Log)]
        level: LevelArg,

        /// Forward to the remote sink
        #[arg(short, long)]
        report: bool,

        /// Arguments; a leading plain string becomes the tag
        args: Vec<String>,
    },

    /// Report a named analytics event
    Event {
        /// Event name (lower-cased before sending)
        event_name: String,

        /// Event info as a JSON object
        #[arg(default_value = "{}")]
        info: String,
    },

    /// Manage remote filter keywords
    Filter {
        #[command(subcommand)]
        action: FilterAction,
    },

    /// Print records received from a UDP sink
    Listen {
        /// UDP port to listen on (default: sink.udp_port from config)
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FilterAction {
    /// Replace keywords with a single one
    Set { keyword: String },
    /// Append a keyword
    Add { keyword: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelArg {
    Log,
    Info,
    Warn,
    Error,
    Table,
}

impl From<LevelArg> for Level {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Log => Level::Log,
            LevelArg::Info => Level::Info,
            LevelArg::Warn => Level::Warn,
            LevelArg::Error => Level::Error,
            LevelArg::Table => Level::Table,
        }
    }
}

/// Parse a command-line argument: JSON when it parses, a string otherwise
pub fn parse_value(arg: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(arg)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(arg))
}
