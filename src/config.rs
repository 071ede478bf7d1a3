//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

use crate::state::EngineSettings;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-widget")]
#[command(about = "A persisted single-countdown engine with a headless widget view")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory holding the persisted countdown record
    #[arg(short, long, default_value = ".countdown")]
    pub data_dir: PathBuf,

    /// Tick interval in milliseconds
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Delay before the running panel is revealed after a start, in milliseconds
    #[arg(long, default_value = "1000")]
    pub reveal_delay_ms: u64,

    /// How long invalid form fields stay highlighted, in milliseconds
    #[arg(long, default_value = "3000")]
    pub invalid_highlight_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Engine timings derived from the flags
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            // a zero interval would make tokio panic
            tick_interval: Duration::from_millis(self.tick_ms.max(1)),
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
            invalid_highlight: Duration::from_millis(self.invalid_highlight_ms),
        }
    }
}
