//! Command-line configuration and logging setup for the binaries.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use env_logger::Target;
use log::LevelFilter;

use crate::analysis::DEFAULT_ENDPOINT;

/// Interactive Xiangqi manual viewer.
#[derive(Parser, Debug, Clone)]
#[command(name = "qipu", version, about)]
pub struct ViewerArgs {
    /// Autoplay period in milliseconds.
    #[arg(long, default_value_t = 1500)]
    pub period_ms: u64,

    /// Load manuals from this JSON file instead of the built-in catalog.
    #[arg(long)]
    pub manuals: Option<PathBuf>,

    /// Analysis service endpoint used by `analyze`.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Disable the `analyze` command.
    #[arg(long)]
    pub offline: bool,

    /// Log level when RUST_LOG is unset.
    #[arg(long, default_value_t = LevelFilter::Warn)]
    pub log_level: LevelFilter,
}

impl ViewerArgs {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

/// HTTP proxy in front of the ChessDB analysis service.
#[derive(Parser, Debug, Clone)]
#[command(name = "qipu-proxy", version, about)]
pub struct ProxyArgs {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// Upstream analysis endpoint.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request path served by the proxy.
    #[arg(long, default_value = "/api/chessdb")]
    pub route: String,

    /// Log level when RUST_LOG is unset.
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl ProxyArgs {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Initializes stderr logging. `RUST_LOG` overrides `level`.
pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{style}[{}] [{:5}]{style:#} {}",
                buf.timestamp_millis(),
                record.level(),
                record.args(),
                style = buf.default_level_style(record.level()),
            )
        })
        .target(Target::Stderr)
        .init();
}
