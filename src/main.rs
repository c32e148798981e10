// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)
)]

use clap::Parser;
use color_eyre::eyre::Result;
use daylog::{load_settings, log_error, log_info, LogHandle, Logger, OutputMode};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Prefix that routes a relayed line through the error entry point.
const ERROR_PREFIX: &str = "ERROR";

/// Daylog - relay standard input through an asynchronous log pipeline
/// into standard output or daily rotated log files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file with a [logging] table
    #[arg(short, long, env = "DAYLOG_CONFIG")]
    config: Option<PathBuf>,

    /// Output mode: stdio or file (overrides the config file)
    #[arg(short, long, env = "DAYLOG_MODE")]
    mode: Option<OutputMode>,

    /// Directory for daily log files, required in file mode
    #[arg(long, env = "DAYLOG_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Disable ANSI colors on stdout
    #[arg(long, env = "DAYLOG_NO_COLOR", default_value = "false")]
    no_color: bool,
}

/// Diagnostics about the pipeline itself go to stderr, never into the sink.
fn init_diagnostics() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("daylog=info"));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(ErrorLayer::default())
        .init();
}

async fn relay_line(log: &LogHandle, line: &str) {
    match line.strip_prefix(ERROR_PREFIX) {
        Some(rest) => log_error!(log, "{}", rest.trim_start_matches([':', ' '])).await,
        None => log_info!(log, "{line}").await,
    }
}

/// Relay stdin line by line until EOF or Ctrl-C. Returns the number of lines.
async fn relay_stdin(log: &LogHandle) -> std::io::Result<u64> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut relayed: u64 = 0;
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    relay_line(log, &line).await;
                    relayed = relayed.saturating_add(1);
                }
                None => break,
            },
            _ = &mut ctrl_c => {
                info!("Interrupted, draining log pipeline");
                break;
            }
        }
    }
    Ok(relayed)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    let args = Args::parse();
    init_diagnostics();

    let mut settings = load_settings(args.config.as_deref())?;
    settings.apply_overrides(args.mode, args.log_dir, args.no_color);

    // A pipeline that cannot write must stop startup here.
    let logger = Logger::from_settings(&settings)?;
    let pipeline = logger.run();
    let log = pipeline.handle();

    let relayed = relay_stdin(&log).await?;
    info!(relayed, "Input closed, shutting down");

    pipeline.shutdown().await?;
    Ok(())
}
