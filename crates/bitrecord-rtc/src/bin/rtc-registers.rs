//! rtc-registers - print DS3231 register bytes for a timestamp or the live clock
//!
//! With `--at` the registers for that instant are printed once. Without it the
//! local clock is sampled every `--interval-ms` milliseconds.

use std::{
    io::{self, Write},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use bitrecord_rtc::{RtcTime, format_registers, parse_timestamp, register_bytes};
use chrono::Local;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "rtc-registers")]
#[command(about = "Print DS3231 timekeeping register bytes in binary")]
struct Cli {
    /// Timestamp to encode (RFC 3339 or `YYYY-MM-DD HH:MM:SS`) instead of the local clock
    #[arg(long)]
    at: Option<String>,

    /// Delay between samples of the local clock, in milliseconds
    #[arg(long, default_value = "1000")]
    interval_ms: u64,

    /// Number of samples to print (0 = run until interrupted)
    #[arg(long, default_value = "0")]
    count: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rtc_registers=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    run(&cli, &mut io::stdout().lock())
}

/// Writes one register line for `--at`, or `--count` lines sampled from the
/// local clock (forever when the count is 0).
fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    if let Some(at) = &cli.at {
        let timestamp =
            parse_timestamp(at).with_context(|| format!("invalid timestamp {at:?}"))?;
        let bytes = register_bytes(&RtcTime::from(&timestamp))?;
        writeln!(out, "{}", format_registers(&bytes))?;
        return Ok(());
    }

    info!(
        interval_ms = cli.interval_ms,
        count = cli.count,
        "sampling local clock"
    );

    let interval = Duration::from_millis(cli.interval_ms);
    let mut printed = 0u64;

    loop {
        let now = Local::now();
        let bytes = register_bytes(&RtcTime::from(&now))
            .with_context(|| format!("cannot encode {now}"))?;
        debug!(%now, "encoded registers");
        writeln!(out, "{}", format_registers(&bytes))?;
        out.flush()?;

        printed += 1;
        if cli.count != 0 && printed >= cli.count {
            return Ok(());
        }

        thread::sleep(interval);
    }
}
