//! Initializes `tracing` for the binary: `RUST_LOG`-driven filtering, plain
//! text with `trace_id`/`span_id` prefixes (see [`crate::log_format`]), and
//! an optional rolling file appender when `ORCHESTRATOR_LOG_DIR` is set.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::log_format::TextWithSpanIds;

pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(TextWithSpanIds::new())
        .with_writer(std::io::stderr)
        .boxed();

    let registry = tracing_subscriber::registry().with(filter).with(stderr_layer);

    match std::env::var("ORCHESTRATOR_LOG_DIR") {
        Ok(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "orchestrator-cli.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            // Leaked deliberately: the guard must outlive the process for the
            // background writer thread to flush on exit, and this runs once
            // at startup of a short-lived CLI invocation.
            Box::leak(Box::new(guard));
            let file_layer = tracing_subscriber::fmt::layer()
                .event_format(TextWithSpanIds::new())
                .with_writer(non_blocking)
                .with_ansi(false)
                .boxed();
            registry.with(file_layer).try_init()?;
        }
        Err(_) => {
            registry.try_init()?;
        }
    }

    Ok(())
}
