//! Tracing subscriber setup for the `intbits` binary.
//!
//! Events always go to stderr so they never mix with program output.

use std::io;

use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `directives` when it is set and valid.
pub fn setup_logging(directives: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_target(false)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_writer(io::stderr),
            )
            .init(),
    }
}
