use std::path::PathBuf;

use clap::Parser;
use intbits_cli::{
    logging::{LogFormat, setup_logging},
    run_file, run_repl,
};
use tracing::info;

#[derive(clap::Parser)]
#[clap(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
struct Cli {
    /// Script to run. Starts an interactive prompt when omitted.
    path: Option<PathBuf>,

    /// Log filter directives, e.g. `debug` or `intbits_eval=trace`.
    #[arg(long = "log", env = "INTBITS_LOG", default_value = "warn")]
    log: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log, cli.log_format);

    info!(version = env!("CARGO_PKG_VERSION"), "intbits starting");

    match cli.path {
        Some(path) => run_file(&path)?,
        None => run_repl()?,
    }

    Ok(())
}
