//! Shared command-line surface for the five analysis drivers: each one
//! takes exactly one positional argument (a path to a textual IR file)
//! plus a verbosity flag, modeled on the logging bootstrap every driver
//! in this crate shares.

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// One IR file in, one analysis report out.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Path to a textual IR file.
    pub file: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Install a `tracing-subscriber` formatter at the verbosity this
    /// invocation asked for.
    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        let env_filter = EnvFilter::from_default_env()
            .add_directive(format!("tac_flow_analysis={level}").parse().unwrap());
        fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_level(true)
            .with_thread_ids(false)
            .init();
    }
}
