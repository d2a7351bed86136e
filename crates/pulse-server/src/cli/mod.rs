use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `pulse` binary.
#[derive(Debug, Parser)]
#[command(name = "pulse", version, about = "Pulse - project delivery tracking service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra TOML config file, merged above the project config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API and the weekly reporter
    Serve {
        /// Override `server.bind`
        #[arg(long)]
        bind: Option<String>,

        /// Do not start the weekly reporter
        #[arg(long)]
        no_reporter: bool,
    },

    /// Send the weekly summaries now and exit
    Report,
}
