use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::entities::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// LED matrix grid editor and identify utility
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Edit a pixel grid animation interactively
    Edit {
        /// Grid width in columns
        #[arg(long = "width", value_name = "N", default_value_t = DEFAULT_WIDTH)]
        width: usize,

        /// Grid height in rows
        #[arg(long = "height", value_name = "N", default_value_t = DEFAULT_HEIGHT)]
        height: usize,

        /// Number of simulated controllers to attach
        #[arg(long = "sim", value_name = "N", default_value_t = 1)]
        sim: usize,

        /// Animation JSON file to load on startup
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Run the web identify utility
    Serve {
        /// HTTP port to listen on
        #[arg(short = 'p', long = "port", value_name = "PORT", default_value_t = 7878)]
        port: u16,

        /// Number of simulated controllers to attach
        #[arg(long = "sim", value_name = "N", default_value_t = 2)]
        sim: usize,
    },
}
