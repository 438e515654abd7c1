//! Binary entry point: argument parsing, logging, subcommand dispatch.

use anyhow::Result;
use clap::Parser;
use log::{debug, info};

use pixa::cli::{Args, Command};
use pixa::device::sim;
use pixa::entities::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use pixa::server::ApiServer;
use pixa::shell;

fn main() -> Result<()> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // Determine log level based on verbosity flags
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let default_level = match args.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Console logging (respects RUST_LOG if set)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    info!("pixa starting...");
    debug!("Command-line args: {:?}", args);

    match args.command {
        Command::Edit {
            width,
            height,
            sim: sim_count,
            file,
        } => shell::run(width, height, sim_count, file),
        Command::Serve {
            port,
            sim: sim_count,
        } => {
            let controllers = sim::controllers(sim_count, DEFAULT_WIDTH, DEFAULT_HEIGHT);
            ApiServer::serve(port, controllers)
        }
    }
}
