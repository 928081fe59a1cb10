// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boxtrack - asset tracking for reusable shipping containers.
//!
//! This is the binary entry point for the Boxtrack service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;

/// Boxtrack - asset tracking for reusable shipping containers.
#[derive(Parser, Debug)]
#[command(name = "boxtrack", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Boxtrack API server.
    Serve,
    /// Print the effective configuration and exit.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match boxtrack_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            boxtrack_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("boxtrack serve failed: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("boxtrack config: failed to render configuration: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("boxtrack: use --help for available commands");
        }
    }
}
