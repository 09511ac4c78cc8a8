// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SwarmDirector - intent routing for departmental agent swarms.
//!
//! This is the binary entry point for the `director` command.

mod batch;
mod check;
mod route;
mod setup;
mod shutdown;
mod watch;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SwarmDirector - routes tasks to departmental agent swarms.
#[derive(Parser, Debug)]
#[command(name = "director", version, about, long_about = None)]
struct Cli {
    /// Configuration file. Without it the XDG hierarchy and ./director.toml are used.
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Route a single task and print the routing decision as JSON.
    Route(route::RouteArgs),
    /// Route JSON-lines tasks from stdin and print one decision per line.
    Batch(batch::BatchArgs),
    /// Validate configuration and print the effective keyword profile.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match setup::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            director_config::render_errors(&errors);
            std::process::exit(2);
        }
    };

    setup::init_tracing(&config.service.log_level);

    let result = match cli.command {
        Commands::Route(args) => route::run_route(&config, args).await,
        Commands::Batch(args) => batch::run_batch(&config, args).await,
        Commands::CheckConfig => check::run_check_config(&config),
    };

    if let Err(err) = result {
        eprintln!("director: {err}");
        std::process::exit(1);
    }
}
