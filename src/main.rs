// src/main.rs
// =============================================================================
// This is the entry point of wsc.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate them into a Config (bad values exit with 1, 2 or 3)
// 3. Visit every URL through the dispatcher
// 4. Print the visits sorted by response size
//
// Exit codes:
//   0 = done (individual URL failures don't change this)
//   1 = -t out of range, 2 = -c out of range, 3 = unsupported -m
//   4 = internal error (HTTP client could not be created, output failed)
// =============================================================================

mod cli;
mod config;
mod dispatch;
mod fetch;
mod logging;
mod report;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use cli::Cli;
use config::Config;
use fetch::Fetcher;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            4
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    run_with(Cli::parse()).await
}

// Everything after argument parsing; returns the process exit code
async fn run_with(cli: Cli) -> Result<i32> {
    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", e);
            return Ok(e.exit_code());
        }
    };

    logging::init(config.verbose);

    if cli.urls.is_empty() {
        Cli::command().print_long_help()?;
        return Ok(0);
    }

    let fetcher = Fetcher::new().context("cannot create the HTTP client")?;
    let visits = dispatch::run(&fetcher, &cli.urls, &config, &mut std::io::stderr()).await;

    report::print_results(&visits, config.json)?;

    Ok(0)
}
