// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The numeric flags are parsed as plain signed integers and range-checked in
// config.rs, not by clap, because each out-of-range value needs its own exit
// code (clap would exit with 2 for all of them).
// =============================================================================

use clap::Parser;

use crate::dispatch::FailurePolicy;

const EXAMPLES: &str = "\
Examples:
  Default values:
    $ wsc https://example.de/ https://example.com/
    https://example.de/ 14953 bytes
    https://example.com/ 359600 bytes

  Request timeout in seconds:
    $ wsc -t 5 https://example.de/ https://example.com/

  Up to 2 requests at a time:
    $ wsc -c 2 https://example.de/ https://example.com/

  POST instead of GET:
    $ wsc -c 2 -m POST https://example.de/ https://example.com/

  Verbose mode, failures listed with 0 bytes:
    $ wsc -v -c 2 -t 1 -m POST https://example.de/ https://example.com/ https://slow.example.com.br
    https://slow.example.com.br 0 bytes (operation timed out)
    https://example.de/ 936 bytes
    https://example.com/ 1861 bytes";

// The entire CLI: flags plus the URLs to measure
#[derive(Parser, Debug)]
#[command(
    name = "wsc",
    version,
    about = "Fetch URLs and list them sorted by the size of their HTTP responses",
    long_about = "wsc requests every URL, measures the full response (status line, headers \
                  and body) in bytes, and prints the URLs sorted by that size.",
    after_long_help = EXAMPLES
)]
pub struct Cli {
    /// URLs to fetch. Without any, this help is printed.
    pub urls: Vec<String>,

    /// Request timeout in seconds [1, 600]
    #[arg(short = 't', default_value_t = 30, allow_negative_numbers = true, value_name = "SECONDS")]
    pub timeout: i64,

    /// Maximum number of requests in flight [1, 100]; 1 fetches serially
    #[arg(short = 'c', default_value_t = 1, allow_negative_numbers = true, value_name = "N")]
    pub concurrency: i64,

    /// Print request errors as they happen
    #[arg(short = 'v')]
    pub verbose: bool,

    /// HTTP method: GET, HEAD, POST, PUT, PATCH, DELETE, CONNECT, OPTIONS or TRACE
    #[arg(short = 'm', default_value = "GET", value_name = "METHOD")]
    pub method: String,

    /// Largest responses first
    #[arg(long)]
    pub desc: bool,

    /// Output results in JSON format instead of text lines
    #[arg(long)]
    pub json: bool,

    /// Which failed URLs to list
    #[arg(long, value_enum, default_value_t = FailurePolicy::Auto)]
    pub failures: FailurePolicy,
}
