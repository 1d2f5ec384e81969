// src/config.rs
// =============================================================================
// The validated settings for one run.
//
// Built once from the parsed command line and passed by reference to the
// dispatcher. Validation runs before any network activity, and each kind of
// bad value has its own process exit code:
//   1 = timeout out of range
//   2 = concurrency out of range
//   3 = unsupported HTTP method
// =============================================================================

use std::ops::RangeInclusive;
use std::time::Duration;

use thiserror::Error;

use crate::cli::Cli;
use crate::dispatch::{FailurePolicy, SortOrder};
use crate::fetch::{HttpMethod, ALLOWED_METHODS};

/// Accepted values for -t, in seconds
pub const TIMEOUT_RANGE: RangeInclusive<i64> = 1..=600;
/// Accepted values for -c
pub const CONCURRENCY_RANGE: RangeInclusive<i64> = 1..=100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("-t timeout param must be in the range [1, 600]")]
    Timeout,

    #[error("-c concurrency param must be in the range [1, 100]")]
    Concurrency,

    #[error("-m http unsupported http method, use valid values [{methods}]", methods = ALLOWED_METHODS.join(", "))]
    Method,
}

impl ConfigError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::Timeout => 1,
            ConfigError::Concurrency => 2,
            ConfigError::Method => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Per-request timeout
    pub timeout: Duration,
    /// Maximum requests in flight; 1 means serial
    pub concurrency: usize,
    /// Report failures on stderr as they happen
    pub verbose: bool,
    pub method: HttpMethod,
    pub order: SortOrder,
    pub failures: FailurePolicy,
    /// Print JSON instead of text lines
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timeout: Duration::from_secs(30),
            concurrency: 1,
            verbose: false,
            method: HttpMethod::Get,
            order: SortOrder::Ascending,
            failures: FailurePolicy::Auto,
            json: false,
        }
    }
}

impl Config {
    // Checks timeout, then concurrency, then method; the first bad value wins
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if !TIMEOUT_RANGE.contains(&cli.timeout) {
            return Err(ConfigError::Timeout);
        }

        if !CONCURRENCY_RANGE.contains(&cli.concurrency) {
            return Err(ConfigError::Concurrency);
        }

        // -m get is accepted and sent as GET
        let method: HttpMethod = cli
            .method
            .to_uppercase()
            .parse()
            .map_err(|_| ConfigError::Method)?;

        let order = if cli.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };

        Ok(Config {
            // both casts are safe: the ranges above are positive
            timeout: Duration::from_secs(cli.timeout as u64),
            concurrency: cli.concurrency as usize,
            verbose: cli.verbose,
            method,
            order,
            failures: cli.failures,
            json: cli.json,
        })
    }
}
