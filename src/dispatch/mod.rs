// src/dispatch/mod.rs
// =============================================================================
// This module runs the Fetcher over the whole URL list and gathers results.
//
// How it works:
// 1. concurrency == 1: fetch each URL in input order, one after another
// 2. concurrency > 1: spawn one task per URL. A semaphore with `concurrency`
//    permits is held around each fetch, so no more than that many requests
//    are ever in flight. Finished visits are pushed onto an mpsc channel.
// 3. The collector receives exactly one visit per URL, then the Sorter
//    decides the final order.
//
// Nothing is returned until every URL has been visited. There is no overall
// deadline; each request is bounded by its own timeout.
//
// `errors` is the console side channel for -v: in serial mode each failed
// URL is written there as soon as it fails. main passes stderr.
// =============================================================================

mod sort;

pub use sort::{sort_visits, SortOrder};

use std::io::Write;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::fetch::{FetchError, Fetcher, Visit};

// Which failed visits make it into the final list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FailurePolicy {
    /// Drop failures when running serially, keep them when running concurrently
    #[default]
    Auto,
    /// Always list failures (with 0 bytes and the error)
    Keep,
    /// Never list failures
    Drop,
}

impl FailurePolicy {
    pub fn keeps_failures(self, concurrent: bool) -> bool {
        match self {
            FailurePolicy::Auto => concurrent,
            FailurePolicy::Keep => true,
            FailurePolicy::Drop => false,
        }
    }
}

/// Visits every URL and returns the results in Sorter order.
pub async fn run<W: Write>(
    fetcher: &Fetcher,
    urls: &[String],
    config: &Config,
    errors: &mut W,
) -> Vec<Visit> {
    let mut visits = collect(fetcher, urls, config, errors).await;
    sort_visits(&mut visits, config.order);
    visits
}

// Visits every URL and returns the results in completion order, with failed
// visits filtered according to the configured FailurePolicy
pub async fn collect<W: Write>(
    fetcher: &Fetcher,
    urls: &[String],
    config: &Config,
    errors: &mut W,
) -> Vec<Visit> {
    let concurrent = config.concurrency > 1;

    let visits = if concurrent {
        collect_concurrent(fetcher, urls, config).await
    } else {
        collect_serial(fetcher, urls, config, errors).await
    };

    let failed = visits.iter().filter(|v| !v.is_ok()).count();
    info!(
        visited = visits.len(),
        failed,
        concurrency = config.concurrency,
        "all urls visited"
    );

    if config.failures.keeps_failures(concurrent) {
        visits
    } else {
        visits.into_iter().filter(Visit::is_ok).collect()
    }
}

// One request at a time, in input order
async fn collect_serial<W: Write>(
    fetcher: &Fetcher,
    urls: &[String],
    config: &Config,
    errors: &mut W,
) -> Vec<Visit> {
    let mut visits = Vec::with_capacity(urls.len());

    for url in urls {
        let visit = fetcher.fetch(url, config.method, config.timeout).await;

        if let Some(error) = &visit.error {
            if config.verbose {
                // a broken console must not stop the run
                let _ = writeln!(errors, "{}: {}", url, error);
            }
        }

        visits.push(visit);
    }

    visits
}

// One task per URL, at most `config.concurrency` of them fetching at once
async fn collect_concurrent(fetcher: &Fetcher, urls: &[String], config: &Config) -> Vec<Visit> {
    let permits = Arc::new(Semaphore::new(config.concurrency));
    let (sender, mut receiver) = mpsc::channel::<Visit>(config.concurrency);

    let mut tasks = Vec::with_capacity(urls.len());
    for url in urls {
        let fetcher = fetcher.clone();
        let permits = Arc::clone(&permits);
        let sender = sender.clone();
        let url = url.clone();
        let method = config.method;
        let timeout = config.timeout;

        tasks.push(tokio::spawn(async move {
            let visit = match permits.acquire_owned().await {
                Ok(_permit) => fetcher.fetch(&url, method, timeout).await,
                Err(e) => Visit::failed(url, FetchError::Aborted(e.to_string())),
            };
            // The permit is already released here; waiting on a full channel
            // doesn't block another request from starting.
            let _ = sender.send(visit).await;
        }));
    }
    // Only the tasks hold senders now, so recv() ends once they're all gone
    drop(sender);

    let mut visits = Vec::with_capacity(urls.len());
    while visits.len() < urls.len() {
        match receiver.recv().await {
            Some(visit) => {
                debug!(url = %visit.url, bytes = visit.body_size, "visit collected");
                visits.push(visit);
            }
            None => break,
        }
    }

    // Tasks that died before sending still owe us a visit
    for (url, outcome) in urls.iter().zip(join_all(tasks).await) {
        if let Err(e) = outcome {
            warn!(url = %url, error = %e, "fetch task did not report");
            visits.push(Visit::failed(url.clone(), FetchError::Aborted(e.to_string())));
        }
    }

    visits
}
