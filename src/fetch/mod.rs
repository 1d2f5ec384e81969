// src/fetch/mod.rs
// =============================================================================
// This module contains the single-URL side of wsc.
//
// Submodules:
// - method: The HTTP methods we accept and how they are matched
// - visit: The Visit record and the FetchError taxonomy
// - http: The Fetcher, which makes a request and measures the response
// =============================================================================

mod http;
mod method;
mod visit;

pub use http::Fetcher;
pub use method::{HttpMethod, ALLOWED_METHODS};
pub use visit::{FetchError, Visit};
