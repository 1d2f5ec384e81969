// src/fetch/http.rs
// =============================================================================
// This module measures a URL by making one HTTP request.
//
// Key functionality:
// - Builds the request up front, so malformed URLs never touch the network
// - Sends it with a per-request timeout (a single attempt, no retries)
// - Dumps the whole response (status line, headers, body) and counts the bytes
//
// Why dump instead of reading Content-Length?
// - The header may be missing (chunked responses) or simply wrong
// - What we want is what actually came over the wire
// =============================================================================

use reqwest::header::{HeaderMap, TRANSFER_ENCODING};
use reqwest::{Client, Request, Response, StatusCode, Version};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::method::HttpMethod;
use super::visit::{FetchError, Visit};

// Performs single-URL measurements
//
// Holds nothing but a reqwest Client, which is internally reference counted
// and safe to share between tasks. Cloning a Fetcher is cheap.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher with a default client (redirects followed, up to 10).
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client))
    }

    /// Creates a fetcher around an existing client.
    pub fn with_client(client: Client) -> Self {
        Fetcher { client }
    }

    // Fetches one URL and reports how big the response was
    //
    // Never fails: every problem ends up in Visit::error with a zero size.
    pub async fn fetch(&self, url: &str, method: HttpMethod, timeout: Duration) -> Visit {
        let request = match build_request(&self.client, url, method, timeout) {
            Ok(request) => request,
            Err(e) => {
                debug!(url, error = %e, "request not built");
                return Visit::failed(url, e);
            }
        };

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let error = FetchError::from_transport(e);
                debug!(url, error = %error, "request failed");
                return Visit::failed(url, error);
            }
        };

        match dump_response(response).await {
            Ok(dump) => {
                debug!(url, bytes = dump.len(), "response measured");
                Visit::measured(url, dump.len())
            }
            Err(e) => {
                debug!(url, error = %e, "response not readable");
                Visit::failed(url, e)
            }
        }
    }
}

// Builds the request without sending it
//
// Only http and https are accepted; anything else would be rejected by the
// client later anyway, and this way it's reported as a construction error.
fn build_request(
    client: &Client,
    url: &str,
    method: HttpMethod,
    timeout: Duration,
) -> Result<Request, FetchError> {
    let parsed = Url::parse(url)
        .map_err(|e| FetchError::InvalidRequest(format!("invalid URL '{}': {}", url, e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(FetchError::InvalidRequest(format!(
            "unsupported URL scheme '{}' in '{}'",
            parsed.scheme(),
            url
        )));
    }

    client
        .request(method.to_reqwest(), parsed)
        .timeout(timeout)
        .build()
        .map_err(|e| FetchError::InvalidRequest(e.to_string()))
}

// Serializes a response the way it looked on the wire and returns the bytes
//
// The body is read to the end; a timeout while reading it is still a timeout,
// anything else is a read failure.
async fn dump_response(response: Response) -> Result<Vec<u8>, FetchError> {
    let mut dump = dump_head(response.version(), response.status(), response.headers());
    let chunked = is_chunked(response.headers());

    let body = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else {
            FetchError::Read(e.to_string())
        }
    })?;

    dump_body(&mut dump, &body, chunked);
    Ok(dump)
}

// reqwest hands back the body de-chunked; the transfer-encoding header is
// still there, so the framing has to be put back to match it
fn is_chunked(headers: &HeaderMap) -> bool {
    headers.get_all(TRANSFER_ENCODING).iter().any(|value| {
        value
            .to_str()
            .map(|codings| {
                codings
                    .rsplit(',')
                    .next()
                    .map_or(false, |last| last.trim().eq_ignore_ascii_case("chunked"))
            })
            .unwrap_or(false)
    })
}

// Chunked bodies are written back as one chunk plus the zero-length last chunk
fn dump_body(dump: &mut Vec<u8>, body: &[u8], chunked: bool) {
    if !chunked {
        dump.extend_from_slice(body);
        return;
    }

    if !body.is_empty() {
        dump.extend_from_slice(format!("{:x}\r\n", body.len()).as_bytes());
        dump.extend_from_slice(body);
        dump.extend_from_slice(b"\r\n");
    }
    dump.extend_from_slice(b"0\r\n\r\n");
}

// Status line, one line per header, then the blank separator line
fn dump_head(version: Version, status: StatusCode, headers: &HeaderMap) -> Vec<u8> {
    let mut head = match status.canonical_reason() {
        Some(reason) => format!("{:?} {} {}\r\n", version, status.as_u16(), reason),
        None => format!("{:?} {}\r\n", version, status.as_u16()),
    }
    .into_bytes();

    for (name, value) in headers {
        head.extend_from_slice(name.as_str().as_bytes());
        head.extend_from_slice(b": ");
        head.extend_from_slice(value.as_bytes());
        head.extend_from_slice(b"\r\n");
    }

    head.extend_from_slice(b"\r\n");
    head
}
