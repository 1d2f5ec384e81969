// src/fetch/method.rs
// =============================================================================
// The set of HTTP methods wsc is willing to send.
//
// Validation happens before any request is built, so a typo in -m fails the
// whole run with exit code 3 instead of producing one error per URL.
// =============================================================================

use std::fmt;
use std::str::FromStr;

/// Canonical (uppercase) names of every accepted method.
pub const ALLOWED_METHODS: [&str; 9] = [
    "GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "CONNECT", "OPTIONS", "TRACE",
];

// One variant per accepted method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Connect,
    Options,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// The matching reqwest method, used when the request is built
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Connect => reqwest::Method::CONNECT,
            HttpMethod::Options => reqwest::Method::OPTIONS,
            HttpMethod::Trace => reqwest::Method::TRACE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Error returned when a string is not one of ALLOWED_METHODS
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported http method '{0}'")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    // Matching is exact: "get" is rejected here. Callers that want to be
    // lenient upper-case the input first (see Config::from_cli).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !contains(&ALLOWED_METHODS, s) {
            return Err(UnknownMethod(s.to_string()));
        }

        let method = match s {
            "GET" => HttpMethod::Get,
            "HEAD" => HttpMethod::Head,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            "CONNECT" => HttpMethod::Connect,
            "OPTIONS" => HttpMethod::Options,
            _ => HttpMethod::Trace,
        };
        Ok(method)
    }
}

/// Reports whether `candidate` is in `set`. Case-sensitive.
pub fn contains(set: &[&str], candidate: &str) -> bool {
    set.iter().any(|item| *item == candidate)
}
