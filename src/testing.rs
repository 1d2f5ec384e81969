// src/testing.rs
// =============================================================================
// Test-only helpers: a tiny HTTP server on 127.0.0.1 that serves canned
// responses, so fetch and dispatch tests never depend on the internet.
//
// Each connection gets exactly one response followed by `connection: close`,
// which keeps the client from reusing sockets between requests.
// =============================================================================

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::fetch::Fetcher;

// What the server does for a given path
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with this body
    Body(Vec<u8>),
    /// 200 with this body, after a pause
    Slow(Duration, Vec<u8>),
    /// 200 with this body sent as a single chunk
    Chunked(Vec<u8>),
    /// Read the request, then never answer
    Hang,
}

pub struct MockServer {
    addr: SocketAddr,
    peak: Arc<AtomicUsize>,
    accept_loop: JoinHandle<()>,
}

impl MockServer {
    // Binds an ephemeral port and starts serving; unknown paths get a 404
    pub async fn start(routes: Vec<(&str, Reply)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let routes: Arc<HashMap<String, Reply>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, reply)| (path.to_string(), reply))
                .collect(),
        );
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let server_peak = Arc::clone(&peak);
        let accept_loop = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let active = Arc::clone(&active);
                let peak = Arc::clone(&server_peak);

                tokio::spawn(async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    serve(stream, &routes, &active).await;
                });
            }
        });

        MockServer {
            addr,
            peak,
            accept_loop,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Highest number of requests the server was handling at the same time
    pub fn peak_connections(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.accept_loop.abort();
    }
}

// Handles one connection. `active` is decremented before the response is
// written, so the count never includes a request the client already finished.
async fn serve(mut stream: TcpStream, routes: &HashMap<String, Reply>, active: &AtomicUsize) {
    let path = match read_request_path(&mut stream).await {
        Some(path) => path,
        None => {
            active.fetch_sub(1, Ordering::SeqCst);
            return;
        }
    };

    match routes.get(&path) {
        Some(Reply::Body(body)) => {
            active.fetch_sub(1, Ordering::SeqCst);
            write_response(&mut stream, "200 OK", body).await;
        }
        Some(Reply::Slow(delay, body)) => {
            tokio::time::sleep(*delay).await;
            active.fetch_sub(1, Ordering::SeqCst);
            write_response(&mut stream, "200 OK", body).await;
        }
        Some(Reply::Chunked(body)) => {
            active.fetch_sub(1, Ordering::SeqCst);
            write_chunked_response(&mut stream, body).await;
        }
        Some(Reply::Hang) => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            active.fetch_sub(1, Ordering::SeqCst);
        }
        None => {
            active.fetch_sub(1, Ordering::SeqCst);
            write_response(&mut stream, "404 Not Found", b"not found").await;
        }
    }
}

// Reads up to the end of the request head and returns the request target
async fn read_request_path(stream: &mut TcpStream) -> Option<String> {
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];

    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        request.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&request);
    head.split_whitespace().nth(1).map(str::to_string)
}

async fn write_response(stream: &mut TcpStream, status: &str, body: &[u8]) {
    let head = format!(
        "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
        status,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes()).await;
    let _ = stream.write_all(body).await;
    let _ = stream.shutdown().await;
}

async fn write_chunked_response(stream: &mut TcpStream, body: &[u8]) {
    let head = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ntransfer-encoding: chunked\r\nconnection: close\r\n\r\n";
    let _ = stream.write_all(head.as_bytes()).await;
    let _ = stream
        .write_all(format!("{:x}\r\n", body.len()).as_bytes())
        .await;
    let _ = stream.write_all(body).await;
    let _ = stream.write_all(b"\r\n0\r\n\r\n").await;
    let _ = stream.shutdown().await;
}

// A URL nothing is listening on: bind a port, then give it back
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

// Fetcher that ignores proxy settings from the environment
pub fn test_fetcher() -> Fetcher {
    let client = Client::builder().no_proxy().build().unwrap();
    Fetcher::with_client(client)
}
