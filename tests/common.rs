//! Common test utilities and fixtures
//!
//! Shared functionality used across all test modules: a canned-response
//! HTTP server, notice-collecting clients, failing storage and a fake list
//! resource.

use async_trait::async_trait;
use parking_lot::Mutex;
use pvo::prelude::*;
use pvo::storage::KvStore;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// Path prefix the canned server mounts every route under.
#[allow(dead_code)]
pub const API_PREFIX: &str = "/api";

/// One canned reply, matched on method and path (query string ignored).
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Route {
    pub method: &'static str,
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

/// Builds a route relative to [`API_PREFIX`].
#[allow(dead_code)]
pub fn route(method: &'static str, path: &'static str, status: u16, body: impl Into<String>) -> Route {
    Route {
        method,
        path,
        status,
        body: body.into(),
    }
}

/// A request as the canned server saw it.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string
    pub target: String,
    pub body: String,
}

/// Minimal HTTP/1.1 server answering from a fixed route table.
///
/// Unknown routes get a bare 404. Every connection is closed after one
/// response.
#[allow(dead_code)]
pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl MockServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let recorded = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let routes = routes.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let _ = serve(stream, &routes, &recorded).await;
                });
            }
        });

        Self { addr, requests }
    }

    /// Base URL to configure the client with.
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

#[allow(dead_code)]
async fn serve(
    mut stream: TcpStream,
    routes: &[Route],
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default().to_string();
    let path = target.split('?').next().unwrap_or_default().to_string();
    let body = String::from_utf8_lossy(&buf[header_end..]).into_owned();

    recorded.lock().push(RecordedRequest {
        method: method.clone(),
        target,
        body,
    });

    let (status, body) = routes
        .iter()
        .find(|r| r.method == method && format!("{}{}", API_PREFIX, r.path) == path)
        .map(|r| (r.status, r.body.clone()))
        .unwrap_or((404, String::new()));

    let response = format!(
        "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// A client for `base_url` whose notices land in the returned receiver.
#[allow(dead_code)]
pub fn recording_client(base_url: &str) -> (ApiClient, mpsc::UnboundedReceiver<Notice>) {
    let (notifier, rx) = ChannelNotifier::new();
    let config = pvo::config::ClientConfigBuilder::default()
        .base_url(base_url)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let client = ApiClient::new(config).unwrap().with_notifier(Arc::new(notifier));
    (client, rx)
}

/// Everything the notifier received so far.
#[allow(dead_code)]
pub fn drain(rx: &mut mpsc::UnboundedReceiver<Notice>) -> Vec<Notice> {
    let mut notices = Vec::new();
    while let Ok(notice) = rx.try_recv() {
        notices.push(notice);
    }
    notices
}

/// Base URL of a port nothing listens on.
#[allow(dead_code)]
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, API_PREFIX)
}

#[allow(dead_code)]
pub fn comic(id: i64, name: &str, add_date: &str, is_r18: bool) -> Comic {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "add_date": add_date,
        "is_r18": is_r18,
    }))
    .unwrap()
}

#[allow(dead_code)]
pub fn image_set(id: i64, name: &str, add_date: &str, is_r18: bool) -> ImageSet {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "add_date": add_date,
        "is_r18": is_r18,
    }))
    .unwrap()
}

/// Five comics with mixed names, dates and R18 flags.
#[allow(dead_code)]
pub fn sample_comics() -> Vec<Comic> {
    vec![
        comic(1, "Moonlight", "2024-03-01T10:00:00Z", false),
        comic(2, "Afterglow", "2024-01-15T08:30:00Z", true),
        comic(3, "Cherry", "2024-05-20T12:00:00Z", false),
        comic(4, "Birdsong", "2024-02-10T09:00:00Z", false),
        comic(5, "Drift", "2024-04-05T18:45:00Z", true),
    ]
}

/// Key-value backend whose every operation fails.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct FailingStore;

impl KvStore for FailingStore {
    fn get(&self, _key: &str) -> pvo::Result<Option<String>> {
        Err(pvo::Error::storage("backend unavailable"))
    }

    fn set(&self, _key: &str, _value: &str) -> pvo::Result<()> {
        Err(pvo::Error::storage("quota exceeded"))
    }

    fn remove(&self, _key: &str) -> pvo::Result<()> {
        Err(pvo::Error::storage("backend unavailable"))
    }
}

/// One scripted answer of [`FakeComics`].
#[allow(dead_code)]
pub struct Scripted {
    pub delay: Duration,
    pub result: pvo::Result<Vec<Comic>>,
}

/// In-process comic list whose answers are scripted per call.
///
/// Calls beyond the script answer with an empty list immediately.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeComics {
    script: Mutex<Vec<Scripted>>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeComics {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().rev().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn answering(items: Vec<Comic>) -> Self {
        Self::new(vec![Scripted {
            delay: Duration::ZERO,
            result: Ok(items),
        }])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListResource for FakeComics {
    type Item = Comic;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Comic
    }

    async fn list(&self, _params: &ListParams) -> pvo::Result<Vec<Comic>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().pop();
        match next {
            Some(Scripted { delay, result }) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(Vec::new()),
        }
    }
}
