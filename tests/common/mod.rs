//! Minimal HTTP/1.1 stub server for exercising the client end to end.
//! One request per connection; every response closes the connection.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Clone, Debug)]
struct StubRoute {
    method: String,
    path: String,
    status: u16,
    body: String,
}

/// A request as the server saw it
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub target: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn query(&self) -> &str {
        self.target.split_once('?').map(|(_, q)| q).unwrap_or_default()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub struct StubServer {
    addr: SocketAddr,
    routes: Arc<Mutex<Vec<StubRoute>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    pub async fn start() -> StubServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes: Arc<Mutex<Vec<StubRoute>>> = Arc::default();
        let requests: Arc<Mutex<Vec<Recorded>>> = Arc::default();

        let (accept_routes, accept_requests) = (routes.clone(), requests.clone());
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let routes = accept_routes.clone();
                let requests = accept_requests.clone();
                tokio::spawn(async move {
                    let _ = serve(socket, routes, requests).await;
                });
            }
        });

        StubServer { addr, routes, requests }
    }

    /// Answer `method path` (query ignored) with `status` and a JSON body
    pub fn on(&self, method: &str, path: &str, status: u16, body: impl Into<String>) {
        self.routes.lock().unwrap().push(StubRoute {
            method: method.to_string(),
            path: path.to_string(),
            status,
            body: body.into(),
        });
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.requests().iter().filter(|r| r.method == method).count()
    }
}

async fn serve(
    mut socket: TcpStream,
    routes: Arc<Mutex<Vec<StubRoute>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    let mut content_type = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.trim().parse().unwrap_or(0),
                "content-type" => content_type = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = buf.len().min(header_end + content_length);

    let recorded = Recorded {
        method,
        target,
        content_type,
        body: buf[header_end..body_end].to_vec(),
    };

    let (status, body) = {
        let routes = routes.lock().unwrap();
        routes
            .iter()
            .find(|r| r.method == recorded.method && r.path == recorded.path())
            .map(|r| (r.status, r.body.clone()))
            .unwrap_or((404, r#"{"message":"Not found"}"#.to_string()))
    };
    requests.lock().unwrap().push(recorded);

    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}
