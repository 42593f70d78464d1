//! Minimal HTTP/1.1 server for exercising the client paths in tests.
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const HEADER_END: &[u8] = b"\r\n\r\n";
const HANG_UP_STATUS: u16 = 0;

/// The parts of a request the handlers look at.
#[derive(Debug, Clone)]
pub(crate) struct TestRequest {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) authorization: Option<String>,
    pub(crate) body: String,
}

pub(crate) struct TestResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

impl TestResponse {
    pub(crate) fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub(crate) fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
        }
    }

    /// Closes the connection without writing a response.
    pub(crate) const fn hang_up() -> Self {
        Self {
            status: HANG_UP_STATUS,
            body: String::new(),
        }
    }
}

type Handler = dyn Fn(&TestRequest) -> TestResponse + Send + Sync;

#[derive(Default)]
pub(crate) struct ServerStats {
    pub(crate) in_flight: AtomicUsize,
    pub(crate) peak: AtomicUsize,
    pub(crate) served: AtomicUsize,
}

pub(crate) struct TestServer {
    pub(crate) addr: SocketAddr,
    pub(crate) stats: Arc<ServerStats>,
}

impl TestServer {
    pub(crate) fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Serves every request with `handler` after sleeping `delay`.
pub(crate) async fn spawn_server<F>(delay: Duration, handler: F) -> Result<TestServer, String>
where
    F: Fn(&TestRequest) -> TestResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("local_addr failed: {}", err))?;
    let stats = Arc::new(ServerStats::default());
    let server_stats = Arc::clone(&stats);
    let handler: Arc<Handler> = Arc::new(handler);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let stats = Arc::clone(&server_stats);
            let handler = Arc::clone(&handler);
            tokio::spawn(async move {
                drop(serve_connection(stream, delay, &stats, handler.as_ref()).await);
            });
        }
    });
    Ok(TestServer { addr, stats })
}

/// Answers every request with the same status and an empty body.
pub(crate) async fn spawn_status_server(status: u16, delay: Duration) -> Result<TestServer, String> {
    spawn_server(delay, move |_| TestResponse::status(status)).await
}

/// An address nothing listens on.
pub(crate) async fn closed_port() -> Result<SocketAddr, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("local_addr failed: {}", err))?;
    drop(listener);
    Ok(addr)
}

async fn serve_connection(
    mut stream: TcpStream,
    delay: Duration,
    stats: &ServerStats,
    handler: &Handler,
) -> std::io::Result<()> {
    let Some(request) = read_request(&mut stream).await? else {
        return Ok(());
    };
    let now = stats.in_flight.fetch_add(1, Ordering::SeqCst).saturating_add(1);
    stats.peak.fetch_max(now, Ordering::SeqCst);
    tokio::time::sleep(delay).await;
    let response = handler(&request);
    stats.in_flight.fetch_sub(1, Ordering::SeqCst);
    stats.served.fetch_add(1, Ordering::SeqCst);
    if response.status == HANG_UP_STATUS {
        return Ok(());
    }

    let head = format!(
        "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        response.body.len()
    );
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(response.body.as_bytes()).await?;
    stream.shutdown().await
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<Option<TestRequest>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Ok(None);
        }
        buf.extend_from_slice(chunk.get(..read).unwrap_or_default());
        if let Some(pos) = buf
            .windows(HEADER_END.len())
            .position(|window| window == HEADER_END)
        {
            break pos.saturating_add(HEADER_END.len());
        }
    };

    let head = String::from_utf8_lossy(buf.get(..header_end).unwrap_or_default()).into_owned();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_owned();
    let target = request_line.next().unwrap_or_default();
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path.to_owned(), Some(query.to_owned())),
        None => (target.to_owned(), None),
    };

    let mut content_length = 0usize;
    let mut authorization = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_ascii_lowercase();
            if name == "content-length" {
                content_length = value.trim().parse().unwrap_or(0);
            } else if name == "authorization" {
                authorization = Some(value.trim().to_owned());
            }
        }
    }

    let mut body = buf.get(header_end..).unwrap_or_default().to_vec();
    while body.len() < content_length {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(chunk.get(..read).unwrap_or_default());
    }

    Ok(Some(TestRequest {
        method,
        path,
        query,
        authorization,
        body: String::from_utf8_lossy(&body).into_owned(),
    }))
}
