// Shared helpers for integration tests: an in-process OCR.space stand-in.
#![allow(dead_code)]

use std::io::{ErrorKind, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clipboard_ocr::clipboard::ClipboardImage;
use clipboard_ocr::settings::ConfigStore;

pub const VALID_KEY: &str = "K812345678";

/// One captured HTTP request.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub head: String,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Value of a multipart text field, e.g. `field("filetype")`.
    pub fn field(&self, name: &str) -> Option<String> {
        let body = self.body_text();
        let marker = format!("name=\"{}\"", name);
        let start = body.find(&marker)? + marker.len();
        let rest = &body[start..];
        let value_start = rest.find("\r\n\r\n")? + 4;
        let value = &rest[value_start..];
        let end = value.find("\r\n").unwrap_or(value.len());
        Some(value[..end].to_string())
    }

    /// Synthetic file name of the uploaded `file` part.
    pub fn file_name(&self) -> Option<String> {
        let body = self.body_text();
        let marker = "filename=\"";
        let start = body.find(marker)? + marker.len();
        let end = body[start..].find('"')?;
        Some(body[start..start + end].to_string())
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.body_text().contains(&format!("name=\"{}\"", name))
    }
}

/// How the mock answers one connection.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(String),
    Raw(String),
    Hang(Duration),
}

pub struct MockOcrServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: Option<JoinHandle<()>>,
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("set read timeout");

    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    let header_end = loop {
        if let Some(end) = find_header_end(&buf) {
            break end;
        }
        let n = stream.read(&mut chunk).expect("read request head");
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok());
    let chunked = head.contains("transfer-encoding: chunked");

    let mut body = buf[header_end..].to_vec();
    loop {
        let done = match content_length {
            Some(len) => body.len() >= len,
            None if chunked => body.ends_with(b"0\r\n\r\n"),
            None => true,
        };
        if done {
            break;
        }
        let n = stream.read(&mut chunk).expect("read request body");
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    CapturedRequest { head, body }
}

fn write_reply(stream: &mut TcpStream, status: &str, content_type: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).expect("write response");
    stream.flush().expect("flush response");
}

impl MockOcrServer {
    /// Serves `replies` in order, one connection each, then stops accepting.
    pub fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server failed");
        let addr = listener.local_addr().expect("read local addr failed");
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let thread_hits = Arc::clone(&hits);
        let thread_requests = Arc::clone(&requests);
        let handle = thread::spawn(move || {
            for reply in replies {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                thread_hits.fetch_add(1, Ordering::SeqCst);
                let captured = read_request(&mut stream);
                thread_requests.lock().expect("requests lock").push(captured);

                match reply {
                    Reply::Json(body) => write_reply(&mut stream, "200 OK", "application/json", &body),
                    Reply::Raw(body) => write_reply(&mut stream, "502 Bad Gateway", "text/html", &body),
                    Reply::Hang(duration) => thread::sleep(duration),
                }
            }
        });

        Self {
            url: format!("http://127.0.0.1:{}/parse/image", addr.port()),
            hits,
            requests,
            handle: Some(handle),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Waits for the server thread to serve every scripted reply.
    pub fn finish(mut self) -> Vec<CapturedRequest> {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("server thread failed");
        }
        self.requests()
    }
}

/// An endpoint that never answers; counts connection attempts.
pub struct IdleEndpoint {
    pub url: String,
    listener: TcpListener,
}

impl IdleEndpoint {
    pub fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind idle endpoint failed");
        listener.set_nonblocking(true).expect("set nonblocking");
        let port = listener.local_addr().expect("read local addr").port();
        Self {
            url: format!("http://127.0.0.1:{}/parse/image", port),
            listener,
        }
    }

    /// Connections that reached the socket (accepted or still in the backlog).
    pub fn connection_attempts(&self) -> usize {
        let mut count = 0;
        loop {
            match self.listener.accept() {
                Ok(_) => count += 1,
                Err(e) if e.kind() == ErrorKind::WouldBlock => return count,
                Err(e) => panic!("accept failed: {e}"),
            }
        }
    }
}

pub fn success_json(texts: &[&str]) -> String {
    let results: Vec<String> = texts
        .iter()
        .map(|t| format!("{{\"ParsedText\":{}}}", serde_json::to_string(t).expect("json string")))
        .collect();
    format!(
        "{{\"IsErroredOnProcessing\":false,\"ParsedResults\":[{}]}}",
        results.join(",")
    )
}

pub fn error_json(message: &str) -> String {
    format!(
        "{{\"IsErroredOnProcessing\":true,\"ErrorMessage\":[{}]}}",
        serde_json::to_string(message).expect("json string")
    )
}

pub fn png_image(len: usize) -> ClipboardImage {
    let mut bytes = vec![137_u8, 80, 78, 71, 13, 10, 26, 10];
    bytes.resize(len.max(bytes.len()), 0x42);
    bytes.truncate(len);
    ClipboardImage {
        bytes,
        media_type: "image/png".to_string(),
    }
}

pub fn image_of(media_type: &str, len: usize) -> ClipboardImage {
    ClipboardImage {
        bytes: vec![0x42; len],
        media_type: media_type.to_string(),
    }
}

pub fn temp_store(name: &str) -> ConfigStore {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!("clipboard-ocr-it-{}-{}", name, nanos));
    ConfigStore::new(PathBuf::from(dir).join("ocr-config.json"))
}
