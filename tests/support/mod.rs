//! A minimal HTTP responder for exercising the real transport.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Ipv4Addr, TcpListener};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query, e.g. `/api/v1/series?api_key=abc`
    pub target: String,
    pub content_type: Option<String>,
    pub body: String,
}

pub struct TestServer {
    pub base_url: String,
    requests: Receiver<RecordedRequest>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Answer one request per entry in `statuses`, in order, then stop
    pub fn start(statuses: Vec<(u16, &'static str)>) -> Self {
        let listener =
            TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).expect("Failed to bind to address");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            for (status, reason) in statuses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let request = read_request(&mut stream);
                let _ = tx.send(request);
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    status, reason
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{}/", port),
            requests: rx,
            handle: Some(handle),
        }
    }

    /// Wait for the responder to finish and return everything it received
    pub fn finish(mut self) -> Vec<RecordedRequest> {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("test server panicked");
        }
        self.requests.try_iter().collect()
    }
}

fn read_request(stream: &mut std::net::TcpStream) -> RecordedRequest {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .expect("failed to read request line");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    let mut content_type = None;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("failed to read header");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim().to_string();
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.parse().unwrap_or(0),
                "content-type" => content_type = Some(value),
                _ => {}
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).expect("failed to read body");

    RecordedRequest {
        method,
        target,
        content_type,
        body: String::from_utf8(body).expect("body is not UTF-8"),
    }
}
