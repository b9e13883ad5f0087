// SPDX-License-Identifier: PMPL-1.0-or-later

//! In-process HTTP stub standing in for the POEditor API.
//!
//! Serves canned responses keyed by path and records every request so
//! tests can assert on what was sent. One connection at a time, closed
//! after each response.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// Starts the stub. `routes` receives the server's base URL (so export
    /// replies can point back at it) and returns path → (status, body).
    pub fn start(routes: impl FnOnce(&str) -> Vec<(&'static str, u16, String)>) -> Self {
        let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let table: HashMap<String, (u16, String)> = routes(&base_url)
            .into_iter()
            .map(|(path, status, body)| (path.to_string(), (status, body)))
            .collect();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                handle(stream, &table, &recorded);
            }
        });

        Self { base_url, requests }
    }

    pub fn api_url(&self) -> String {
        format!("{}/v2", self.base_url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

fn handle(
    mut stream: TcpStream,
    table: &HashMap<String, (u16, String)>,
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> Option<()> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut content_length = 0usize;
    let mut chunked = false;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if name == "content-length" {
                content_length = value.parse().unwrap_or(0);
            } else if name == "transfer-encoding" && value.eq_ignore_ascii_case("chunked") {
                chunked = true;
            }
        }
    }

    let body = if chunked {
        read_chunked(&mut reader)?
    } else {
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).ok()?;
        body
    };

    // Recorded before the reply is written.
    recorded.lock().unwrap().push(RecordedRequest {
        method,
        path: path.clone(),
        body: String::from_utf8_lossy(&body).to_string(),
    });

    let (status, reply) = table
        .get(&path)
        .cloned()
        .unwrap_or((404, "not found".to_string()));
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reply.len(),
        reply
    );
    stream.write_all(response.as_bytes()).ok()?;
    stream.flush().ok()
}

fn read_chunked(reader: &mut impl BufRead) -> Option<Vec<u8>> {
    let mut body = Vec::new();
    loop {
        let mut size_line = String::new();
        reader.read_line(&mut size_line).ok()?;
        let size = usize::from_str_radix(size_line.trim().split(';').next()?, 16).ok()?;
        let mut chunk = vec![0u8; size + 2];
        reader.read_exact(&mut chunk).ok()?;
        if size == 0 {
            return Some(body);
        }
        body.extend_from_slice(&chunk[..size]);
    }
}

pub fn success(result: &str) -> String {
    format!(
        r#"{{"response": {{"status": "success", "code": "200", "message": "OK"}}, "result": {}}}"#,
        result
    )
}

pub fn failure(code: &str, message: &str) -> String {
    format!(
        r#"{{"response": {{"status": "fail", "code": "{}", "message": "{}"}}}}"#,
        code, message
    )
}

pub fn languages(codes: &[&str]) -> String {
    let entries: Vec<String> = codes
        .iter()
        .map(|code| {
            format!(
                r#"{{"name": "{0}", "code": "{0}", "translations": 5, "percentage": 100, "updated": null}}"#,
                code
            )
        })
        .collect();
    success(&format!(r#"{{"languages": [{}]}}"#, entries.join(", ")))
}
