//! Static file server for the wave portal bundle
//!
//! Serves the trunk build output from dist/ on port 8080. Dependency-free;
//! the WASM app never talks back to this server, it only gets delivered
//! by it.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};

const ADDR: &str = "127.0.0.1:8080";
const DIST: &str = "dist";

fn main() {
    let listener = TcpListener::bind(ADDR).expect("failed to bind port 8080");

    println!("Wave portal running at http://{ADDR}");
    println!("Serving from {DIST}/");
    println!("Press Ctrl+C to stop\n");

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => handle_client(stream),
            Err(err) => eprintln!("connection error: {err}"),
        }
    }
}

fn handle_client(mut stream: TcpStream) {
    let request_line = match BufReader::new(&stream).lines().next() {
        Some(Ok(line)) => line,
        _ => return,
    };

    let target = request_line.split_whitespace().nth(1).unwrap_or("/");
    let path = target.split('?').next().unwrap_or("/");

    let (status, body, content_type) = match load(path) {
        Some((body, content_type)) => ("200 OK", body, content_type),
        None => ("404 NOT FOUND", b"not found".to_vec(), "text/plain"),
    };

    let header = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\n\r\n",
        body.len()
    );
    if stream
        .write_all(header.as_bytes())
        .and_then(|_| stream.write_all(&body))
        .is_err()
    {
        eprintln!("failed to write response for {path}");
    }
}

/// Resolve a request path inside dist/, falling back to index.html for
/// anything that is not a plain file.
fn load(path: &str) -> Option<(Vec<u8>, &'static str)> {
    if path.contains("..") {
        return None;
    }

    let mut file = PathBuf::from(DIST);
    file.push(path.trim_start_matches('/'));
    if !file.is_file() {
        file = Path::new(DIST).join("index.html");
    }

    let body = fs::read(&file).ok()?;
    Some((body, content_type(&file)))
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}
