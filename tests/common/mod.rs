#![allow(dead_code)]

use image::{Rgb, RgbImage};
use ollama_describe::{GenerateRequest, InferenceClient, InferenceError};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// What [`ScriptedClient`] answers for the next request.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    BadRequest,
    Status(u16, String),
}

/// In-memory inference server answering from a script, in request order.
/// Once the script runs out every request gets "ok".
#[derive(Debug, Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<GenerateRequest>>,
    models: Vec<String>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    pub fn with_models(mut self, models: &[&str]) -> Self {
        self.models = models.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl InferenceClient for ScriptedClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, InferenceError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            None => Ok("ok".to_string()),
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::BadRequest) => Err(InferenceError::NotVisionCapable {
                model: request.model.clone(),
            }),
            Some(Reply::Status(status, body)) => Err(InferenceError::Http { status, body }),
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, InferenceError> {
        Ok(self.models.clone())
    }
}

/// Minimal HTTP/1.1 server answering one canned response per connection.
pub struct StubServer {
    pub endpoint: String,
    bodies: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Serve `responses` (status, JSON body) in order, one per connection.
    pub async fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let seen = bodies.clone();

        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let request_body = read_request_body(&mut socket).await;
                seen.lock().unwrap().push(request_body);

                let reply = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { endpoint, bodies }
    }

    /// Bodies of the requests received so far.
    pub fn request_bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

async fn read_request_body(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let body_start = end + 4;
            if buf.len() >= body_start + content_length {
                return String::from_utf8_lossy(&buf[body_start..body_start + content_length])
                    .into_owned();
            }
        }
    }
    String::new()
}

/// An endpoint nothing listens on.
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// reqwest client that ignores proxy settings from the environment.
pub fn direct_http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Write a solid-colour image; the format follows the extension.
pub fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([200, 30, 30]))
        .save(&path)
        .unwrap();
    path
}

/// Write arbitrary bytes, e.g. a corrupt "image" or a text file.
pub fn write_bytes(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// One parsed result block of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub index: usize,
    pub filename: String,
    pub text: String,
}

/// Split a report into its header lines and result blocks.
pub fn parse_report(report: &str) -> (Vec<String>, Vec<Block>) {
    let rule = "-".repeat(80);
    let separator = format!("{rule}\n\n");
    let mut sections = report.split(separator.as_str());
    let header = sections
        .next()
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect();

    let blocks = sections
        .filter(|s| !s.is_empty())
        .map(|section| {
            let (title, text) = section.split_once('\n').unwrap();
            let title = title.strip_prefix("Image ").unwrap();
            let (index, filename) = title.split_once(": ").unwrap();
            Block {
                index: index.parse().unwrap(),
                filename: filename.to_string(),
                text: text.trim_end_matches('\n').to_string(),
            }
        })
        .collect();

    (header, blocks)
}

/// Every file currently in `dir`.
pub fn files_in(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}
