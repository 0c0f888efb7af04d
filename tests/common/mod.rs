//! A throwaway HTTP/1.1 server on 127.0.0.1 for tests. It answers with
//! canned responses, one connection per request, and hands back what it
//! received.
#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub const SAY_HI_REPLY: &str = r#"{"choices":[{"message":{"content":"Hi there!"}}]}"#;

pub struct Captured {
    pub head: String,
    pub body: serde_json::Value,
}

/// Serves `responses` in order, one per accepted connection.
pub async fn serve(responses: Vec<(&'static str, String)>) -> (String, JoinHandle<Vec<Captured>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut captured = Vec::new();
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            captured.push(read_request(&mut socket).await);

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
        captured
    });

    (format!("http://{}", addr), handle)
}

pub async fn read_request(socket: &mut TcpStream) -> Captured {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            let body_len = content_length(&head);
            if buf.len() >= end + 4 + body_len {
                let body = serde_json::from_slice(&buf[end + 4..end + 4 + body_len])
                    .unwrap_or(serde_json::Value::Null);
                return Captured { head, body };
            }
        }
    }
    Captured {
        head: String::from_utf8_lossy(&buf).to_string(),
        body: serde_json::Value::Null,
    }
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}
