//! Runs the `duszek` binary in single-query mode against a local endpoint.

use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::process::Command;

mod common;
use common::{serve, SAY_HI_REPLY};

/// Runs the binary with no inherited API key and no `.env` in reach.
async fn run_duszek(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_duszek"))
        .args(["--no-color", "--model", "test-model"])
        .args(args)
        .env_remove("GROQ_API_KEY")
        .current_dir(std::env::temp_dir())
        .stdin(Stdio::null())
        .output()
        .await
        .expect("binary should run")
}

#[tokio::test]
async fn missing_key_exits_with_one_before_any_request() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let output = run_duszek(&["--api", &base, "hello"]).await;
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GROQ_API_KEY"), "{stderr}");
    assert!(!stdout.contains("Configuration loaded"), "{stdout}");

    // the process has exited, so any connection it made would be queued
    let accepted = tokio::time::timeout(Duration::from_millis(200), listener.accept()).await;
    assert!(accepted.is_err(), "no connection should have been made");
}

#[tokio::test]
async fn single_query_prints_the_reply_and_exits_zero() {
    let (base, server) = serve(vec![("200 OK", SAY_HI_REPLY.to_string())]).await;

    let output = run_duszek(&["--api", &base, "--key", "test-key", "Say", "hi"]).await;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(0), "{stdout}");
    assert!(stdout.contains("Configuration loaded"), "{stdout}");
    assert!(stdout.contains("Hi there!"), "{stdout}");

    let captured = server.await.unwrap();
    let messages = captured[0].body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1]["content"], "Say hi");
}

#[tokio::test]
async fn single_query_failure_exits_one() {
    let (base, _server) = serve(vec![(
        "500 Internal Server Error",
        r#"{"error":{"message":"upstream exploded"}}"#.to_string(),
    )])
    .await;

    let output = run_duszek(&["--api", &base, "--key", "test-key", "hello"]).await;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(1), "{stdout}");
    assert!(stdout.contains("500"), "{stdout}");
    assert!(stdout.contains("upstream exploded"), "{stdout}");
}
