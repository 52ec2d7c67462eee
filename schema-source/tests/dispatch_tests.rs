#![allow(clippy::unwrap_used)]
//! Integration tests for `schema_source::dispatch` and `resolve`.
//!
//! These tests cover:
//! - URL source: 200 delivers the body, 404 reports without a cause line
//! - URL source: connection failure reports with a cause line
//! - URL source: a body cut short reports with a cause line
//! - File source: chunked read, missing path
//! - Stdin strategy: chunks joined after EOF
//! - Exactly one of {continuation, reporter} per dispatch

use std::cell::RefCell;
use std::fs;

use schema_source::strategy::stdin::read_from;
use schema_source::{
    RecordingReporter, SourceConfig, SourceDescriptor, SourceError, dispatch, resolve,
};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_test::io::Builder;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of one dispatch: bodies delivered and messages reported.
struct Outcome {
    bodies: Vec<String>,
    reports: Vec<String>,
    result: Result<(), SourceError>,
}

async fn run(source: &SourceDescriptor, config: &SourceConfig) -> Outcome {
    let reporter = RecordingReporter::new();
    let bodies = RefCell::new(Vec::new());
    let result = dispatch(source, config, &reporter, |body| {
        bodies.borrow_mut().push(body);
    })
    .await;
    Outcome {
        bodies: bodies.into_inner(),
        reports: reporter.messages(),
        result,
    }
}

fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/data.json")
}

/// A server whose single response ends 97 bytes short of its content-length.
async fn truncated_body_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 100\r\n\r\nabc")
            .await
            .unwrap();
    });
    format!("http://{addr}/x")
}

// ─────────────────────────────────────────────────────────────────────────────
// URL
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_url_200_delivers_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/sample.json")
        .with_status(200)
        .with_body(r#"{"a":1}"#)
        .expect(1)
        .create_async()
        .await;

    let source = SourceDescriptor::url(format!("{}/sample.json", server.url())).unwrap();
    let outcome = run(&source, &SourceConfig::default()).await;

    assert!(outcome.result.is_ok());
    assert_eq!(outcome.bodies, vec![r#"{"a":1}"#.to_owned()]);
    assert!(outcome.reports.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_url_404_reports_without_cause() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/nope.json")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let url = format!("{}/nope.json", server.url());
    let source = SourceDescriptor::url(url.clone()).unwrap();
    let outcome = run(&source, &SourceConfig::default()).await;

    assert!(outcome.bodies.is_empty());
    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(
        outcome.reports[0],
        format!("There was an error loading the requested resource\n>>> {url}")
    );
    assert!(matches!(
        outcome.result,
        Err(SourceError::Status { status: 404, .. })
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_url_transport_failure_reports_with_cause() {
    let url = refused_url();
    let source = SourceDescriptor::url(url.clone()).unwrap();
    let outcome = run(&source, &SourceConfig::default()).await;

    assert!(outcome.bodies.is_empty());
    assert_eq!(outcome.reports.len(), 1);
    let lines: Vec<&str> = outcome.reports[0].lines().collect();
    assert!(lines.len() >= 3, "got: {:?}", outcome.reports[0]);
    assert_eq!(lines[0], "There was an error loading the requested resource");
    assert_eq!(lines[1], format!(">>> {url}"));
    assert!(matches!(outcome.result, Err(SourceError::Request { .. })));
}

#[tokio::test]
async fn test_url_truncated_body_reports_with_cause() {
    let url = truncated_body_url().await;
    let source = SourceDescriptor::url(url.clone()).unwrap();
    let outcome = run(&source, &SourceConfig::default()).await;

    assert!(outcome.bodies.is_empty());
    assert_eq!(outcome.reports.len(), 1);
    let lines: Vec<&str> = outcome.reports[0].lines().collect();
    assert_eq!(lines.len(), 3, "got: {:?}", outcome.reports[0]);
    assert_eq!(lines[1], format!(">>> {url}"));
    assert!(matches!(outcome.result, Err(SourceError::Body { .. })));
}

// ─────────────────────────────────────────────────────────────────────────────
// File
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_file_read_in_chunks_delivered_once() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("hello.json");
    fs::write(&path, "hello").unwrap();

    let mut config = SourceConfig::default();
    config.chunk_size = 2;
    let source = SourceDescriptor::file(&path).unwrap();
    let outcome = run(&source, &config).await;

    assert!(outcome.result.is_ok());
    assert_eq!(outcome.bodies, vec!["hello".to_owned()]);
    assert!(outcome.reports.is_empty());
}

#[tokio::test]
async fn test_file_missing_reports_path_and_stops() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("absent.json");

    let source = SourceDescriptor::file(&path).unwrap();
    let outcome = run(&source, &SourceConfig::default()).await;

    assert!(outcome.bodies.is_empty());
    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(
        outcome.reports[0],
        format!(
            "File {} does not exist. Please specify a valid path.",
            path.display()
        )
    );
    assert!(matches!(
        outcome.result,
        Err(SourceError::PathMissing { .. })
    ));
}

#[tokio::test]
async fn test_resolve_matches_dispatch_for_files() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("doc.json");
    fs::write(&path, r#"[{"id": 1}, {"id": 2}]"#).unwrap();

    let source = SourceDescriptor::file(&path).unwrap();
    let body = resolve(&source, &SourceConfig::default()).await.unwrap();
    assert_eq!(body, r#"[{"id": 1}, {"id": 2}]"#);
}

#[tokio::test]
async fn test_descriptor_from_json_resolves() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("doc.json");
    fs::write(&path, "{}").unwrap();

    let raw = serde_json::json!({"type": "file", "path": path}).to_string();
    let source: SourceDescriptor = serde_json::from_str(&raw).unwrap();
    let body = resolve(&source, &SourceConfig::default()).await.unwrap();
    assert_eq!(body, "{}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Stdin
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_stdin_chunks_joined() {
    let reader = Builder::new().read(b"ab").read(b"c").build();
    let body = read_from(reader, &SourceConfig::default()).await.unwrap();
    assert_eq!(body, "abc");
}

// ─────────────────────────────────────────────────────────────────────────────
// Exactly-once
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_every_dispatch_has_exactly_one_outcome() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/ok")
        .with_status(200)
        .with_body("1")
        .create_async()
        .await;
    let _gone = server
        .mock("GET", "/gone")
        .with_status(410)
        .create_async()
        .await;

    let tmp = TempDir::new().unwrap();
    let present = tmp.path().join("present.json");
    fs::write(&present, "2").unwrap();

    let sources = vec![
        SourceDescriptor::url(format!("{}/ok", server.url())).unwrap(),
        SourceDescriptor::url(format!("{}/gone", server.url())).unwrap(),
        SourceDescriptor::url(refused_url()).unwrap(),
        SourceDescriptor::url(truncated_body_url().await).unwrap(),
        SourceDescriptor::file(&present).unwrap(),
        SourceDescriptor::file(tmp.path().join("absent.json")).unwrap(),
    ];

    for source in &sources {
        let outcome = run(source, &SourceConfig::default()).await;
        assert_eq!(
            outcome.bodies.len() + outcome.reports.len(),
            1,
            "source {source}: bodies={:?} reports={:?}",
            outcome.bodies,
            outcome.reports
        );
        assert_eq!(outcome.result.is_ok(), outcome.bodies.len() == 1);
    }
}
