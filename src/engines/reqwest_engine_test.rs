// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::{FetchError, PageFetcher};
use crate::utils::retry_policy::RetryPolicy;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_engine(max_retries: u32) -> ReqwestEngine {
    ReqwestEngine::new(
        "lyricrawl-test",
        4,
        RetryPolicy::fixed(Duration::from_millis(10), max_retries),
    )
    .unwrap()
}

/// 前 `resets` 个连接在读取请求后直接 RST，之后正常响应
async fn start_resetting_server(resets: usize, body: &'static str) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let connections = Arc::new(AtomicUsize::new(0));
    let seen = connections.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let n = seen.fetch_add(1, Ordering::SeqCst);
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;

            if n < resets {
                #[allow(deprecated)]
                let _ = stream.set_linger(Some(Duration::ZERO));
                drop(stream);
            } else {
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        }
    });

    (format!("http://{}", addr), connections)
}

#[tokio::test]
async fn test_fetch_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lyric/1/Dominion"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<pre id=\"lyric-body-text\">Dominion reigns</pre>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let engine = test_engine(3);
    let body = engine
        .fetch(&format!("{}/lyric/1/Dominion", server.uri()))
        .await
        .unwrap();

    assert!(body.contains("Dominion reigns"));
}

#[tokio::test]
async fn test_fetch_error_status_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/album/missing"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let engine = test_engine(3);
    let result = engine
        .fetch(&format!("{}/album/missing", server.uri()))
        .await;

    match result {
        Err(FetchError::HttpStatus { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_connection_refused_is_not_retried() {
    // Bind and drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let engine = test_engine(3);
    let result = engine.fetch(&format!("http://{}/artist/x", addr)).await;

    match result {
        Err(e @ FetchError::Request(_)) => assert!(!e.is_transient()),
        other => panic!("expected Request error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_retries_connection_reset() {
    let (base, connections) = start_resetting_server(2, "Dominion reigns").await;

    let engine = test_engine(5);
    let body = engine.fetch(&format!("{}/lyric/1", base)).await.unwrap();

    assert_eq!(body, "Dominion reigns");
    assert!(connections.load(Ordering::SeqCst) >= 3);
}

#[tokio::test]
async fn test_fetch_gives_up_on_persistent_reset() {
    let (base, _connections) = start_resetting_server(usize::MAX, "").await;

    let engine = test_engine(2);
    let result = engine.fetch(&format!("{}/lyric/1", base)).await;

    match result {
        Err(FetchError::RetryExhausted { attempts, .. }) => assert_eq!(attempts, 3),
        other => panic!("expected RetryExhausted, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_rejects_invalid_url() {
    let engine = test_engine(1);
    let result = engine.fetch("not a url").await;

    assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
}

#[test]
fn test_engine_name() {
    assert_eq!(test_engine(0).name(), "reqwest");
}
