//! Lifecycle tests for the graceful server.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::routing::get;
use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use scaffold::config::{load_config, ServiceConfig};
use scaffold::logger;
use scaffold::server::{Server, Shutdown};

fn test_logger() -> scaffold::Logger {
    logger::build("production", &[]).unwrap()
}

fn test_app() -> Router {
    Router::new().route("/", get(|| async { "200 (OK)" }))
}

#[tokio::test]
async fn closers_run_in_supplied_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let shutdown = Shutdown::new();
    let wait = shutdown.wait();

    let mut server = Server::new(
        "127.0.0.1:0".to_string(),
        Duration::from_secs(1),
        Duration::from_secs(5),
        test_logger(),
    );
    for i in 1..=3 {
        let order = order.clone();
        server.add_closer(move || order.lock().unwrap().push(i));
    }

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.trigger();
    });

    server.run(test_app(), wait).await;

    assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn panicking_closer_does_not_block_later_closers() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let shutdown = Shutdown::new();
    let wait = shutdown.wait();

    let mut server = Server::new(
        "127.0.0.1:0".to_string(),
        Duration::from_secs(1),
        Duration::from_secs(5),
        test_logger(),
    );
    {
        let order = order.clone();
        server.add_closer(move || {
            order.lock().unwrap().push("first");
            panic!("closer failure");
        });
    }
    {
        let order = order.clone();
        server.add_closer(move || order.lock().unwrap().push("second"));
    }

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.trigger();
    });

    server.run(test_app(), wait).await;

    assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
}

#[tokio::test]
async fn config_scenario_binds_and_shuts_down_cleanly() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"{
            "listen_host": "localhost",
            "listen_port": 10001,
            "metrics_port": 8081,
            "http_read_timeout_sec": 5,
            "graceful_shutdown_timeout_sec": 5,
            "paths_to_logs": [],
            "log_env": "production"
        }"#,
    )
    .unwrap();

    let config: ServiceConfig = load_config(file.path()).unwrap();
    assert_eq!(config.listen_addr(), "localhost:10001");

    let log = logger::build(&config.log_env, &config.paths_to_logs).unwrap();
    let shutdown = Shutdown::new();
    let wait = shutdown.wait();
    let server = Server::new(
        config.listen_addr(),
        config.read_timeout(),
        config.shutdown_timeout(),
        log,
    );
    let running = tokio::spawn(server.run(test_app(), wait));

    // Give the accept task time to bind.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut stream = TcpStream::connect("localhost:10001").await.unwrap();
    stream
        .write_all(b"GET / HTTP/1.0\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let response = String::from_utf8_lossy(&raw);
    assert!(response.starts_with("HTTP/1."), "got: {response}");
    assert!(response.contains(" 200 "), "got: {response}");
    assert!(response.contains("200 (OK)"));

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), running)
        .await
        .expect("server did not terminate within the shutdown timeout")
        .unwrap();
}

#[tokio::test]
async fn slow_drain_still_terminates_after_timeout() {
    let app = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "done"
        }),
    );

    let shutdown = Shutdown::new();
    let wait = shutdown.wait();
    let server = Server::new(
        "127.0.0.1:18347".to_string(),
        Duration::from_secs(10),
        Duration::from_millis(200),
        test_logger(),
    );
    let running = tokio::spawn(server.run(app, wait));
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Hold a request in flight past the shutdown timeout.
    let mut stream = TcpStream::connect("127.0.0.1:18347").await.unwrap();
    stream
        .write_all(b"GET /slow HTTP/1.0\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let started = Instant::now();
    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(2), running)
        .await
        .expect("server did not terminate after the drain timeout")
        .unwrap();
    assert!(started.elapsed() < Duration::from_secs(2));
}
