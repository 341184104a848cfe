use super::*;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::StatusCode;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::routes::status::StatusResponse;

/// Serve the full router on an ephemeral port and return its address and state.
pub(crate) async fn spawn_server(config: Config) -> (SocketAddr, AppState) {
    let state = AppState::new(config);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (addr, state)
}

pub(crate) fn fast_config() -> Config {
    Config { stream_interval: Duration::from_millis(20), seed: Some(1), ..Config::default() }
}

pub(crate) async fn http_get(addr: SocketAddr, path: &str) -> reqwest::Response {
    reqwest::get(format!("http://{addr}{path}")).await.unwrap()
}

pub(crate) async fn fetch_status(addr: SocketAddr) -> StatusResponse {
    let resp = http_get(addr, "/api/status").await;
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json::<StatusResponse>().await.unwrap()
}

fn temp_dashboard_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("eeg-monitor-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<!DOCTYPE html><title>EEG Monitor</title>").unwrap();
    std::fs::write(dir.join("style.css"), "body{}").unwrap();
    dir
}

// =============================================================================
// HEALTH AND STATUS
// =============================================================================

#[tokio::test]
async fn healthz_returns_ok() {
    let (addr, _) = spawn_server(fast_config()).await;
    let resp = http_get(addr, "/healthz").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn status_reports_running_with_no_sessions() {
    let (addr, _) = spawn_server(fast_config()).await;
    let resp = fetch_status(addr).await;
    assert_eq!(resp.status, "running");
    assert_eq!(resp.sessions, 0);
    assert!(resp.timestamp.ends_with('Z'));
}

// =============================================================================
// STATIC DASHBOARD
// =============================================================================

#[tokio::test]
async fn dashboard_files_are_served_with_index_fallback() {
    let dir = temp_dashboard_dir("static");
    let (addr, _) = spawn_server(Config { dashboard_dir: dir.clone(), ..fast_config() }).await;

    let resp = http_get(addr, "/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("EEG Monitor"));

    let resp = http_get(addr, "/style.css").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "body{}");

    let resp = http_get(addr, "/some/client/route").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("EEG Monitor"));

    let _ = std::fs::remove_dir_all(dir);
}
