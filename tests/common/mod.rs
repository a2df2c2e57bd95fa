//! Shared helpers for integration tests: boot the real router on an
//! ephemeral port, backed by a file in a scratch directory.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use sensor_hub::api::{self, AppState};
use sensor_hub::store::Store;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub struct TestHub {
    pub base_url: String,
    pub data_file: PathBuf,
    // keeps the scratch directory alive for the test
    _dir: Option<TempDir>,
}

impl TestHub {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// start a hub on a fresh, empty backing file
pub async fn start_hub() -> TestHub {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("sensordata.json");
    let mut hub = start_hub_on(&data_file).await;
    hub._dir = Some(dir);
    hub
}

/// start a hub on an existing path; the caller owns the directory
pub async fn start_hub_on(data_file: &Path) -> TestHub {
    let app = api::router(AppState::new(Store::new(data_file), false));
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    TestHub {
        base_url: format!("http://{}", addr),
        data_file: data_file.to_path_buf(),
        _dir: None,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
