//! Shared fixtures and a throwaway server harness for integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tempfile::NamedTempFile;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use scorecard::benchmark::BenchmarkCache;
use scorecard::config::Config;
use scorecard::gateway::{HandlerState, create_router_with_state};

pub const SCENARIO_BENCHMARK: &str = "slide_id,mIDH\nA,1\nB,0\nC,1\n";
pub const SCENARIO_SUBMISSION: &str = "slide_id,pred\nA,1\nB,1\nC,1\nD,0\n";

pub fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub benchmarks: Arc<BenchmarkCache>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serves the gateway on an ephemeral port with a private benchmark cache.
pub async fn spawn_test_server(benchmark_path: &Path) -> anyhow::Result<TestServer> {
    let config = Config {
        benchmark_path: benchmark_path.to_path_buf(),
        ..Config::default()
    };
    let benchmarks = Arc::new(BenchmarkCache::new());
    let state = HandlerState::new(benchmarks.clone(), &config);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer {
        addr,
        benchmarks,
        handle,
    })
}
