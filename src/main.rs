//! Scorecard HTTP server and one-shot evaluator entrypoint.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use scorecard::benchmark::BenchmarkCache;
use scorecard::config::Config;
use scorecard::evaluation::{Evaluation, Evaluator};
use scorecard::gateway::{HandlerState, create_router_with_state, handler::no_overlap_message};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    if let Some(position) = args.iter().position(|arg| arg == "--evaluate") {
        let submission = args
            .get(position + 1)
            .map(PathBuf::from)
            .context("--evaluate requires a submission path")?;
        std::process::exit(run_evaluate(&config, submission).await?);
    }

    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        benchmark = %config.benchmark_path.display(),
        "Scorecard starting"
    );

    let benchmarks = BenchmarkCache::global();
    let benchmark = {
        let benchmarks = benchmarks.clone();
        let path = config.benchmark_path.clone();
        let columns = config.columns.clone();
        tokio::task::spawn_blocking(move || benchmarks.get_or_load(&path, &columns)).await?
    }
    .map_err(|e| anyhow::anyhow!("failed to load benchmark: {}", e))?;

    tracing::info!(
        rows = benchmark.len(),
        digest = %benchmark.digest(),
        "Benchmark ready"
    );

    let state = HandlerState::new(benchmarks, &config);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Scorecard shutdown complete");
    Ok(())
}

/// Scores one submission file and prints the report. Returns the exit code.
async fn run_evaluate(config: &Config, submission: PathBuf) -> anyhow::Result<i32> {
    let path = config.benchmark_path.clone();
    let columns = config.columns.clone();
    let message = no_overlap_message(&columns.identifier);

    let outcome = tokio::task::spawn_blocking(move || {
        let benchmark = BenchmarkCache::global()
            .get_or_load(&path, &columns)
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        Evaluator::new(benchmark, columns)
            .evaluate_path(&submission)
            .map_err(anyhow::Error::from)
    })
    .await?;

    match outcome {
        Ok(Evaluation::Scored(report)) => {
            print!("{}", report);
            Ok(0)
        }
        Ok(Evaluation::NoOverlap { join }) => {
            println!("{}", message);
            println!(
                "Submission rows: {}, benchmark samples: {}",
                join.submission_rows, join.benchmark_rows
            );
            Ok(0)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(1)
        }
    }
}

async fn run_health_check() -> i32 {
    let port = std::env::var("SCORECARD_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
