//! End-to-end HTTP tests.

mod common;

use common::{SCENARIO_BENCHMARK, SCENARIO_SUBMISSION, spawn_test_server, write_csv};
use scorecard::constants::SCORECARD_STATUS_HEADER;

async fn post_submission(url: &str, body: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/v1/evaluate", url))
        .header("content-type", "text/csv")
        .body(body.to_string())
        .send()
        .await
        .expect("Request should be sent")
}

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let benchmark = write_csv(SCENARIO_BENCHMARK);
    let server = spawn_test_server(benchmark.path())
        .await
        .expect("Server should start");

    let response = reqwest::get(format!("{}/healthz", server.url()))
        .await
        .expect("Health check should succeed");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ready_after_first_evaluation() {
    let benchmark = write_csv(SCENARIO_BENCHMARK);
    let server = spawn_test_server(benchmark.path())
        .await
        .expect("Server should start");

    let ready = reqwest::get(format!("{}/ready", server.url()))
        .await
        .unwrap();
    assert_eq!(ready.status().as_u16(), 503);

    let response = post_submission(&server.url(), SCENARIO_SUBMISSION).await;
    assert!(response.status().is_success());

    let ready = reqwest::get(format!("{}/ready", server.url()))
        .await
        .unwrap();
    assert!(ready.status().is_success());
}

#[tokio::test]
async fn test_evaluate_reference_scenario_over_http() {
    let benchmark = write_csv(SCENARIO_BENCHMARK);
    let server = spawn_test_server(benchmark.path())
        .await
        .expect("Server should start");

    let response = post_submission(&server.url(), SCENARIO_SUBMISSION).await;

    assert!(response.status().is_success());
    assert_eq!(
        response.headers().get(SCORECARD_STATUS_HEADER).unwrap(),
        "scored"
    );

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["n_matched"], 3);
    assert_eq!(body["confusion_matrix"]["value"]["matrix"][0][1], 1);
    assert_eq!(body["confusion_matrix"]["value"]["matrix"][1][1], 2);
    assert_eq!(body["balanced_accuracy"]["value"], 0.5);
    assert_eq!(body["join"]["unmatched_submission_rows"], 1);
}

#[tokio::test]
async fn test_concurrent_submissions_share_one_benchmark_load() {
    let benchmark = write_csv(SCENARIO_BENCHMARK);
    let server = spawn_test_server(benchmark.path())
        .await
        .expect("Server should start");
    let url = server.url();

    let requests = (0..8).map(|_| {
        let url = url.clone();
        tokio::spawn(async move { post_submission(&url, SCENARIO_SUBMISSION).await.status() })
    });

    for request in requests.collect::<Vec<_>>() {
        assert!(request.await.unwrap().is_success());
    }

    assert_eq!(server.benchmarks.load_count(), 1);
}

#[tokio::test]
async fn test_coercion_failure_over_http() {
    let benchmark = write_csv(SCENARIO_BENCHMARK);
    let server = spawn_test_server(benchmark.path())
        .await
        .expect("Server should start");

    let response = post_submission(&server.url(), "slide_id,pred\nA,0.7\n").await;

    assert_eq!(response.status().as_u16(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["kind"], "coercion_error");
    assert!(body["error"].as_str().unwrap().contains("0.7"));
}
