//! HTTP boundary on an ephemeral port

mod common;

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use tokio::net::TcpListener;

use common::{FakeLauncher, fast_config, plain_listing};
use subspy::SubredditScraper;
use subspy::server::{self, AppState};

async fn spawn_server(launcher: FakeLauncher, scrape_timeout: Duration) -> String {
    let scraper =
        SubredditScraper::with_launcher(fast_config("https://www.reddit.com"), launcher).unwrap();
    let state = AppState::new(scraper, 1, scrape_timeout);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve_on(listener, state));
    format!("http://{addr}")
}

#[tokio::test]
async fn health_check_answers_plain_text() {
    let base = spawn_server(FakeLauncher::showing(""), Duration::from_secs(5)).await;

    let response = reqwest::get(format!("{base}/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "SubSpy Server is running :!");
}

#[tokio::test]
async fn missing_and_invalid_names_are_rejected() {
    let base = spawn_server(FakeLauncher::showing(""), Duration::from_secs(5)).await;

    let response = reqwest::get(format!("{base}/api/v1/scrape")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["param"], "subreddit");
    assert_eq!(body["errors"][0]["msg"], "subreddit is required");

    let response = reqwest::get(format!("{base}/api/v1/scrape?subreddit=no-dashes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["msg"], "invalid subreddit format");
}

#[tokio::test]
async fn malformed_query_gets_the_json_validation_body() {
    let launcher = FakeLauncher::showing(plain_listing(1));
    let stats = launcher.stats.clone();
    let base = spawn_server(launcher, Duration::from_secs(5)).await;

    let response = reqwest::get(format!("{base}/api/v1/scrape?subreddit=rust&subreddit=golang"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["param"], "subreddit");
    assert_eq!(body["errors"][0]["location"], "query");
    assert_eq!(body["errors"][0]["msg"], "invalid subreddit format");
    assert_eq!(stats.launched(), 0);
}

#[tokio::test]
async fn successful_scrape_returns_keyed_posts() {
    let base = spawn_server(FakeLauncher::showing(plain_listing(2)), Duration::from_secs(5)).await;

    let response = reqwest::get(format!("{base}/api/v1/scrape?subreddit=%20rust%20"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let posts = body["rust"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["title"], "Post 0");
    assert_eq!(posts[1]["upvotes"], 10);
    assert_eq!(posts[1]["url"], "");
    assert_eq!(posts[1]["comments"], Value::Array(Vec::new()));
}

#[tokio::test]
async fn second_request_while_busy_gets_429() {
    let launcher =
        FakeLauncher::showing(plain_listing(1)).with_navigation_delay(Duration::from_millis(800));
    let base = spawn_server(launcher, Duration::from_secs(10)).await;

    let first = tokio::spawn(reqwest::get(format!("{base}/api/v1/scrape?subreddit=first")));
    tokio::time::sleep(Duration::from_millis(200)).await;

    let second = reqwest::get(format!("{base}/api/v1/scrape?subreddit=second"))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = second.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("Too many concurrent requests"));

    let first = first.await.unwrap().unwrap();
    assert_eq!(first.status(), StatusCode::OK);
}

#[tokio::test]
async fn slow_scrape_times_out_with_503_and_releases_session() {
    let launcher =
        FakeLauncher::showing(plain_listing(1)).with_navigation_delay(Duration::from_secs(30));
    let stats = launcher.stats.clone();
    let base = spawn_server(launcher, Duration::from_millis(300)).await;

    let response = reqwest::get(format!("{base}/api/v1/scrape?subreddit=slow"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    // Abort is processed asynchronously by the runtime
    for _ in 0..50 {
        if stats.dropped() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(stats.launched(), 1);
    assert_eq!(stats.dropped(), 1);
    assert_eq!(stats.shut_down(), 0);

    // The slot is free again once the aborted scrape is gone
    let response = reqwest::get(format!("{base}/api/v1/scrape?subreddit=again"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
