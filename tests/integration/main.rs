//! Integration tests for the events server.
//!
//! Each test binds the real router to a random local port, points it at a
//! wiremock upstream, and talks to it over HTTP with reqwest.
//!
//! The live Gamma API test is ignored by default.
//! Run with: cargo test --test integration -- --ignored

use std::net::SocketAddr;

use pretty_assertions::assert_eq;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use polymarket_events::api::{create_router, AppState};
use polymarket_events::config::Config;
use polymarket_events::market::{Event, GammaClient, Market, Tag};

/// Start the server against the given upstream and return its address.
async fn spawn_server(upstream: &str) -> SocketAddr {
    let config = Config {
        gamma_api_url: upstream.to_string(),
        ..Config::default()
    };
    let state = AppState::new(&config).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });

    addr
}

fn sample_events() -> Vec<Event> {
    vec![
        Event {
            id: "903".to_string(),
            slug: "fed-decision-in-december".to_string(),
            title: "Fed decision in December?".to_string(),
            active: true,
            closed: false,
            tags: vec![
                Tag {
                    id: "100196".to_string(),
                    label: "Fed Rates".to_string(),
                    slug: "fed-rates".to_string(),
                },
                Tag {
                    id: "120".to_string(),
                    label: "Finance".to_string(),
                    slug: "finance".to_string(),
                },
            ],
            markets: vec![Market {
                id: "601697".to_string(),
                question: "Fed decreases interest rates by 25 bps after December 2025 meeting?"
                    .to_string(),
                clob_token_ids: r#"["8721", "9934"]"#.to_string(),
                outcomes: r#"["Yes", "No"]"#.to_string(),
                outcome_prices: r#"["0.815", "0.185"]"#.to_string(),
            }],
        },
        Event {
            id: "41".to_string(),
            slug: "empty-event".to_string(),
            title: "Event without markets".to_string(),
            active: true,
            closed: false,
            tags: vec![],
            markets: vec![],
        },
    ]
}

#[tokio::test]
async fn events_round_trip_through_server() {
    let upstream = MockServer::start().await;
    let expected = sample_events();

    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("active", "true"))
        .and(query_param("closed", "false"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&expected))
        .expect(1)
        .mount(&upstream)
        .await;

    let addr = spawn_server(&upstream.uri()).await;
    let response = reqwest::get(format!("http://{}/api/events?limit=2", addr))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );

    let events: Vec<Event> = response.json().await.unwrap();
    assert_eq!(events, expected);
}

#[tokio::test]
async fn each_request_makes_exactly_one_upstream_call() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(3)
        .mount(&upstream)
        .await;

    let addr = spawn_server(&upstream.uri()).await;
    let client = reqwest::Client::new();

    for _ in 0..3 {
        let response = client
            .get(format!("http://{}/api/events", addr))
            .send()
            .await
            .unwrap();
        assert_eq!(response.text().await.unwrap(), "[]");
    }
}

#[tokio::test]
async fn rejected_requests_never_reach_upstream() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&upstream)
        .await;

    let addr = spawn_server(&upstream.uri()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{}/api/events", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 405);
    assert_eq!(
        response.text().await.unwrap(),
        r#"{"error":"Method not allowed"}"#
    );

    let response = client
        .get(format!("http://{}/api/events?limit=-5", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response.text().await.unwrap(),
        r#"{"error":"Invalid limit parameter"}"#
    );
}

#[tokio::test]
async fn server_keeps_serving_after_upstream_failure() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .up_to_n_times(1)
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&upstream)
        .await;

    let addr = spawn_server(&upstream.uri()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{}/api/events", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(
        response.text().await.unwrap(),
        r#"{"error":"Failed to fetch events: API returned status 503: maintenance"}"#
    );

    let response = client
        .get(format!("http://{}/api/events", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.text().await.unwrap(), r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn unreachable_upstream_returns_500() {
    // Bind then drop to get a port nothing listens on.
    let dead = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_addr = dead.local_addr().unwrap();
    drop(dead);

    let addr = spawn_server(&format!("http://{}", dead_addr)).await;
    let response = reqwest::get(format!("http://{}/api/events", addr))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    let body = response.text().await.unwrap();
    assert!(body.starts_with(r#"{"error":"Failed to fetch events: failed to make request"#));
}

/// Test against the real Gamma API.
#[tokio::test]
#[ignore = "requires network access to gamma-api.polymarket.com"]
async fn test_fetch_live_events() {
    let client = GammaClient::new(polymarket_events::config::DEFAULT_GAMMA_API_URL).unwrap();

    let result = client
        .fetch_active_events(Some(&polymarket_events::market::FetchOptions::with_limit(5)))
        .await;
    assert!(result.is_ok(), "Failed to fetch events: {:?}", result.err());

    let events = result.unwrap();
    assert!(events.len() <= 5, "Limit should be honored");
    for event in &events {
        assert!(!event.closed, "Closed event returned: {}", event.slug);
    }

    println!("Fetched {} live events", events.len());
}
