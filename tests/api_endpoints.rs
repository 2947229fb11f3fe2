//! Control endpoint tests for the gateway.

use std::net::SocketAddr;

use api_gateway::registry::ServerInfo;
use api_gateway::stats::StatsSnapshot;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn servers_endpoint_lists_the_registry() {
    let b1_addr: SocketAddr = "127.0.0.1:29101".parse().unwrap();
    let b2_addr: SocketAddr = "127.0.0.1:29102".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:29103".parse().unwrap();

    let config = common::test_config(proxy_addr, &[("b1", b1_addr), ("b2", b2_addr)]);
    let (_context, shutdown) = common::start_gateway(proxy_addr, config).await;

    let client = common::http_client();
    let res = client
        .get(format!("http://{}/api/servers", proxy_addr))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), 200);
    let servers: Vec<ServerInfo> = res.json().await.unwrap();
    assert_eq!(servers.len(), 2);
    assert_eq!(servers[0].name, "b1");
    assert_eq!(servers[0].url, format!("http://{}", b1_addr));
    assert!(servers[0].healthy);
    assert_eq!(servers[1].name, "b2");

    shutdown.trigger();
}

#[tokio::test]
async fn invalid_stats_period_is_a_400() {
    let proxy_addr: SocketAddr = "127.0.0.1:29113".parse().unwrap();

    let config = common::test_config(proxy_addr, &[]);
    let (_context, shutdown) = common::start_gateway(proxy_addr, config).await;

    let client = common::http_client();
    let res = client
        .get(format!("http://{}/api/stats/foo", proxy_addr))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": "Invalid period. Use 1m, 5m, or 1h."}));

    shutdown.trigger();
}

#[tokio::test]
async fn stats_without_traffic_are_zeroed() {
    let proxy_addr: SocketAddr = "127.0.0.1:29123".parse().unwrap();

    let config = common::test_config(proxy_addr, &[]);
    let (_context, shutdown) = common::start_gateway(proxy_addr, config).await;

    let client = common::http_client();
    for period in ["1m", "5m", "1h"] {
        let res = client
            .get(format!("http://{}/api/stats/{}", proxy_addr, period))
            .send()
            .await
            .expect("Gateway unreachable");

        assert_eq!(res.status(), 200);
        let snapshot: StatsSnapshot = res.json().await.unwrap();
        assert_eq!(snapshot, StatsSnapshot::default());
    }

    shutdown.trigger();
}

#[tokio::test]
async fn proxying_with_an_empty_registry_is_a_503() {
    let proxy_addr: SocketAddr = "127.0.0.1:29133".parse().unwrap();

    let config = common::test_config(proxy_addr, &[]);
    let (_context, shutdown) = common::start_gateway(proxy_addr, config).await;

    let client = common::http_client();
    let res = client
        .get(format!("http://{}/api/data", proxy_addr))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), 503);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": "No servers available"}));

    shutdown.trigger();
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let proxy_addr: SocketAddr = "127.0.0.1:29143".parse().unwrap();

    let config = common::test_config(proxy_addr, &[]);
    let (_context, shutdown) = common::start_gateway(proxy_addr, config).await;

    let client = common::http_client();
    let res = client
        .get(format!("http://{}/api/servers", proxy_addr))
        .send()
        .await
        .expect("Gateway unreachable");

    let id = res.headers().get("x-request-id").unwrap();
    assert!(!id.to_str().unwrap().is_empty());

    shutdown.trigger();
}
