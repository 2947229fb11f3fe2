//! Failure injection tests for the gateway.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use api_gateway::registry::ServerInfo;
use serde_json::Value;

mod common;

#[tokio::test]
async fn unreachable_backend_synthesizes_a_500() {
    // Nothing listens on the backend port.
    let backend_addr: SocketAddr = "127.0.0.1:29201".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:29202".parse().unwrap();

    let config = common::test_config(proxy_addr, &[("b1", backend_addr)]);
    let (context, shutdown) = common::start_gateway(proxy_addr, config).await;

    let client = common::http_client();
    let res = client
        .get(format!("http://{}/api/data", proxy_addr))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Internal Server Error");
    assert!(!body["details"].as_str().unwrap().is_empty());

    // The failed attempt is logged with status 500 and an error...
    let entry = context.stats.last().unwrap();
    assert_eq!(entry.status, 500);
    assert_eq!(entry.target, "b1");
    assert!(entry.error.is_some());

    // ...but the completed-request counter stays untouched.
    assert_eq!(context.registry.get("b1").unwrap().completed(), 0);

    // The entry shows up in windowed stats.
    let snapshot = context.stats.compute(Duration::from_secs(60));
    assert_eq!(snapshot.hosts.get("b1"), Some(&1));
    assert_eq!(snapshot.endpoints.get("/api/data"), Some(&1));

    shutdown.trigger();
}

#[tokio::test]
async fn unprefixed_path_produces_an_invalid_target() {
    let backend_addr: SocketAddr = "127.0.0.1:29211".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:29212".parse().unwrap();

    common::start_mock_backend(backend_addr, "alive").await;

    let config = common::test_config(proxy_addr, &[("b1", backend_addr)]);
    let (_context, shutdown) = common::start_gateway(proxy_addr, config).await;

    // Without an "api" substring the outbound path keeps no separator, so
    // the joined target URL cannot be parsed and the request fails even
    // though the backend itself is alive.
    let client = common::http_client();
    let res = client
        .get(format!("http://{}/data", proxy_addr))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Internal Server Error");

    shutdown.trigger();
}

#[tokio::test]
async fn stalled_response_body_hits_the_forwarding_deadline() {
    let backend_addr: SocketAddr = "127.0.0.1:29241".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:29242".parse().unwrap();

    // The backend answers with headers and 7 of 100 promised body bytes,
    // then stalls; the deadline must still fire.
    common::start_stalling_backend(backend_addr).await;

    let mut config = common::test_config(proxy_addr, &[("b1", backend_addr)]);
    config.proxy.timeout_secs = Some(1);
    let (context, shutdown) = common::start_gateway(proxy_addr, config).await;

    let client = common::http_client();
    let started = Instant::now();
    let res = tokio::time::timeout(
        Duration::from_secs(5),
        client.get(format!("http://{}/api/data", proxy_addr)).send(),
    )
    .await
    .expect("forwarding deadline never fired on a stalled body")
    .expect("Gateway unreachable");

    assert_eq!(res.status(), 500);
    assert!(started.elapsed() < Duration::from_secs(5));

    let entry = context.stats.last().unwrap();
    assert_eq!(entry.status, 500);
    assert!(entry.error.as_deref().unwrap().contains("deadline"));
    assert_eq!(context.registry.get("b1").unwrap().completed(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn health_monitor_flags_a_dead_backend() {
    let live_addr: SocketAddr = "127.0.0.1:29221".parse().unwrap();
    let dead_addr: SocketAddr = "127.0.0.1:29222".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:29223".parse().unwrap();

    common::start_mock_backend(live_addr, "OK").await;

    let mut config = common::test_config(proxy_addr, &[("live", live_addr), ("dead", dead_addr)]);
    config.health_check.enabled = true;
    config.health_check.interval_secs = 1;
    config.health_check.timeout_secs = 1;

    let (_context, shutdown) = common::start_gateway(proxy_addr, config).await;

    tokio::time::sleep(Duration::from_secs(2)).await;

    let client = common::http_client();
    let servers: Vec<ServerInfo> = client
        .get(format!("http://{}/api/servers", proxy_addr))
        .send()
        .await
        .expect("Gateway unreachable")
        .json()
        .await
        .unwrap();

    let live = servers.iter().find(|s| s.name == "live").unwrap();
    let dead = servers.iter().find(|s| s.name == "dead").unwrap();
    assert!(live.healthy, "live backend should stay healthy");
    assert!(!dead.healthy, "dead backend should be flagged unhealthy");

    shutdown.trigger();
}

#[tokio::test]
async fn unhealthy_backends_keep_receiving_traffic_by_default() {
    // Health is informational: the balancer ignores the flag unless the
    // filtering mode is switched on.
    let dead_addr: SocketAddr = "127.0.0.1:29231".parse().unwrap();
    let live_addr: SocketAddr = "127.0.0.1:29232".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:29233".parse().unwrap();

    common::start_mock_backend(live_addr, "live").await;

    let config = common::test_config(proxy_addr, &[("dead", dead_addr), ("live", live_addr)]);
    let (context, shutdown) = common::start_gateway(proxy_addr, config).await;

    context.registry.get("dead").unwrap().set_healthy(false);

    // The dead backend keeps winning least-loaded because its counter
    // never advances on failures.
    let client = common::http_client();
    for _ in 0..3 {
        let res = client
            .get(format!("http://{}/api/data", proxy_addr))
            .send()
            .await
            .expect("Gateway unreachable");
        assert_eq!(res.status(), 500);
    }
    assert_eq!(context.registry.get("dead").unwrap().completed(), 0);
    assert_eq!(context.registry.get("live").unwrap().completed(), 0);

    shutdown.trigger();
}
