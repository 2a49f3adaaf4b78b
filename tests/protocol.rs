//! End-to-end protocol tests: JSON responses, partial reloads, version
//! checks and redirect handling over a real HTTP round trip.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::middleware::from_fn;
use axum::response::Response;
use axum::routing::{get, patch};
use axum::Router;
use inertia_axum::page::{always, defer, merge, optional, Inertia, PageObject, Props};
use inertia_axum::{preserve_method_redirects, Error, InertiaService};
use serde_json::json;

mod common;

async fn dashboard(inertia: Inertia) -> Result<Response, Error> {
    let props = Props::new()
        .with("user", json!({"name": "jo"}))
        .with("debug", optional(|| async { Ok(json!({"build": "dev"})) }))
        .with(
            "count",
            defer(|| async { Ok(json!(42)) }).group("stats"),
        )
        .with("feed", merge(|| async { Ok(json!(["a", "b"])) }))
        .with("notifications", always(|| async { Ok(json!(3)) }));
    inertia.render("dashboard", props).await
}

async fn broken(inertia: Inertia) -> Result<Response, Error> {
    let props = Props::new().with(
        "boom",
        merge(|| async { Err("database unreachable".into()) }),
    );
    inertia.render("broken", props).await
}

async fn update_settings() -> Response {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, "/settings")
        .body(Body::empty())
        .unwrap()
}

fn app(service: Arc<InertiaService>) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/broken", get(broken))
        .route("/settings", patch(update_settings))
        .with_state(service)
        .layer(from_fn(preserve_method_redirects))
}

#[tokio::test]
async fn test_protocol_response_echoes_marker_and_vary() {
    let addr = common::spawn_app(app(common::service())).await;
    let client = common::client();

    let response = client
        .get(format!("http://{addr}/dashboard?tab=1"))
        .header("x-inertia", "true")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["x-inertia"], "true");
    assert_eq!(response.headers()["vary"], "x-inertia");
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );

    let page: PageObject = response.json().await.unwrap();
    assert_eq!(page.component, "dashboard");
    assert_eq!(page.url, "/dashboard?tab=1");
    assert_eq!(page.version, "1");

    // Full load: optional and deferred props are absent, the rest resolved.
    let keys: Vec<_> = page.props.keys().cloned().collect();
    assert_eq!(keys, ["user", "feed", "notifications"]);

    let groups = page.deferred_props.unwrap();
    assert_eq!(groups.get("stats").unwrap(), &["count"]);
    assert_eq!(page.merge_props, Some(vec!["feed".to_string()]));
}

#[tokio::test]
async fn test_stale_version_forces_full_navigation() {
    let addr = common::spawn_app(app(common::service())).await;
    let client = common::client();

    let response = client
        .get(format!("http://{addr}/dashboard"))
        .header("x-inertia", "true")
        .header("x-inertia-version", "old")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 409);
    assert!(response.headers().get("x-inertia").is_none());
    assert_eq!(response.headers()["x-inertia-location"], "/dashboard");
    assert_eq!(response.headers()["vary"], "x-inertia");
    assert!(response.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_matching_version_renders_normally() {
    let addr = common::spawn_app(app(common::service())).await;
    let client = common::client();

    let response = client
        .get(format!("http://{addr}/dashboard"))
        .header("x-inertia", "true")
        .header("x-inertia-version", "1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["x-inertia"], "true");
}

#[tokio::test]
async fn test_absent_version_header_renders_normally() {
    let addr = common::spawn_app(app(common::service())).await;
    let client = common::client();

    let response = client
        .get(format!("http://{addr}/dashboard"))
        .header("x-inertia", "true")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_partial_reload_only_reaches_lazy_props() {
    let addr = common::spawn_app(app(common::service())).await;
    let client = common::client();

    let response = client
        .get(format!("http://{addr}/dashboard"))
        .header("x-inertia", "true")
        .header("x-inertia-partial-component", "dashboard")
        .header("x-inertia-partial-data", "count,debug")
        .send()
        .await
        .unwrap();

    let page: PageObject = response.json().await.unwrap();
    let keys: Vec<_> = page.props.keys().cloned().collect();
    // Requested props materialized, Always props force-included.
    assert_eq!(keys, ["count", "debug", "notifications"]);
    assert_eq!(page.props.get("count"), Some(&json!(42)));

    // Partial reloads never re-announce deferred groups.
    assert!(page.deferred_props.is_none());
}

#[tokio::test]
async fn test_partial_reload_except_removes_props() {
    let addr = common::spawn_app(app(common::service())).await;
    let client = common::client();

    let response = client
        .get(format!("http://{addr}/dashboard"))
        .header("x-inertia", "true")
        .header("x-inertia-partial-component", "dashboard")
        .header("x-inertia-partial-except", "user,notifications")
        .send()
        .await
        .unwrap();

    let page: PageObject = response.json().await.unwrap();
    assert!(page.props.get("user").is_none());
    // Always props survive the except filter.
    assert_eq!(page.props.get("notifications"), Some(&json!(3)));
}

#[tokio::test]
async fn test_partial_component_mismatch_is_a_full_load() {
    let addr = common::spawn_app(app(common::service())).await;
    let client = common::client();

    let response = client
        .get(format!("http://{addr}/dashboard"))
        .header("x-inertia", "true")
        .header("x-inertia-partial-component", "settings")
        .header("x-inertia-partial-data", "debug")
        .send()
        .await
        .unwrap();

    let page: PageObject = response.json().await.unwrap();
    let keys: Vec<_> = page.props.keys().cloned().collect();
    assert_eq!(keys, ["user", "feed", "notifications"]);
    assert!(page.deferred_props.is_some());
}

#[tokio::test]
async fn test_reset_header_excludes_from_merge_props() {
    let addr = common::spawn_app(app(common::service())).await;
    let client = common::client();

    let response = client
        .get(format!("http://{addr}/dashboard"))
        .header("x-inertia", "true")
        .header("x-inertia-reset", "feed")
        .send()
        .await
        .unwrap();

    let page: PageObject = response.json().await.unwrap();
    assert_eq!(page.merge_props, None);
}

#[tokio::test]
async fn test_patch_redirect_is_rewritten_to_303() {
    let addr = common::spawn_app(app(common::service())).await;
    let client = common::client();

    let response = client
        .patch(format!("http://{addr}/settings"))
        .header("x-inertia", "true")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()[header::LOCATION], "/settings");
}

#[tokio::test]
async fn test_producer_failure_yields_opaque_500() {
    let addr = common::spawn_app(app(common::service())).await;
    let client = common::client();

    let response = client
        .get(format!("http://{addr}/broken"))
        .header("x-inertia", "true")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body = response.text().await.unwrap();
    assert!(!body.contains("database unreachable"));
}
