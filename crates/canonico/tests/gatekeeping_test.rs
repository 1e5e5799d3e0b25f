#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for the terminal checks around redirects: the policy
//! gate, cache-control handling, header hardening, and host failures.

mod common;

use std::sync::Arc;

use axum::http::{StatusCode, header};
use canonico::{PathPrefixPolicy, REVALIDATE_CACHE_CONTROL, RedirectDecider};
use canonico_test_utils::{TestHost, failing_host, test_host};
use common::{TestApp, assert_moved_permanently, assert_passed_through, location};

fn app(host: &TestHost) -> TestApp {
    TestApp::new(host.decider())
}

#[tokio::test]
async fn routed_redirects_carry_revalidation_header() {
    let host = test_host()
        .with_alias("node/1", "about")
        .with_route("node/1", "item.view");

    let response = app(&host).get("/about/").await;
    assert_moved_permanently(&response, "/about");
    assert_eq!(
        response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok()),
        Some(REVALIDATE_CACHE_CONTROL)
    );
}

#[tokio::test]
async fn clean_url_redirects_skip_revalidation_header() {
    let host = test_host();

    let response = app(&host).get("/index.php?q=node/1").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert!(response.headers().get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn policy_refuses_system_path_prefixes() {
    let host = test_host().with_route("admin/settings", "admin.settings");

    let response = app(&host).get("/admin/settings/").await;
    assert_passed_through(response).await;
}

#[tokio::test]
async fn policy_denies_specific_routes() {
    let host = test_host()
        .with_alias("node/1", "about")
        .with_route("node/1", "item.view")
        .with_policy(Arc::new(
            PathPrefixPolicy::default().with_denied_route("item.view"),
        ));

    let response = app(&host).get("/about/").await;
    assert_passed_through(response).await;
}

#[tokio::test]
async fn location_header_is_sanitized() {
    // A hostile alias record must not smuggle headers through the redirect.
    let host = test_host()
        .with_alias("node/1", "about\r\nx-crlf: 1")
        .with_route("node/1", "item.view");

    let response = app(&host).get("/node/1").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);

    let loc = location(&response).unwrap();
    assert!(!loc.contains('\r'));
    assert!(!loc.contains('\n'));
    assert!(response.headers().get("x-crlf").is_none());
}

#[tokio::test]
async fn host_failure_surfaces_as_internal_error() {
    let app = TestApp::new(RedirectDecider::new(failing_host()));

    let response = app.get("/about/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unknown_negotiated_language_falls_back_to_bare_paths() {
    // "de" is not a known site language, so no prefix is ever applied even
    // though the alias record exists for it.
    let host = test_host()
        .with_alias_in("node/1", "about", "de")
        .with_route("node/1", "item.view");

    let response = app(&host).get_in_language("/node/1", "de").await;
    assert_moved_permanently(&response, "/about");
}
