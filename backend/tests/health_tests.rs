mod common;

use http::{Method, StatusCode};

use crate::common::{parse_response_body, response_text, TestSetup};

#[tokio::test]
async fn test_health_ready() {
    let context = TestSetup::new().await;

    let response = context
        .send_request(Method::GET, "/health", None)
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["table_ready"], true);
    assert_eq!(body["semver"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_not_ready_after_failed_provisioning() {
    let context = TestSetup::unprovisioned().await;

    assert!(!context.readiness.is_table_ready());

    let response = context
        .send_request(Method::GET, "/health", None)
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "not_ready");
    assert_eq!(body["table_ready"], false);
}

#[tokio::test]
async fn test_unknown_route_without_static_dir_is_404() {
    let context = TestSetup::new().await;

    let response = context
        .send_request(Method::GET, "/", None)
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_dir_served_at_root() {
    let dir = std::env::temp_dir().join(format!("contacts-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>Contacts</h1>").unwrap();

    let context = TestSetup::with_static_dir(dir.clone()).await;

    let response = context
        .send_request(Method::GET, "/", None)
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_text(response).await, "<h1>Contacts</h1>");

    std::fs::remove_dir_all(dir).ok();
}
