mod common;

use std::path::Path;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use common::{test_service, write_csv};
use tracebench::api::TraceApi;

fn setup(root: &Path) -> Router {
    TraceApi::new(test_service(root)).router()
}

async fn body_string(router: Router, req: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn lookup_request(barcode: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/result/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("barcode={barcode}")))
        .unwrap()
}

const SAMPLE_CSV: &str = "Engine no,Reception date/time,Torque,Result\n\
                          E1,03:45.120000,10.5,OK\n\
                          E1,03:46.000000,11.0,BB\n";

/// The index page serves the lookup form.
#[tokio::test]
async fn test_index_serves_lookup_form() {
    let dir = TempDir::new().unwrap();
    let router = setup(dir.path());

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let (status, body) = body_string(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"action="/result/""#));
    assert!(body.contains(r#"name="barcode""#));
}

/// A matching barcode returns the result page with the styled table and
/// an embedded chart.
#[tokio::test]
async fn test_lookup_hit_returns_result_page() {
    let dir = TempDir::new().unwrap();
    let router = setup(dir.path());
    write_csv(dir.path(), "trace.csv", SAMPLE_CSV);

    let (status, body) = body_string(router, lookup_request("E1")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"class="styled-table""#));
    assert!(body.contains(r#"<td style="background-color: green;">OK</td>"#));
    assert!(body.contains(r#"<td style="background-color: red;">BB</td>"#));
    assert!(body.contains("data:image/png;base64,"));
}

/// A miss renders the not-found indicator in the page.
#[tokio::test]
async fn test_lookup_miss_renders_not_found() {
    let dir = TempDir::new().unwrap();
    let router = setup(dir.path());
    write_csv(dir.path(), "trace.csv", SAMPLE_CSV);

    let (status, body) = body_string(router, lookup_request("E9")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No row found for Engine no. E9 or table is empty."));
    assert!(body.contains("Not found."));
}

/// An empty source directory reports a machine-readable error body.
#[tokio::test]
async fn test_no_csv_files_reports_json_error() {
    let dir = TempDir::new().unwrap();
    let router = setup(dir.path());

    let response = router.oneshot(lookup_request("E1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["error"], "No CSV files found in the specified folder.");
}

/// Once the store is closed, a lookup maps to 503 with the storage error
/// body.
#[tokio::test]
async fn test_closed_store_reports_service_unavailable() {
    let dir = TempDir::new().unwrap();
    let service = test_service(dir.path());
    write_csv(dir.path(), "trace.csv", SAMPLE_CSV);
    service.close().await;
    let router = TraceApi::new(service).router();

    let response = router.oneshot(lookup_request("E1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["code"], "STORAGE_UNAVAILABLE");
    assert_eq!(json["error"], "Store unavailable: store is closed");
}

/// With `Accept: application/json` the payload comes back as JSON instead
/// of the rendered page.
#[tokio::test]
async fn test_lookup_negotiates_json_payload() {
    let dir = TempDir::new().unwrap();
    let router = setup(dir.path());
    write_csv(dir.path(), "trace.csv", SAMPLE_CSV);

    let request = Request::builder()
        .method("POST")
        .uri("/result/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::ACCEPT, "application/json")
        .body(Body::from("barcode=E1"))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["table_html"].as_str().unwrap().contains("<table"));
    assert!(
        json["chart_html"]
            .as_str()
            .unwrap()
            .starts_with("<img src=\"data:image/png;base64,")
    );
}

/// Health endpoint answers without touching the pipeline.
#[tokio::test]
async fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let router = setup(dir.path());

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = body_string(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}
