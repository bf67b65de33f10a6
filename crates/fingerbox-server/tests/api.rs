use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use fingerbox_joinery::{GeneratorSettings, LayoutSettings};
use fingerbox_server::{router, AppState, ArtifactStore, GenerateBoxResponse};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

fn app(dir: &TempDir, settings: GeneratorSettings) -> Router {
    let state = AppState::new(settings, ArtifactStore::new(dir.path().join("output")));
    router(state, Duration::from_secs(30))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_generate_box_writes_and_serves_svg() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir, GeneratorSettings::default());

    let response = app
        .clone()
        .oneshot(post_json(
            "/generate-box",
            json!({"width": 150, "height": 100, "depth": 80, "thickness": 3, "lidOpen": false}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: GenerateBoxResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body.svg_path, format!("output/box_{}.svg", body.id));
    assert!(body.butt_joints.is_empty());

    let file = dir.path().join(&body.svg_path);
    let stored = std::fs::read_to_string(&file).unwrap();
    assert!(stored.contains("panel-top"));

    let response = app
        .oneshot(get(&format!("/{}", body.svg_path)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, stored.into_bytes());
}

#[tokio::test]
async fn test_repeated_request_reuses_artifact() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir, GeneratorSettings::default());
    let request = json!({"width": 120, "height": 60, "depth": 60, "thickness": 4, "lid_open": true});

    let first = body_json(
        app.clone()
            .oneshot(post_json("/generate-box", request.clone()))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(app.oneshot(post_json("/generate-box", request)).await.unwrap()).await;

    assert_eq!(first["id"], second["id"]);
    let files = std::fs::read_dir(dir.path().join("output")).unwrap().count();
    assert_eq!(files, 1);
}

#[tokio::test]
async fn test_too_small_box_is_unprocessable() {
    let dir = TempDir::new().unwrap();
    let response = app(&dir, GeneratorSettings::default())
        .oneshot(post_json(
            "/generate-box",
            json!({"width": 10, "height": 10, "depth": 10, "thickness": 6}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_dimensions");
    assert_eq!(body["field"], "width");
    assert_eq!(body["value"], 10.0);
    assert_eq!(body["limit"], 36.0);
    assert!(!dir.path().join("output").exists());
}

#[tokio::test]
async fn test_unsupported_thickness() {
    let dir = TempDir::new().unwrap();
    let response = app(&dir, GeneratorSettings::default())
        .oneshot(post_json(
            "/generate-box",
            json!({"width": 100, "height": 100, "depth": 100, "thickness": 5}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["field"], "thickness");
    assert!(body.get("limit").is_none());
}

#[tokio::test]
async fn test_sheet_too_large() {
    let dir = TempDir::new().unwrap();
    let settings = GeneratorSettings {
        layout: LayoutSettings {
            sheet_width: 200.0,
            sheet_height: 200.0,
            ..LayoutSettings::default()
        },
        ..GeneratorSettings::default()
    };
    let response = app(&dir, settings)
        .oneshot(post_json(
            "/generate-box",
            json!({"width": 300, "height": 300, "depth": 300, "thickness": 6}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "sheet_too_large");
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let dir = TempDir::new().unwrap();
    let response = app(&dir, GeneratorSettings::default())
        .oneshot(post_json("/generate-box", json!({"width": 100})))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_health_and_cors() {
    let dir = TempDir::new().unwrap();
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app(&dir, GeneratorSettings::default())
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert_eq!(body_bytes(response).await, b"ok");
}

#[tokio::test]
async fn test_missing_artifact_is_not_found() {
    let dir = TempDir::new().unwrap();
    let response = app(&dir, GeneratorSettings::default())
        .oneshot(get("/output/box_missing.svg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
