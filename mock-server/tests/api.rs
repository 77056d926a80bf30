use axum::http::{self, Request, StatusCode};
use chrono::{DateTime, TimeDelta};
use http_body_util::BodyExt;
use mock_server::{app, Document, HeaderEcho, Profile, QueryEcho, UploadSummary};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- profile ---

#[tokio::test]
async fn profile_serves_snake_case_with_millis_timestamp() {
    let resp = app().oneshot(get_request("/profile")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let raw: serde_json::Value = body_json(resp).await;
    assert_eq!(raw["user_id"], 7);
    assert_eq!(raw["created_at"], 1000);

    let resp = app().oneshot(get_request("/profile")).await.unwrap();
    let profile: Profile = body_json(resp).await;
    assert_eq!(
        profile.created_at,
        DateTime::UNIX_EPOCH + TimeDelta::milliseconds(1000)
    );
}

// --- search ---

#[tokio::test]
async fn search_echoes_query_pairs_in_order() {
    let resp = app().oneshot(get_request("/search?a=1&b=2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: QueryEcho = body_json(resp).await;
    assert_eq!(
        echo.query,
        vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string())
        ]
    );
}

// --- headers ---

#[tokio::test]
async fn headers_route_echoes_content_type() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/headers")
                .header(http::header::CONTENT_TYPE, "text/plain")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: HeaderEcho = body_json(resp).await;
    assert_eq!(echo.content_type.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn headers_route_reports_absent_content_type() {
    let resp = app().oneshot(get_request("/headers")).await.unwrap();
    let echo: HeaderEcho = body_json(resp).await;
    assert!(echo.content_type.is_none());
}

// --- broken ---

#[tokio::test]
async fn broken_serves_a_non_json_body() {
    let resp = app().oneshot(get_request("/broken")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<serde_json::Value>(&bytes).is_err());
}

// --- documents ---

#[tokio::test]
async fn create_document_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/documents",
            r#"{"title":"Trip notes","body":"Pack light"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let document: Document = body_json(resp).await;
    assert_eq!(document.title, "Trip notes");
    assert_eq!(document.body, "Pack light");
}

#[tokio::test]
async fn create_document_missing_field_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/documents", r#"{"title":"only"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn update_document_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/documents/00000000-0000-0000-0000-000000000000",
            r#"{"title":"Nope"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- uploads ---

/// Body in the exact legacy layout the client encoder produces: a leading
/// Content-Type block before the first boundary, CRLF line endings, and the
/// terminator directly after the file bytes.
#[tokio::test]
async fn upload_parses_legacy_multipart_layout() {
    let b = "abcdefghijKLMNOP";
    let body = format!(
        "Content-Type: multipart/form-data; boundary={b}\r\n\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"caption\"\r\n\r\nholiday\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"photo.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\nJPEGDATA\r\n--{b}--"
    );

    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/uploads")
                .header(
                    http::header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={b}"),
                )
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let summary: UploadSummary = body_json(resp).await;
    assert_eq!(
        summary.fields,
        vec![("caption".to_string(), "holiday".to_string())]
    );
    assert_eq!(summary.file_name.as_deref(), Some("photo.jpg"));
    assert_eq!(summary.file_content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(summary.file_size, Some("JPEGDATA".len()));
}
