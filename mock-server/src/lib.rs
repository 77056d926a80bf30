//! Test server for the session client.
//!
//! # Design
//! Each route exercises one behavior of the client pipeline over real HTTP:
//! `/profile` serves snake_case JSON with an epoch-milliseconds timestamp,
//! `/search` and `/headers` echo back what the request actually carried on
//! the wire, `/documents` is a small JSON store for POST/PUT bodies,
//! `/uploads` parses multipart bodies with axum's standards-compliant
//! parser, and `/broken` returns a non-JSON body for the decode-failure
//! path. DTOs are defined independently from the client crate; integration
//! tests catch any schema drift.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Fixed account served by `GET /profile`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: u64,
    pub display_name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// A stored document, as served by the `/documents` routes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateDocument {
    pub title: String,
    pub body: String,
}

#[derive(Deserialize)]
pub struct UpdateDocument {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Echo of the query pairs received on `GET /search`, in wire order.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryEcho {
    pub query: Vec<(String, String)>,
}

/// Echo of the Content-Type request header received on `GET /headers`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HeaderEcho {
    pub content_type: Option<String>,
}

/// What `POST /uploads` found after parsing the multipart body.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadSummary {
    pub fields: Vec<(String, String)>,
    pub file_name: Option<String>,
    pub file_content_type: Option<String>,
    pub file_size: Option<usize>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Document>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/profile", get(profile))
        .route("/search", get(search))
        .route("/headers", get(headers_echo))
        .route("/broken", get(broken))
        .route("/documents", post(create_document))
        .route("/documents/{id}", put(update_document))
        .route("/uploads", post(receive_upload))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn profile() -> Json<Profile> {
    Json(Profile {
        user_id: 7,
        display_name: "Resident".to_string(),
        created_at: DateTime::UNIX_EPOCH + TimeDelta::milliseconds(1000),
    })
}

async fn search(Query(pairs): Query<Vec<(String, String)>>) -> Json<QueryEcho> {
    Json(QueryEcho { query: pairs })
}

async fn headers_echo(headers: HeaderMap) -> Json<HeaderEcho> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(String::from);
    Json(HeaderEcho { content_type })
}

async fn broken() -> &'static str {
    "this is not json"
}

async fn create_document(
    State(db): State<Db>,
    Json(input): Json<CreateDocument>,
) -> (StatusCode, Json<Document>) {
    let document = Document {
        id: Uuid::new_v4(),
        title: input.title,
        body: input.body,
        created_at: Utc::now(),
    };
    db.write().await.insert(document.id, document.clone());
    (StatusCode::CREATED, Json(document))
}

async fn update_document(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateDocument>,
) -> Result<Json<Document>, StatusCode> {
    let mut documents = db.write().await;
    let document = documents.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        document.title = title;
    }
    if let Some(body) = input.body {
        document.body = body;
    }
    Ok(Json(document.clone()))
}

async fn receive_upload(mut multipart: Multipart) -> Result<Json<UploadSummary>, StatusCode> {
    let mut summary = UploadSummary {
        fields: Vec::new(),
        file_name: None,
        file_content_type: None,
        file_size: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);

        match file_name {
            Some(file_name) => {
                summary.file_name = Some(file_name);
                summary.file_content_type = content_type;
                let data = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                summary.file_size = Some(data.len());
            }
            None => {
                let value = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                summary.fields.push((name, value));
            }
        }
    }

    Ok(Json(summary))
}
