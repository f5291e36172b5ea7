//! In-process conversion backend for integration tests

#![allow(dead_code)]

use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// One multipart field as the backend received it
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedField {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl ReceivedField {
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.data).unwrap_or_default()
    }
}

/// Everything the mock backend has been sent, request by request
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<(String, Vec<ReceivedField>)>>>,
}

impl Recorder {
    pub fn requests(&self) -> Vec<(String, Vec<ReceivedField>)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<(String, Vec<ReceivedField>)> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn push(&self, path: &str, fields: Vec<ReceivedField>) {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), fields));
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub recorder: Recorder,
}

/// Start the mock backend on a random loopback port
pub async fn start_mock_backend() -> MockBackend {
    let recorder = Recorder::default();

    let app = Router::new()
        .route("/convert/image", post(convert_image))
        .route("/convert/pdf/merge", post(merge_pdf))
        .route("/convert/media/download", post(download_media))
        .route("/broken", post(broken))
        .route("/no-detail", post(no_detail))
        .route("/empty", post(empty))
        .with_state(recorder.clone());

    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let bound_addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{}", bound_addr),
        recorder,
    }
}

/// Address nothing is listening on
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Address that accepts connections but never answers
pub async fn stalled_backend_url() -> String {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    format!("http://{}", addr)
}

async fn read_fields(mut multipart: Multipart) -> Vec<ReceivedField> {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.unwrap();
        fields.push(ReceivedField {
            name,
            file_name,
            content_type,
            data,
        });
    }
    fields
}

fn field<'a>(fields: &'a [ReceivedField], name: &str) -> Option<&'a ReceivedField> {
    fields.iter().find(|f| f.name == name)
}

async fn convert_image(State(recorder): State<Recorder>, multipart: Multipart) -> Response {
    let fields = read_fields(multipart).await;
    let format = field(&fields, "target_format").map(|f| f.text().to_string());
    recorder.push("/convert/image", fields);

    match format.as_deref() {
        Some("PNG") => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/png")],
            Bytes::from_static(b"\x89PNG\r\n\x1a\nconverted"),
        )
            .into_response(),
        _ => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": "Unsupported format" })),
        )
            .into_response(),
    }
}

async fn merge_pdf(State(recorder): State<Recorder>, multipart: Multipart) -> Response {
    let fields = read_fields(multipart).await;
    let mut merged = Vec::new();
    for part in fields.iter().filter(|f| f.name == "files") {
        merged.extend_from_slice(&part.data);
    }
    recorder.push("/convert/pdf/merge", fields);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/pdf")],
        merged,
    )
        .into_response()
}

async fn download_media(State(recorder): State<Recorder>, multipart: Multipart) -> Response {
    let fields = read_fields(multipart).await;
    let format = field(&fields, "format")
        .map(|f| f.text().to_string())
        .unwrap_or_else(|| "mp4".to_string());
    recorder.push("/convert/media/download", fields);

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"Big Buck Bunny.{format}\""),
            ),
        ],
        Bytes::from_static(b"media-bytes"),
    )
        .into_response()
}

async fn broken(State(recorder): State<Recorder>, multipart: Multipart) -> Response {
    let fields = read_fields(multipart).await;
    recorder.push("/broken", fields);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

async fn no_detail(State(recorder): State<Recorder>, multipart: Multipart) -> Response {
    let fields = read_fields(multipart).await;
    recorder.push("/no-detail", fields);
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "something went wrong" })),
    )
        .into_response()
}

async fn empty(State(recorder): State<Recorder>, multipart: Multipart) -> Response {
    let fields = read_fields(multipart).await;
    recorder.push("/empty", fields);
    (StatusCode::OK, [(header::CONTENT_TYPE, "application/pdf")]).into_response()
}
