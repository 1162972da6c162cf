//! End-to-end checks of the reqwest network against a local axum server.

use axum::extract::{Multipart, Path};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use workshop_http::error::CONNECTION_ERROR_MESSAGE;
use workshop_http::{ClientConfig, HttpService, NoSession, ProgressCallback, SessionContext, UploadForm};

struct TokenSession(Mutex<Option<String>>);

impl SessionContext for TokenSession {
    fn token(&self) -> Option<String> {
        self.0.lock().clone()
    }

    fn invalidate(&self) -> bool {
        self.0.lock().take().is_some()
    }
}

async fn client_by_id(Path(id): Path<u64>) -> (StatusCode, Json<Value>) {
    if id == 42 {
        (StatusCode::NOT_FOUND, Json(json!({"message": "Nie znaleziono"})))
    } else {
        (StatusCode::OK, Json(json!({"id": id, "surname": "Nowak"})))
    }
}

async fn whoami(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(auth) => (StatusCode::OK, Json(json!({"authorization": auth}))),
        None => (StatusCode::UNAUTHORIZED, Json(json!({"errorDescription": "Bad credentials"}))),
    }
}

async fn upload(Path(id): Path<u64>, mut multipart: Multipart) -> Json<Value> {
    let mut filename = None;
    let mut size = 0usize;
    while let Some(field) = multipart.next_field().await.unwrap() {
        filename = field.file_name().map(str::to_string);
        size += field.bytes().await.unwrap().len();
    }
    Json(json!({"repairId": id, "filename": filename, "size": size}))
}

async fn raw_file() -> ([(header::HeaderName, &'static str); 2], Vec<u8>) {
    (
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "inline; filename=\"zlecenie.pdf\""),
        ],
        b"%PDF-1.4 not json".to_vec(),
    )
}

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/api/v1/clients/{id}", get(client_by_id))
        .route("/api/v1/whoami", get(whoami))
        .route("/api/v1/repairs/{id}/files", post(upload))
        .route("/api/v1/repairs/{id}/files/1", get(raw_file));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/v1", addr)
}

#[tokio::test]
async fn test_json_round_trip_and_not_found() {
    let base = spawn_server().await;
    let http = HttpService::new(ClientConfig::new(base), Arc::new(NoSession)).unwrap();

    let ok = http.get("/clients/7").await.unwrap();
    assert_eq!(ok.status, 200);
    assert_eq!(ok.data, Some(json!({"id": 7, "surname": "Nowak"})));

    let err = http.get("/clients/42").await.unwrap_err();
    assert_eq!(err.status(), 404);
    assert_eq!(err.data(), Some(&json!({"message": "Nie znaleziono"})));
    assert_eq!(err.message(), "Nie znaleziono");
}

#[tokio::test]
async fn test_bearer_token_reaches_server_and_401_logs_out() {
    let base = spawn_server().await;
    let session = Arc::new(TokenSession(Mutex::new(Some("abc".to_string()))));
    let http = HttpService::new(ClientConfig::new(base), session.clone()).unwrap();

    let res = http.get("/whoami").await.unwrap();
    assert_eq!(res.data, Some(json!({"authorization": "Bearer abc"})));

    session.invalidate();
    let err = http.get("/whoami").await.unwrap_err();
    assert_eq!(err.status(), 401);
    assert_eq!(err.message(), "Zły login lub hasło.");
}

#[tokio::test]
async fn test_multipart_upload_with_progress() {
    let base = spawn_server().await;
    let http = HttpService::new(ClientConfig::new(base), Arc::new(NoSession)).unwrap();

    let seen = Arc::new(Mutex::new(Vec::<u8>::new()));
    let sink = seen.clone();
    let on_progress: ProgressCallback = Arc::new(move |p: u8| sink.lock().push(p));
    let form = UploadForm::new().file(
        "file",
        "uszkodzenie.jpg",
        Some("image/jpeg".to_string()),
        vec![0xAB; 100_000],
    );

    let res = http
        .upload_file("/repairs/9/files", form, Some(on_progress))
        .await
        .unwrap();

    assert_eq!(
        res.data,
        Some(json!({"repairId": 9, "filename": "uszkodzenie.jpg", "size": 100_000}))
    );
    let seen = seen.lock();
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(seen.last(), Some(&100));
}

#[tokio::test]
async fn test_download_blob_is_not_json_parsed() {
    let base = spawn_server().await;
    let http = HttpService::new(ClientConfig::new(base), Arc::new(NoSession)).unwrap();

    let blob = http.download_blob("/repairs/3/files/1").await.unwrap();
    assert_eq!(&blob.data[..], b"%PDF-1.4 not json");
    assert_eq!(blob.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(blob.filename.as_deref(), Some("zlecenie.pdf"));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let http = HttpService::new(
        ClientConfig::new(format!("http://{}/api/v1", addr)),
        Arc::new(NoSession),
    )
    .unwrap();

    let form = UploadForm::new().file("file", "a.txt", None, "abc");
    let err = http.upload_file("/repairs/1/files", form, None).await.unwrap_err();
    assert_eq!(err.status(), 0);
    assert!(err.data().is_none());
    assert_eq!(err.message(), CONNECTION_ERROR_MESSAGE);
}
