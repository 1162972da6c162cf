//! Scripted in-memory network and session for tests.

use crate::client::UploadProgress;
use crate::error::{ApiError, Result};
use crate::traits::{ApiNetwork, SessionContext};
use crate::types::{ApiRequest, RawResponse, UploadForm};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

const CHUNK: usize = 1024;

/// A request as the mock saw it. Uploads keep their form.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub request: ApiRequest,
    pub form: Option<UploadForm>,
}

impl std::ops::Deref for RecordedRequest {
    type Target = ApiRequest;

    fn deref(&self) -> &ApiRequest {
        &self.request
    }
}

impl RecordedRequest {
    /// JSON body parsed back into a value.
    pub fn json(&self) -> Option<Value> {
        self.request
            .json_str()
            .and_then(|s| serde_json::from_str(s).ok())
    }
}

/// Answers requests from a FIFO of scripted responses.
///
/// An empty queue answers `200` with an empty body.
#[derive(Default)]
pub struct MockNetwork {
    responses: Mutex<VecDeque<Result<RawResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: RawResponse) {
        self.responses.lock().push_back(Ok(response));
    }

    pub fn respond(&self, status: u16, body: impl Into<bytes::Bytes>) {
        self.push(RawResponse::new(status, body));
    }

    pub fn respond_json(&self, status: u16, body: Value) {
        self.push(
            RawResponse::new(status, body.to_string())
                .with_header("Content-Type", "application/json"),
        );
    }

    pub fn fail_transport(&self, detail: &str) {
        self.responses
            .lock()
            .push_back(Err(ApiError::transport(detail)));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    fn next(&self) -> Result<RawResponse> {
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(200, "")))
    }
}

#[async_trait]
impl ApiNetwork for MockNetwork {
    async fn fetch(&self, request: ApiRequest) -> Result<RawResponse> {
        self.requests.lock().push(RecordedRequest {
            request,
            form: None,
        });
        self.next()
    }

    async fn upload(
        &self,
        request: ApiRequest,
        form: UploadForm,
        progress: UploadProgress,
    ) -> Result<RawResponse> {
        let response = self.next();
        if response.is_ok() {
            for part in &form.parts {
                for chunk in part.data.chunks(CHUNK) {
                    progress.advance(chunk.len() as u64);
                }
            }
            progress.complete();
        }
        self.requests.lock().push(RecordedRequest {
            request,
            form: Some(form),
        });
        response
    }
}

/// Session holding nothing but a token.
#[derive(Default)]
pub struct MockSession {
    token: Mutex<Option<String>>,
    invalidations: AtomicUsize,
}

impl MockSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn logged_in(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
            invalidations: AtomicUsize::new(0),
        }
    }

    /// How many times a live session was dropped.
    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }
}

impl SessionContext for MockSession {
    fn token(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn invalidate(&self) -> bool {
        if self.token.lock().take().is_some() {
            self.invalidations.fetch_add(1, Ordering::SeqCst);
            true
        } else {
            false
        }
    }
}
