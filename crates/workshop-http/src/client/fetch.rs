//! Main Workshop HTTP client implementation.

use crate::client::config::ClientConfig;
#[cfg(not(target_arch = "wasm32"))]
use crate::client::native_network::NativeNetwork;
use crate::client::{
    auth_header, error_message, is_access_denied_status, parse_body, resolve_url,
    ProgressCallback, UploadProgress,
};
use crate::error::{ApiError, Result};
use crate::traits::{ApiNetwork, SessionContext};
use crate::types::{ApiRequest, ApiResponse, Blob, RawResponse, UploadForm};
use http::Method;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Uniform request/response handling for every backend call.
///
/// Attaches the bearer token, parses JSON bodies, and drops the session
/// when the server answers 401 or 403.
#[derive(Clone)]
pub struct HttpService {
    network: Arc<dyn ApiNetwork>,
    session: Arc<dyn SessionContext>,
    config: Arc<ClientConfig>,
}

impl HttpService {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(config: ClientConfig, session: Arc<dyn SessionContext>) -> Result<Self> {
        let network = NativeNetwork::from_config(&config)?;
        Ok(Self::with_network(Arc::new(network), session, config))
    }

    pub fn with_network(
        network: Arc<dyn ApiNetwork>,
        session: Arc<dyn SessionContext>,
        config: ClientConfig,
    ) -> Self {
        HttpService {
            network,
            session,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Full URL for `endpoint`.
    pub fn url(&self, endpoint: &str) -> String {
        resolve_url(&self.config.base_url, endpoint)
    }

    pub async fn get(&self, endpoint: &str) -> Result<ApiResponse> {
        self.request(Method::GET, endpoint, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<ApiResponse> {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, endpoint, Some(&body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<ApiResponse> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PUT, endpoint, Some(&body)).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<ApiResponse> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PATCH, endpoint, Some(&body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<ApiResponse> {
        self.request(Method::DELETE, endpoint, None).await
    }

    /// Issue a JSON call. `body`, when present, is sent as `application/json`.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let mut request = self.build(method, endpoint)?;
        if let Some(body) = body {
            request = request.with_json(serde_json::to_vec(body)?);
        }

        self.log_request(&request);
        let raw = self.network.fetch(request).await?;
        self.log_response(endpoint, &raw);

        self.handle_json(raw)
    }

    /// Multipart upload. `on_progress` receives non-decreasing percents.
    pub async fn upload_file(
        &self,
        endpoint: &str,
        form: UploadForm,
        on_progress: Option<ProgressCallback>,
    ) -> Result<ApiResponse> {
        let request = self.build(Method::POST, endpoint)?;
        let progress = UploadProgress::new(on_progress, form.total_len());

        self.log_request(&request);
        let raw = self.network.upload(request, form, progress).await?;
        self.log_response(endpoint, &raw);

        self.handle_json(raw)
    }

    /// Binary GET. The body is returned untouched on success.
    pub async fn download_blob(&self, endpoint: &str) -> Result<Blob> {
        let request = self.build(Method::GET, endpoint)?;

        self.log_request(&request);
        let raw = self.network.fetch(request).await?;
        self.log_response(endpoint, &raw);

        if raw.is_success() {
            return Ok(Blob::from_raw(raw));
        }

        // Error bodies are usually JSON, but a download may fail with anything.
        let data = parse_body(&raw.body).ok().flatten();
        Err(self.reject(raw.status, data))
    }

    fn build(&self, method: Method, endpoint: &str) -> Result<ApiRequest> {
        let url = self.url(endpoint);
        url::Url::parse(&url).map_err(|e| ApiError::Config(format!("{}: {}", url, e)))?;
        let token = self.session.token();
        Ok(ApiRequest::new(method, url).with_headers(auth_header(token.as_deref())))
    }

    fn handle_json(&self, raw: RawResponse) -> Result<ApiResponse> {
        let status = raw.status;
        let data = match parse_body(&raw.body) {
            Ok(data) => data,
            Err(e) => {
                if !raw.is_success() {
                    self.check_access(status);
                }
                return Err(ApiError::malformed(status, e));
            }
        };

        if raw.is_success() {
            Ok(ApiResponse { data, status })
        } else {
            Err(self.reject(status, data))
        }
    }

    fn reject(&self, status: u16, data: Option<Value>) -> ApiError {
        self.check_access(status);
        let message = error_message(data.as_ref());
        ApiError::Status {
            status,
            data,
            message,
        }
    }

    /// Auto-logout. Runs before the caller sees the rejection.
    fn check_access(&self, status: u16) {
        if is_access_denied_status(status) && self.session.invalidate() {
            tracing::warn!("Session rejected with status {}, logged out", status);
        }
    }

    fn log_request(&self, request: &ApiRequest) {
        if self.config.enable_logging {
            tracing::debug!("[WorkshopHTTP-Out] {} {}", request.method, request.url);
        }
    }

    fn log_response(&self, endpoint: &str, response: &RawResponse) {
        if self.config.enable_logging {
            tracing::debug!(
                "[WorkshopHTTP-In] {} -> {} ({} bytes)",
                endpoint,
                response.status,
                response.body.len()
            );
        }
    }
}
