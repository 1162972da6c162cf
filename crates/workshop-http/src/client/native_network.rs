use crate::client::{ClientConfig, UploadProgress};
use crate::error::{ApiError, Result};
use crate::traits::ApiNetwork;
use crate::types::{ApiRequest, FormPart, RawResponse, RequestBody, UploadForm};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;

/// Upload bodies are streamed in chunks of this size so progress can be reported.
const UPLOAD_CHUNK: usize = 16 * 1024;

pub struct NativeNetwork {
    client: Client,
}

impl NativeNetwork {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(config.connection_timeout_secs))
            .user_agent(config.user_agent.clone());

        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        if !config.proxy_url.is_empty() {
            let proxy = reqwest::Proxy::all(&config.proxy_url)
                .map_err(|e| ApiError::Config(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self::new(client))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn builder(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let mut req_builder = self.client.request(request.method.clone(), &request.url);
        for (k, v) in &request.headers {
            req_builder = req_builder.header(k, v);
        }
        req_builder
    }

    async fn send(&self, req_builder: reqwest::RequestBuilder) -> Result<RawResponse> {
        let response = req_builder.send().await.map_err(ApiError::transport)?;

        let status = response.status().as_u16();
        let mut headers = BTreeMap::new();
        for (k, v) in response.headers() {
            if let Ok(val) = v.to_str() {
                headers.insert(k.as_str().to_string(), val.to_string());
            }
        }

        let body = response.bytes().await.map_err(ApiError::transport)?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// A multipart part whose body reports each chunk as reqwest pulls it.
fn streamed_part(part: FormPart, progress: &UploadProgress) -> Result<Part> {
    let len = part.data.len() as u64;
    let progress = progress.clone();
    let data = part.data;
    let chunks = (0..data.len())
        .step_by(UPLOAD_CHUNK)
        .map(move |start| data.slice(start..(start + UPLOAD_CHUNK).min(data.len())))
        .collect::<Vec<Bytes>>();

    let body_stream = stream::iter(chunks.into_iter().map(move |chunk| {
        progress.advance(chunk.len() as u64);
        Ok::<Bytes, std::io::Error>(chunk)
    }));

    let mut out = Part::stream_with_length(reqwest::Body::wrap_stream(body_stream), len);
    if let Some(file_name) = part.file_name {
        out = out.file_name(file_name);
    }
    if let Some(content_type) = part.content_type {
        out = out
            .mime_str(&content_type)
            .map_err(|e| ApiError::Config(e.to_string()))?;
    }
    Ok(out)
}

#[async_trait]
impl ApiNetwork for NativeNetwork {
    async fn fetch(&self, mut request: ApiRequest) -> Result<RawResponse> {
        match std::mem::take(&mut request.body) {
            RequestBody::Empty => self.send(self.builder(&request)).await,
            RequestBody::Json(body) => self.send(self.builder(&request).body(body)).await,
            RequestBody::Multipart(form) => {
                self.upload(request, form, UploadProgress::none()).await
            }
        }
    }

    async fn upload(
        &self,
        request: ApiRequest,
        form: UploadForm,
        progress: UploadProgress,
    ) -> Result<RawResponse> {
        let mut multipart = Form::new();
        for part in form.parts {
            let name = part.name.clone();
            multipart = multipart.part(name, streamed_part(part, &progress)?);
        }

        tracing::debug!(
            "[WorkshopHTTP-Upload] {} {} ({} bytes)",
            request.method,
            request.url,
            progress.total().unwrap_or(0)
        );

        let response = self.send(self.builder(&request).multipart(multipart)).await?;
        progress.complete();
        Ok(response)
    }
}
