//! Outgoing request descriptor.

use crate::types::UploadForm;
use bytes::Bytes;
use http::Method;
use std::collections::BTreeMap;

/// Payload of an outgoing request.
#[derive(Clone, Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Serialized JSON, sent with `Content-Type: application/json`.
    Json(Bytes),
    /// Multipart form; the network layer sets the boundary.
    Multipart(UploadForm),
}

/// A single request, built fresh for every call.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: RequestBody,
}

impl ApiRequest {
    #[inline]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_json(mut self, body: impl Into<Bytes>) -> Self {
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = RequestBody::Json(body.into());
        self
    }

    pub fn with_form(mut self, form: UploadForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// JSON body as text, if any.
    pub fn json_str(&self) -> Option<&str> {
        match &self.body {
            RequestBody::Json(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = ApiRequest::new(Method::POST, "http://localhost/api/v1/clients")
            .with_header("Authorization", "Bearer abc")
            .with_json(r#"{"surname":"Kowalski"}"#);

        assert_eq!(req.header("authorization"), Some("Bearer abc"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.json_str(), Some(r#"{"surname":"Kowalski"}"#));
    }

    #[test]
    fn test_form_sets_no_content_type() {
        let req = ApiRequest::new(Method::POST, "http://localhost/upload")
            .with_form(UploadForm::new().file("file", "a.txt", None, "abc"));
        assert!(req.header("content-type").is_none());
        assert!(matches!(req.body, RequestBody::Multipart(_)));
    }
}
