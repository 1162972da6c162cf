//! Responses: raw from the network, parsed for callers.

use crate::error::{ApiError, Result};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// What the network layer hands back before any interpretation.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        RawResponse {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Successful JSON call: `{ data, status }`.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    /// Parsed body, `None` only when the body was empty.
    pub data: Option<Value>,
    pub status: u16,
}

impl ApiResponse {
    /// Deserialize `data` into a domain type. An empty body reads as JSON `null`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        let status = self.status;
        serde_json::from_value(self.data.unwrap_or(Value::Null)).map_err(|e| ApiError::Decode {
            status,
            detail: e.to_string(),
        })
    }
}

/// Successful binary download.
#[derive(Clone, Debug)]
pub struct Blob {
    pub data: Bytes,
    pub status: u16,
    pub content_type: Option<String>,
    /// From `Content-Disposition`, when the server named the file.
    pub filename: Option<String>,
}

impl Blob {
    pub fn from_raw(raw: RawResponse) -> Self {
        let content_type = raw.header("content-type").map(str::to_string);
        let filename = raw
            .header("content-disposition")
            .and_then(crate::client::parse_disposition_filename);
        Blob {
            data: raw.body,
            status: raw.status,
            content_type,
            filename,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
