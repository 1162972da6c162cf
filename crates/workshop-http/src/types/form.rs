//! Multipart form payload for uploads.

use bytes::Bytes;

/// One field of a multipart form.
#[derive(Clone, Debug)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Multipart form, the equivalent of a browser `FormData`.
#[derive(Clone, Debug, Default)]
pub struct UploadForm {
    pub parts: Vec<FormPart>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            file_name: None,
            content_type: None,
            data: Bytes::from(value.into()),
        });
        self
    }

    /// File field.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            file_name: Some(file_name.into()),
            content_type,
            data: data.into(),
        });
        self
    }

    /// Payload bytes across all parts, the denominator for upload progress.
    pub fn total_len(&self) -> u64 {
        self.parts.iter().map(|p| p.data.len() as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
