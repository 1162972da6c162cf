use crate::models::TemplateInfo;
use workshop_http::client::encode_segment;
use workshop_http::{ApiError, HttpService, Result};

pub const TEMPLATES_PATH: &str = "/documents/templates";

/// Printable HTML templates served by the backend.
#[derive(Clone)]
pub struct DocumentService {
    http: HttpService,
}

impl DocumentService {
    pub fn new(http: HttpService) -> Self {
        Self { http }
    }

    pub async fn get_available_templates(&self) -> Result<Vec<TemplateInfo>> {
        self.http.get(TEMPLATES_PATH).await?.into_data()
    }

    /// Raw HTML of one template.
    pub async fn get_template_content(&self, name: &str) -> Result<String> {
        let endpoint = format!("{}/{}", TEMPLATES_PATH, encode_segment(name));
        let blob = self.http.download_blob(&endpoint).await?;
        let status = blob.status;
        String::from_utf8(blob.data.to_vec()).map_err(|e| ApiError::Decode {
            status,
            detail: e.to_string(),
        })
    }

    /// Absolute URL of an image referenced by a template. No request is made.
    pub fn template_image_url(&self, image_name: &str) -> String {
        self.http.url(&format!(
            "{}/images/{}",
            TEMPLATES_PATH,
            encode_segment(image_name)
        ))
    }
}
