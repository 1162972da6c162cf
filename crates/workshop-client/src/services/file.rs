use crate::models::FileInfo;
use bytes::Bytes;
use workshop_http::{ApiResponse, Blob, HttpService, ProgressCallback, Result, UploadForm};

/// Multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

/// Files attached to repairs, under `/repairs/:id/files`.
#[derive(Clone)]
pub struct FileService {
    http: HttpService,
}

fn files_path(repair_id: i64) -> String {
    format!("/repairs/{}/files", repair_id)
}

fn file_path(repair_id: i64, file_id: i64) -> String {
    format!("/repairs/{}/files/{}", repair_id, file_id)
}

impl FileService {
    pub fn new(http: HttpService) -> Self {
        Self { http }
    }

    pub async fn get_by_repair_id(&self, repair_id: i64) -> Result<Vec<FileInfo>> {
        self.http.get(&files_path(repair_id)).await?.into_data()
    }

    /// Upload one file. `on_progress` sees percents from 0 to 100.
    pub async fn upload(
        &self,
        repair_id: i64,
        file_name: &str,
        content_type: Option<String>,
        data: impl Into<Bytes>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<ApiResponse> {
        let form = UploadForm::new().file(FILE_FIELD, file_name, content_type, data);
        self.http
            .upload_file(&files_path(repair_id), form, on_progress)
            .await
    }

    pub async fn download(&self, repair_id: i64, file_id: i64) -> Result<Blob> {
        self.http.download_blob(&file_path(repair_id, file_id)).await
    }

    pub async fn delete(&self, repair_id: i64, file_id: i64) -> Result<()> {
        self.http.delete(&file_path(repair_id, file_id)).await?;
        Ok(())
    }
}
