pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use client::{safe_file_name, ClientConfig, HttpService, ProgressCallback, UploadProgress};
pub use error::{ApiError, Result};
pub use traits::{ApiNetwork, NoSession, SessionContext};
pub use types::{ApiRequest, ApiResponse, Blob, RawResponse, UploadForm};
