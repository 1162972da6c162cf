pub mod form;
pub mod request;
pub mod response;

pub use form::{FormPart, UploadForm};
pub use request::{ApiRequest, RequestBody};
pub use response::{ApiResponse, Blob, RawResponse};
