//! Workshop API HTTP client implementation.

mod auth;
mod config;
pub mod error_codes;
mod fetch;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
#[cfg(not(target_arch = "wasm32"))]
pub mod native_network;
mod progress;
mod utils;

pub use auth::auth_header;
pub use config::ClientConfig;
pub use error_codes::ErrorCode;
pub use fetch::HttpService;
pub use progress::{ProgressCallback, UploadProgress};
pub use utils::*;
