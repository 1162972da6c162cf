use crate::client::UploadProgress;
use crate::error::Result;
use crate::types::{ApiRequest, RawResponse, UploadForm};
use async_trait::async_trait;

/// Abstraction for network operations.
///
/// Implementations return `Ok` for any response the server produced,
/// whatever its status, and `ApiError::Transport` when nothing came back.
#[async_trait]
pub trait ApiNetwork: Send + Sync + 'static {
    async fn fetch(&self, request: ApiRequest) -> Result<RawResponse>;

    /// Send `form` as a multipart body, reporting bytes through `progress`.
    async fn upload(
        &self,
        request: ApiRequest,
        form: UploadForm,
        progress: UploadProgress,
    ) -> Result<RawResponse>;
}

/// The session capability the HTTP layer needs: read the token, and drop
/// the session when the server rejects it.
pub trait SessionContext: Send + Sync + 'static {
    fn token(&self) -> Option<String>;

    /// Clear the current session. Returns `false` when there was none, in
    /// which case nothing is mutated.
    fn invalidate(&self) -> bool;
}

/// Session that is never logged in. Useful for anonymous calls.
pub struct NoSession;

impl SessionContext for NoSession {
    fn token(&self) -> Option<String> {
        None
    }

    fn invalidate(&self) -> bool {
        false
    }
}
