//! Workshop Manager client: session handling, route guarding and typed
//! access to the clients, vehicles, repairs, files and document templates
//! of the workshop REST API.

pub mod app;
pub mod auth;
pub mod dates;
pub mod documents;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod session;

pub use app::WorkshopApp;
pub use auth::AuthStore;
pub use error::{AuthError, StorageError};
pub use router::{History, Navigation, NavigationGuard, Navigator, Router};
pub use session::{FileSessionStorage, MemorySessionStorage, SessionStorage, SessionStore, User};

pub use workshop_http::{ApiError, ApiResponse, Blob, ClientConfig, HttpService, ProgressCallback};
