use crate::auth::AuthStore;
use crate::router::{History, NavigationGuard, Router};
use crate::services::{ClientService, DocumentService, FileService, RepairService, VehicleService};
use crate::session::{FileSessionStorage, SessionStorage, SessionStore};
use std::sync::Arc;
use workshop_http::{ApiNetwork, ClientConfig, HttpService, Result};

/// Everything a front end needs, sharing one session and one history.
pub struct WorkshopApp {
    pub history: Arc<History>,
    pub session: Arc<SessionStore>,
    pub http: HttpService,
    pub auth: AuthStore,
    pub router: Router,
    pub clients: ClientService,
    pub vehicles: VehicleService,
    pub repairs: RepairService,
    pub files: FileService,
    pub documents: DocumentService,
}

impl WorkshopApp {
    /// Base URL from the environment or persisted config, session from the
    /// workshop root.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::new(workshop_common::api_base_url());
        Self::new(config, Arc::new(FileSessionStorage::default_location()))
    }

    pub fn new(config: ClientConfig, storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let history = Arc::new(History::new());
        let session = Arc::new(SessionStore::hydrate(storage, history.clone()));
        let http = HttpService::new(config, session.clone())?;
        Ok(Self::assemble(history, session, http))
    }

    /// Same wiring over a caller-supplied network.
    pub fn with_network(
        network: Arc<dyn ApiNetwork>,
        config: ClientConfig,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let history = Arc::new(History::new());
        let session = Arc::new(SessionStore::hydrate(storage, history.clone()));
        let http = HttpService::with_network(network, session.clone(), config);
        Self::assemble(history, session, http)
    }

    fn assemble(history: Arc<History>, session: Arc<SessionStore>, http: HttpService) -> Self {
        Self {
            auth: AuthStore::new(http.clone(), session.clone()),
            router: Router::new(NavigationGuard::new(session.clone()), history.clone()),
            clients: ClientService::new(http.clone()),
            vehicles: VehicleService::new(http.clone()),
            repairs: RepairService::new(http.clone()),
            files: FileService::new(http.clone()),
            documents: DocumentService::new(http.clone()),
            history,
            session,
            http,
        }
    }
}
