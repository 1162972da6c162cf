use super::Resource;
use crate::models::{Client, ClientName};
use serde::Serialize;
use workshop_http::{HttpService, Result};

pub const CLIENTS_PATH: &str = "/clients";

#[derive(Clone)]
pub struct ClientService {
    resource: Resource,
}

impl ClientService {
    pub fn new(http: HttpService) -> Self {
        Self {
            resource: Resource::new(http, CLIENTS_PATH),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Client>> {
        self.resource.get_all().await
    }

    /// `{id, fullName}` pairs for pick lists, built from the full listing.
    pub async fn get_id_and_name(&self) -> Result<Vec<ClientName>> {
        let clients = self.get_all().await?;
        Ok(clients.iter().filter_map(ClientName::from_client).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Client> {
        self.resource.get_by_id(id).await
    }

    pub async fn find_by_surname(&self, surname: &str) -> Result<Vec<Client>> {
        self.resource
            .get_at(&self.resource.lookup("surname", surname))
            .await
    }

    pub async fn create(&self, client: &Client) -> Result<Client> {
        self.resource.create(client).await
    }

    pub async fn update(&self, id: i64, client: &Client) -> Result<Client> {
        self.resource.update(id, client).await
    }

    /// Partial update with whichever fields `changes` carries.
    pub async fn patch<B: Serialize + ?Sized>(&self, id: i64, changes: &B) -> Result<Client> {
        self.resource.patch(id, changes).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.resource.delete(id).await
    }
}
