use super::Resource;
use crate::models::{Repair, RepairWithClients};
use serde::Serialize;
use workshop_http::{HttpService, Result};

pub const REPAIRS_PATH: &str = "/repairs";

#[derive(Clone)]
pub struct RepairService {
    resource: Resource,
}

impl RepairService {
    pub fn new(http: HttpService) -> Self {
        Self {
            resource: Resource::new(http, REPAIRS_PATH),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Repair>> {
        self.resource.get_all().await
    }

    pub async fn get_all_with_clients(&self) -> Result<Vec<RepairWithClients>> {
        self.resource
            .get_at(&format!("{}/withClients", REPAIRS_PATH))
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Repair> {
        self.resource.get_by_id(id).await
    }

    pub async fn get_by_id_with_clients(&self, id: i64) -> Result<RepairWithClients> {
        self.resource
            .get_at(&format!("{}/withClients", self.resource.item(id)))
            .await
    }

    pub async fn find_by_number(&self, number: &str) -> Result<Repair> {
        self.resource
            .get_at(&self.resource.lookup("number", number))
            .await
    }

    pub async fn create(&self, repair: &Repair) -> Result<Repair> {
        self.resource.create(repair).await
    }

    pub async fn update(&self, id: i64, repair: &Repair) -> Result<Repair> {
        self.resource.update(id, repair).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, id: i64, changes: &B) -> Result<Repair> {
        self.resource.patch(id, changes).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.resource.delete(id).await
    }
}
