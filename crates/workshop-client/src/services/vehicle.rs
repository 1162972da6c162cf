use super::Resource;
use crate::models::{Vehicle, VehicleForm};
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use workshop_http::{ApiError, HttpService, Result};

pub const VEHICLES_PATH: &str = "/vehicles";

#[derive(Clone)]
pub struct VehicleService {
    resource: Resource,
}

impl VehicleService {
    pub fn new(http: HttpService) -> Self {
        Self {
            resource: Resource::new(http, VEHICLES_PATH),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Vehicle>> {
        self.resource.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Vehicle> {
        self.resource.get_by_id(id).await
    }

    pub async fn find_by_vin(&self, vin: &str) -> Result<Vehicle> {
        self.resource.get_at(&self.resource.lookup("vin", vin)).await
    }

    pub async fn find_by_licence_plate(&self, plate: &str) -> Result<Vehicle> {
        self.resource
            .get_at(&self.resource.lookup("plate", plate))
            .await
    }

    /// Create the vehicle, then attach its owners.
    ///
    /// The vehicle is posted without `clients`; owners are linked with a
    /// second PATCH only when the first call succeeded and the list is
    /// non-empty.
    pub async fn create(&self, form: &VehicleForm) -> Result<Vehicle> {
        let mut body = serde_json::to_value(form)?;
        if let Some(fields) = body.as_object_mut() {
            fields.remove("clients");
        }

        let response = self.resource.http().post(VEHICLES_PATH, &body).await?;
        let status = response.status;
        let created: Vehicle = response.into_data()?;

        if form.clients.is_empty() {
            return Ok(created);
        }

        let id = created.id().ok_or_else(|| ApiError::Decode {
            status,
            detail: "created vehicle has no id".to_string(),
        })?;
        debug!("Linking {} client(s) to vehicle {}", form.clients.len(), id);
        self.add_clients(id, &form.clients).await
    }

    /// PATCH `{clients: ids}` onto an existing vehicle.
    pub async fn add_clients(&self, id: i64, client_ids: &[i64]) -> Result<Vehicle> {
        self.resource
            .patch(id, &json!({ "clients": client_ids }))
            .await
    }

    pub async fn update(&self, id: i64, form: &VehicleForm) -> Result<Vehicle> {
        self.resource.update(id, form).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, id: i64, changes: &B) -> Result<Vehicle> {
        self.resource.patch(id, changes).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.resource.delete(id).await
    }
}
