//! Thin typed façades over the REST resources.
//!
//! Every call is one HTTP request whose `data` is decoded into the return
//! type. Rejections from the HTTP layer pass through untouched.

mod client;
mod document;
mod file;
mod repair;
mod vehicle;

pub use client::ClientService;
pub use document::DocumentService;
pub use file::FileService;
pub use repair::RepairService;
pub use vehicle::VehicleService;

use serde::de::DeserializeOwned;
use serde::Serialize;
use workshop_http::client::encode_segment;
use workshop_http::{HttpService, Result};

/// CRUD on one collection path such as `/clients`.
#[derive(Clone)]
pub(crate) struct Resource {
    http: HttpService,
    path: &'static str,
}

impl Resource {
    pub(crate) fn new(http: HttpService, path: &'static str) -> Self {
        Self { http, path }
    }

    pub(crate) fn http(&self) -> &HttpService {
        &self.http
    }

    pub(crate) fn item(&self, id: i64) -> String {
        format!("{}/{}", self.path, id)
    }

    /// `<path>/<sub>/<value>` with `value` percent-encoded.
    pub(crate) fn lookup(&self, sub: &str, value: &str) -> String {
        format!("{}/{}/{}", self.path, sub, encode_segment(value))
    }

    pub(crate) async fn get_at<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.http.get(endpoint).await?.into_data()
    }

    pub(crate) async fn get_all<T: DeserializeOwned>(&self) -> Result<T> {
        self.get_at(self.path).await
    }

    pub(crate) async fn get_by_id<T: DeserializeOwned>(&self, id: i64) -> Result<T> {
        self.get_at(&self.item(id)).await
    }

    pub(crate) async fn create<B, T>(&self, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.http.post(self.path, body).await?.into_data()
    }

    pub(crate) async fn update<B, T>(&self, id: i64, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.http.put(&self.item(id), body).await?.into_data()
    }

    pub(crate) async fn patch<B, T>(&self, id: i64, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.http.patch(&self.item(id), body).await?.into_data()
    }

    pub(crate) async fn delete(&self, id: i64) -> Result<()> {
        self.http.delete(&self.item(id)).await?;
        Ok(())
    }
}
