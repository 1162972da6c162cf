//! Records exchanged with the workshop REST API.
//!
//! Field names follow the API's camelCase JSON. Optional fields the server
//! may omit are `Option`s so partial records still decode.

pub mod client;
pub mod document;
pub mod file;
pub mod repair;
pub mod vehicle;

pub use client::{Client, ClientName, ClientSummary};
pub use document::TemplateInfo;
pub use file::FileInfo;
pub use repair::{Repair, RepairType, RepairWithClients};
pub use vehicle::{FuelType, Vehicle, VehicleForm, VehicleSummary};
