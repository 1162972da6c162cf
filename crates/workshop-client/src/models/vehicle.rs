use crate::models::client::ClientSummary;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Lpg,
    Electric,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [
        FuelType::Gasoline,
        FuelType::Diesel,
        FuelType::Lpg,
        FuelType::Electric,
    ];

    pub fn code(self) -> &'static str {
        match self {
            FuelType::Gasoline => "GASOLINE",
            FuelType::Diesel => "DIESEL",
            FuelType::Lpg => "LPG",
            FuelType::Electric => "ELECTRIC",
        }
    }

    /// Polish display label
    pub fn label(self) -> &'static str {
        match self {
            FuelType::Gasoline => "Benzyna",
            FuelType::Diesel => "Diesel",
            FuelType::Lpg => "LPG",
            FuelType::Electric => "Elektryczny",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelType::ALL
            .into_iter()
            .find(|f| f.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown fuel type: {s}"))
    }
}

/// A vehicle without its owners, as embedded in clients and repairs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub vin: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub licence_plate: Option<String>,
    #[serde(default, with = "crate::dates::optional")]
    pub production_date: Option<NaiveDate>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub engine_capacity: Option<f32>,
    #[serde(default)]
    pub fuel_type: Option<FuelType>,
    #[serde(default)]
    pub power: Option<i32>,
}

impl VehicleSummary {
    /// "Manufacturer Model"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.manufacturer, self.model)
            .trim()
            .to_string()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(flatten)]
    pub details: VehicleSummary,
    #[serde(default)]
    pub clients: Vec<ClientSummary>,
}

impl Vehicle {
    pub fn id(&self) -> Option<i64> {
        self.details.id
    }
}

impl std::ops::Deref for Vehicle {
    type Target = VehicleSummary;

    fn deref(&self) -> &VehicleSummary {
        &self.details
    }
}

/// Create/edit payload. Owners are referenced by id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleForm {
    #[serde(flatten)]
    pub details: VehicleSummary,
    #[serde(default)]
    pub clients: Vec<i64>,
}
