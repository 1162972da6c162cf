use crate::models::client::ClientSummary;
use crate::models::vehicle::VehicleSummary;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepairType {
    Body,
    Mechanical,
}

impl RepairType {
    pub const ALL: [RepairType; 2] = [RepairType::Body, RepairType::Mechanical];

    pub fn code(self) -> &'static str {
        match self {
            RepairType::Body => "BODY",
            RepairType::Mechanical => "MECHANICAL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepairType::Body => "Blacharsko-lakiernicza",
            RepairType::Mechanical => "Mechaniczna",
        }
    }
}

impl fmt::Display for RepairType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RepairType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RepairType::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown repair type: {s}"))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Order number shown on documents.
    #[serde(default)]
    pub number: String,
    #[serde(default, with = "crate::dates::optional")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "crate::dates::optional")]
    pub expected_end_date: Option<NaiveDate>,
    #[serde(default, rename = "type")]
    pub repair_type: Option<RepairType>,
    #[serde(default)]
    pub vehicle: Option<VehicleSummary>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RepairWithClients {
    #[serde(flatten)]
    pub repair: Repair,
    #[serde(default)]
    pub clients: Vec<ClientSummary>,
}

impl RepairWithClients {
    /// The client named on generated documents.
    pub fn primary_client(&self) -> Option<&ClientSummary> {
        self.clients.first()
    }
}

impl std::ops::Deref for RepairWithClients {
    type Target = Repair;

    fn deref(&self) -> &Repair {
        &self.repair
    }
}
