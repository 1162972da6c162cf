use crate::models::vehicle::VehicleSummary;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A client without the vehicles list, as embedded in vehicles and repairs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub pesel: Option<String>,
    #[serde(default)]
    pub nip: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, with = "crate::dates::optional")]
    pub birth_date: Option<NaiveDate>,
}

impl ClientSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.surname)
            .trim()
            .to_string()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(flatten)]
    pub details: ClientSummary,
    #[serde(default)]
    pub vehicles: Vec<VehicleSummary>,
}

impl Client {
    pub fn id(&self) -> Option<i64> {
        self.details.id
    }
}

impl std::ops::Deref for Client {
    type Target = ClientSummary;

    fn deref(&self) -> &ClientSummary {
        &self.details
    }
}

/// Pick-list entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientName {
    pub id: i64,
    pub full_name: String,
}

impl ClientName {
    /// `None` for clients the server has not assigned an id yet.
    pub fn from_client(client: &Client) -> Option<Self> {
        Some(Self {
            id: client.id()?,
            full_name: client.full_name(),
        })
    }
}
