//! Field values for printable document templates.
//!
//! Templates mark fillable elements with `data-field="<key>"`; this module
//! produces the value for every key from a repair, its client and vehicle.

use crate::dates::format_optional_date;
use crate::models::{ClientSummary, Repair, VehicleSummary};
use serde_json::{Map, Value};

pub type DocumentData = Map<String, Value>;

fn text(value: Option<&str>) -> Value {
    Value::String(value.unwrap_or_default().to_string())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn full_address(client: &ClientSummary) -> String {
    let mut parts = Vec::new();
    if let Some(address) = non_empty(&client.address) {
        parts.push(address.to_string());
    }
    let postal = non_empty(&client.postal_code);
    let city = non_empty(&client.city);
    if postal.is_some() || city.is_some() {
        parts.push(
            format!("{} {}", postal.unwrap_or_default(), city.unwrap_or_default())
                .trim()
                .to_string(),
        );
    }
    parts.join(", ")
}

/// "postal, city" with dangling separators dropped.
fn address_line1(client: &ClientSummary) -> String {
    let line = format!(
        "{}, {}",
        non_empty(&client.postal_code).unwrap_or_default(),
        non_empty(&client.city).unwrap_or_default()
    );
    let line = line.trim();
    let line = line.strip_prefix(',').map(str::trim_start).unwrap_or(line);
    let line = line.strip_suffix(',').map(str::trim_end).unwrap_or(line);
    line.to_string()
}

pub fn map_repair_to_document_data(
    repair: Option<&Repair>,
    client: Option<&ClientSummary>,
    vehicle: Option<&VehicleSummary>,
) -> DocumentData {
    let number = repair.map(|r| r.number.as_str()).filter(|n| !n.is_empty());
    let vehicle_name = vehicle.map(|v| v.display_name()).unwrap_or_default();

    let mut data = Map::new();
    let mut set = |key: &str, value: Value| {
        data.insert(key.to_string(), value);
    };

    set("repair.orderNumber", text(number));
    set(
        "repair.orderDate",
        Value::String(format_optional_date(repair.and_then(|r| r.start_date))),
    );
    // filled in by hand on the printed form
    set("repair.insuranceCompany", text(None));
    set("repair.damageNumber", text(None));
    set("repair.damageDate", text(None));

    set(
        "client.fullName",
        Value::String(client.map(|c| c.full_name()).unwrap_or_default()),
    );
    set(
        "client.address",
        Value::String(client.map(full_address).unwrap_or_default()),
    );
    set(
        "client.addressLine1",
        Value::String(client.map(address_line1).unwrap_or_default()),
    );
    set(
        "client.addressLine2",
        text(client.and_then(|c| non_empty(&c.address))),
    );
    set(
        "client.peselOrNip",
        text(client.and_then(|c| non_empty(&c.nip).or(non_empty(&c.pesel)))),
    );
    set(
        "client.phone",
        text(client.and_then(|c| non_empty(&c.phone_number))),
    );
    set("client.nip", text(client.and_then(|c| non_empty(&c.nip))));
    set("client.isVatPayer", Value::Bool(false));
    set("client.canDeductVat", Value::Bool(false));

    set("vehicle", Value::String(vehicle_name.clone()));
    set("vehicle.brandModel", Value::String(vehicle_name));
    set(
        "vehicle.registrationNumber",
        text(vehicle.and_then(|v| non_empty(&v.licence_plate))),
    );

    set("document.number", text(number));
    data
}

/// Every field present, all blank.
pub fn empty_document_data() -> DocumentData {
    map_repair_to_document_data(None, None, None)
}
