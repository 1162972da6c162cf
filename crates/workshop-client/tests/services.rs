//! Resource façades against a scripted network.

use http::Method;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use workshop_client::models::{FuelType, VehicleForm, VehicleSummary};
use workshop_client::{MemorySessionStorage, WorkshopApp};
use workshop_http::client::mock::MockNetwork;
use workshop_http::error::CONNECTION_ERROR_MESSAGE;
use workshop_http::{ApiError, ClientConfig, ProgressCallback, RawResponse};

const BASE: &str = "http://localhost:8080/api/v1";

fn logged_in(network: &Arc<MockNetwork>) -> WorkshopApp {
    WorkshopApp::with_network(
        network.clone(),
        ClientConfig::new(BASE),
        Arc::new(MemorySessionStorage::with_value(r#"{"token":"abc"}"#)),
    )
}

fn form(clients: Vec<i64>) -> VehicleForm {
    VehicleForm {
        details: VehicleSummary {
            vin: "WVWZZZ1JZXW000001".into(),
            manufacturer: "Volkswagen".into(),
            model: "Golf".into(),
            fuel_type: Some(FuelType::Diesel),
            ..Default::default()
        },
        clients,
    }
}

#[tokio::test]
async fn test_vehicle_create_links_clients() {
    let network = Arc::new(MockNetwork::new());
    network.respond_json(201, json!({"id": 5, "vin": "WVWZZZ1JZXW000001"}));
    network.respond_json(
        200,
        json!({"id": 5, "vin": "WVWZZZ1JZXW000001", "clients": [{"id": 1}, {"id": 2}]}),
    );
    let app = logged_in(&network);

    let vehicle = app.vehicles.create(&form(vec![1, 2])).await.unwrap();
    assert_eq!(vehicle.id(), Some(5));
    assert_eq!(vehicle.clients.len(), 2);

    let sent = network.requests();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].method, Method::POST);
    assert_eq!(sent[0].url, format!("{BASE}/vehicles"));
    let body = sent[0].json().unwrap();
    assert!(body.get("clients").is_none());
    assert_eq!(body["fuelType"], json!("DIESEL"));

    assert_eq!(sent[1].method, Method::PATCH);
    assert_eq!(sent[1].url, format!("{BASE}/vehicles/5"));
    assert_eq!(sent[1].json(), Some(json!({"clients": [1, 2]})));
}

#[tokio::test]
async fn test_vehicle_create_without_clients_is_one_call() {
    let network = Arc::new(MockNetwork::new());
    network.respond_json(201, json!({"id": 6}));
    let app = logged_in(&network);

    let vehicle = app.vehicles.create(&form(vec![])).await.unwrap();
    assert_eq!(vehicle.id(), Some(6));
    assert_eq!(network.requests().len(), 1);
}

#[tokio::test]
async fn test_vehicle_create_failure_skips_patch() {
    let network = Arc::new(MockNetwork::new());
    network.respond_json(400, json!({"message": "VIN zajęty"}));
    let app = logged_in(&network);

    let err = app.vehicles.create(&form(vec![1])).await.unwrap_err();
    assert_eq!(err.status(), 400);
    assert_eq!(err.message(), "VIN zajęty");
    assert_eq!(network.requests().len(), 1);
}

#[tokio::test]
async fn test_missing_client_passes_rejection_through() {
    let network = Arc::new(MockNetwork::new());
    network.respond_json(
        404,
        json!({"errorCode": 1300, "errorDescription": "Client not found", "error": "Not Found"}),
    );
    let app = logged_in(&network);

    let err = app.clients.get_by_id(99).await.unwrap_err();
    assert_eq!(err.status(), 404);
    assert_eq!(err.message(), "Klient nie został znaleziony.");
    assert_eq!(err.data().unwrap()["errorCode"], json!(1300));
    // a 404 keeps the session
    assert!(app.session.is_authenticated());
}

#[tokio::test]
async fn test_lookup_segments_are_encoded() {
    let network = Arc::new(MockNetwork::new());
    network.respond_json(200, json!([]));
    network.respond_json(200, json!({"id": 1}));
    network.respond_json(200, json!({"id": 2, "number": "Z/1/2024"}));
    let app = logged_in(&network);

    app.clients.find_by_surname("Nowak Kowalska").await.unwrap();
    app.vehicles.find_by_licence_plate("WA 123").await.unwrap();
    let repair = app.repairs.find_by_number("Z/1/2024").await.unwrap();
    assert_eq!(repair.number, "Z/1/2024");

    let urls: Vec<String> = network.requests().iter().map(|r| r.url.clone()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{BASE}/clients/surname/Nowak%20Kowalska"),
            format!("{BASE}/vehicles/plate/WA%20123"),
            format!("{BASE}/repairs/number/Z%2F1%2F2024"),
        ]
    );
}

#[tokio::test]
async fn test_repair_with_clients_paths() {
    let network = Arc::new(MockNetwork::new());
    network.respond_json(200, json!([{"id": 1, "number": "A", "clients": []}]));
    network.respond_json(
        200,
        json!({"id": 3, "number": "B", "type": "BODY", "clients": [{"id": 8, "firstname": "Ola", "surname": "Wiśniewska"}]}),
    );
    let app = logged_in(&network);

    assert_eq!(app.repairs.get_all_with_clients().await.unwrap().len(), 1);
    let repair = app.repairs.get_by_id_with_clients(3).await.unwrap();
    assert_eq!(repair.primary_client().unwrap().full_name(), "Ola Wiśniewska");

    let sent = network.requests();
    assert_eq!(sent[0].url, format!("{BASE}/repairs/withClients"));
    assert_eq!(sent[1].url, format!("{BASE}/repairs/3/withClients"));
}

#[tokio::test]
async fn test_client_names_projection() {
    let network = Arc::new(MockNetwork::new());
    network.respond_json(
        200,
        json!([
            {"id": 1, "firstname": "Jan", "surname": "Kowalski"},
            {"id": 2, "firstname": "Anna", "surname": "Nowak"}
        ]),
    );
    let app = logged_in(&network);

    let names = app.clients.get_id_and_name().await.unwrap();
    assert_eq!(names[1].id, 2);
    assert_eq!(names[1].full_name, "Anna Nowak");
}

#[tokio::test]
async fn test_delete_and_patch() {
    let network = Arc::new(MockNetwork::new());
    network.respond(204, "");
    network.respond_json(200, json!({"id": 4, "firstname": "Jan", "surname": "Nowy"}));
    let app = logged_in(&network);

    app.clients.delete(4).await.unwrap();
    let patched = app.clients.patch(4, &json!({"surname": "Nowy"})).await.unwrap();
    assert_eq!(patched.surname, "Nowy");

    let sent = network.requests();
    assert_eq!(sent[0].method, Method::DELETE);
    assert_eq!(sent[0].url, format!("{BASE}/clients/4"));
    assert_eq!(sent[1].method, Method::PATCH);
    assert_eq!(sent[1].header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn test_unexpected_shape_is_decode_error() {
    let network = Arc::new(MockNetwork::new());
    network.respond_json(200, json!({"not": "a list"}));
    let app = logged_in(&network);

    let err = app.repairs.get_all().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { status: 200, .. }));
}

#[tokio::test]
async fn test_file_upload_reports_progress() {
    let network = Arc::new(MockNetwork::new());
    network.respond_json(201, json!({"id": 10, "filename": "skan.pdf"}));
    let app = logged_in(&network);

    let seen = Arc::new(Mutex::new(Vec::<u8>::new()));
    let sink = seen.clone();
    let on_progress: ProgressCallback = Arc::new(move |p: u8| sink.lock().push(p));
    let res = app
        .files
        .upload(
            7,
            "skan.pdf",
            Some("application/pdf".into()),
            vec![0u8; 5000],
            Some(on_progress),
        )
        .await
        .unwrap();
    assert_eq!(res.status, 201);

    let seen = seen.lock().clone();
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(seen.last(), Some(&100));

    let sent = network.requests();
    assert_eq!(sent[0].url, format!("{BASE}/repairs/7/files"));
    assert_eq!(sent[0].header("Authorization"), Some("Bearer abc"));
    let form = sent[0].form.as_ref().unwrap();
    assert_eq!(form.parts[0].name, "file");
    assert_eq!(form.parts[0].file_name.as_deref(), Some("skan.pdf"));
}

#[tokio::test]
async fn test_upload_transport_failure() {
    let network = Arc::new(MockNetwork::new());
    network.fail_transport("connection refused");
    let app = logged_in(&network);

    let err = app
        .files
        .upload(7, "a.txt", None, "hello", None)
        .await
        .unwrap_err();
    assert_eq!(err.status(), 0);
    assert!(err.data().is_none());
    assert_eq!(err.message(), CONNECTION_ERROR_MESSAGE);
    assert!(app.session.is_authenticated());
}

#[tokio::test]
async fn test_file_download_keeps_bytes() {
    let network = Arc::new(MockNetwork::new());
    network.push(
        RawResponse::new(200, vec![0x25, 0x50, 0x44, 0x46])
            .with_header("Content-Type", "application/pdf")
            .with_header("Content-Disposition", "inline; filename=\"faktura.pdf\""),
    );
    let app = logged_in(&network);

    let blob = app.files.download(7, 10).await.unwrap();
    assert_eq!(&blob.data[..], b"%PDF");
    assert_eq!(blob.filename.as_deref(), Some("faktura.pdf"));
    assert_eq!(network.requests()[0].url, format!("{BASE}/repairs/7/files/10"));
}

#[tokio::test]
async fn test_templates() {
    let network = Arc::new(MockNetwork::new());
    network.respond_json(
        200,
        json!([{"name": "zlecenie", "displayName": "Zlecenie naprawy"}]),
    );
    network.respond(200, "<html><span data-field=\"client.fullName\"></span></html>");
    let app = logged_in(&network);

    let templates = app.documents.get_available_templates().await.unwrap();
    assert_eq!(templates[0].title(), "Zlecenie naprawy");

    let html = app.documents.get_template_content("zlecenie").await.unwrap();
    assert!(html.contains("data-field"));

    assert_eq!(
        app.documents.template_image_url("logo.png"),
        format!("{BASE}/documents/templates/images/logo.png")
    );
    // only the two fetches went out
    assert_eq!(network.requests().len(), 2);
    assert_eq!(
        network.requests()[1].url,
        format!("{BASE}/documents/templates/zlecenie")
    );
}
