use std::time::Duration;

use ews::{error::response::ResponseCode, types::item::Item};
use store::config::env_settings::EnvSettings;

use crate::{
    api::{response::Response, ProblemDetails},
    server::http::{init_ews_server, start_ews_server},
};

const BASE_URL: &str = "http://127.0.0.1:9080";

fn settings() -> EnvSettings {
    EnvSettings::from_args(
        [
            "--http-port=9080",
            "--bind-addr=127.0.0.1",
            "--max-items-per-request=2",
            "--mailbox-address=jdoe@example.org",
        ]
        .into_iter()
        .map(|arg| arg.to_string()),
    )
}

async fn post(client: &reqwest::Client, path: &str, body: serde_json::Value) -> reqwest::Response {
    client
        .post(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[actix_web::test]
async fn http_requests() {
    tracing_subscriber::fmt::try_init().ok();

    let (server, _housekeeper_rx) = init_ews_server(&settings());
    actix_web::rt::spawn(start_ews_server(server.clone(), settings()));
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = reqwest::Client::new();

    // Create and fetch a message
    let response = post(
        &client,
        "/ews",
        serde_json::json!({
            "Body": {
                "CreateItem": {
                    "Items": [
                        {"Message": {"Subject": "Over the wire"}},
                        {"Task": {"ItemClass": "IPM.Note"}}
                    ]
                }
            }
        }),
    )
    .await;
    assert_eq!(response.status(), 200);
    let response = response.json::<Response>().await.unwrap();
    let messages = response.messages("CreateItem").unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].is_success());
    assert_eq!(
        messages[1].response_code,
        ResponseCode::ErrorObjectTypeChanged
    );
    let item_id = messages[0].items[0].item_id().unwrap().clone();

    let response = post(
        &client,
        "/EWS/Exchange.asmx",
        serde_json::json!({
            "Header": {"DateTimePrecision": "Milliseconds"},
            "Body": {
                "GetItem": {
                    "ItemIds": [
                        {"ItemId": {"Id": item_id.id, "ChangeKey": item_id.change_key}},
                        {"ItemId": {"Id": "not an id"}}
                    ]
                }
            }
        }),
    )
    .await
    .json::<Response>()
    .await
    .unwrap();
    let messages = response.messages("GetItem").unwrap();
    assert!(messages[0].is_success());
    match &messages[0].items[0] {
        Item::Message(message) => {
            assert_eq!(message.common.subject.as_deref(), Some("Over the wire"));
            assert_eq!(message.common.item_class.as_deref(), Some("IPM.Note"));
            assert_eq!(message.common.item_id.as_ref(), Some(&item_id));
        }
        item => panic!("Unexpected item {:?}", item),
    }
    assert_eq!(
        messages[1].response_code,
        ResponseCode::ErrorInvalidIdMalformed
    );

    // Malformed requests
    let response = client
        .post(format!("{}/ews", BASE_URL))
        .header("Content-Type", "application/json")
        .body("{\"Body\": {\"Frobnicate\": {}}}")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let problem = response.json::<ProblemDetails>().await.unwrap();
    assert_eq!(problem.status, 400);
    assert_eq!(problem.title, "Invalid Request");

    // Too many items in one request
    let response = post(
        &client,
        "/ews",
        serde_json::json!({
            "Body": {
                "DeleteItem": {
                    "DeleteType": "HardDelete",
                    "ItemIds": [
                        {"ItemId": {"Id": item_id.id}},
                        {"ItemId": {"Id": item_id.id}},
                        {"ItemId": {"Id": item_id.id}}
                    ]
                }
            }
        }),
    )
    .await;
    assert_eq!(response.status(), 400);
    assert_eq!(
        response.json::<ProblemDetails>().await.unwrap().title,
        "Too Many Items"
    );

    // Unknown routes
    let response = post(&client, "/jmap", serde_json::json!({})).await;
    assert_eq!(response.status(), 404);

    // The item survived the rejected delete
    let response = post(
        &client,
        "/ews/",
        serde_json::json!({
            "Body": {
                "DeleteItem": {
                    "DeleteType": "MoveToDeletedItems",
                    "ItemIds": [{"ItemId": {"Id": item_id.id}}]
                }
            }
        }),
    )
    .await
    .json::<Response>()
    .await
    .unwrap();
    assert!(response.messages("DeleteItem").unwrap()[0].is_success());
}
