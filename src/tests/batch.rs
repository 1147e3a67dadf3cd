use std::sync::Arc;

use ews::{
    batch::SlotState,
    error::response::ResponseCode,
    mailbox::Mailbox,
    types::{
        common::DateTimePrecision,
        folder::DistinguishedFolderName,
        id::ItemId,
        request::{FindItemRequest, GetItemRequest, Restriction},
    },
};

use crate::api::request::{Operation, Request};

use super::{
    assert_code, assert_success, create, create_one, first_id, get_item, message,
    RecordingObserver,
};

pub fn test(mailbox: Arc<Mailbox>, observer: Arc<RecordingObserver>) {
    // Slots are reported in request order whatever their outcome
    let item_id = create_one(&mailbox, None, message("Present"));
    let responses = mailbox.get_items(
        GetItemRequest {
            item_ids: vec![
                item_id.clone().into(),
                ItemId {
                    id: "!!".to_string(),
                    change_key: None,
                }
                .into(),
                ItemId {
                    id: item_id.id.clone(),
                    change_key: "AAAA".to_string().into(),
                }
                .into(),
            ],
        },
        DateTimePrecision::Seconds,
    );
    assert_eq!(responses.len(), 3);
    assert_success(&responses[0]);
    assert_code(&responses[1], ResponseCode::ErrorInvalidIdMalformed);
    assert_code(&responses[2], ResponseCode::ErrorInvalidIdMalformed);

    let mut slots = observer
        .slots
        .lock()
        .iter()
        .filter(|(operation, _, _)| *operation == "GetItem")
        .map(|(_, index, state)| (*index, *state))
        .collect::<Vec<_>>();
    slots.sort_unstable_by_key(|(index, _)| *index);
    assert_eq!(
        slots,
        vec![
            (0, SlotState::Succeeded),
            (1, SlotState::Failed(ResponseCode::ErrorInvalidIdMalformed)),
            (2, SlotState::Failed(ResponseCode::ErrorInvalidIdMalformed)),
        ]
    );

    // Large batches keep their order
    let responses = create(
        &mailbox,
        DistinguishedFolderName::Inbox.into(),
        (0..50)
            .map(|num| message(&format!("Message {}", num)))
            .collect(),
    );
    assert_eq!(responses.len(), 50);
    let mut item_ids = Vec::with_capacity(50);
    for (num, response) in responses.iter().enumerate() {
        assert_success(response);
        let item_id = first_id(response);
        assert_eq!(
            get_item(&mailbox, item_id.clone()).subject(),
            Some(format!("Message {}", num).as_str())
        );
        item_ids.push(item_id.id);
    }
    item_ids.sort_unstable();
    item_ids.dedup();
    assert_eq!(item_ids.len(), 50);

    // Folder listings
    let responses = mailbox.find_items(
        FindItemRequest {
            parent_folder_ids: vec![
                DistinguishedFolderName::Inbox.into(),
                DistinguishedFolderName::Drafts.into(),
                DistinguishedFolderName::Tasks.into(),
            ],
            restriction: None,
        },
        DateTimePrecision::Seconds,
    );
    assert_eq!(
        responses
            .iter()
            .map(|response| response.items.len())
            .collect::<Vec<_>>(),
        vec![50, 1, 0]
    );
    let response = mailbox
        .find_items(
            FindItemRequest {
                parent_folder_ids: vec![DistinguishedFolderName::Inbox.into()],
                restriction: Restriction::SubjectContains("message 4".to_string()).into(),
            },
            DateTimePrecision::Seconds,
        )
        .pop()
        .unwrap();
    // "Message 4" and "Message 40" to "Message 49"
    assert_eq!(response.items.len(), 11);

    // Requests as they arrive on the wire
    let request = serde_json::from_value::<Request>(serde_json::json!({
        "Header": {"DateTimePrecision": "Milliseconds"},
        "Body": {
            "CreateItem": {
                "MessageDisposition": "SaveOnly",
                "SavedItemFolderId": {"DistinguishedFolderId": {"Id": "notes"}},
                "Items": [
                    {"Message": {"Subject": "From the wire", "Importance": "High"}},
                    {"Contact": {"ItemClass": "IPM.Note", "DisplayName": "Wrong class"}}
                ]
            }
        }
    }))
    .unwrap();
    assert_eq!(request.body.name(), "CreateItem");
    assert_eq!(request.body.len(), 2);
    let precision = request.header.unwrap().date_time_precision.unwrap();
    let responses = request.body.execute(&mailbox, precision);
    assert_success(&responses[0]);
    assert_code(&responses[1], ResponseCode::ErrorObjectTypeChanged);
    let item = get_item(&mailbox, first_id(&responses[0]));
    assert_eq!(item.subject(), Some("From the wire"));
    assert_eq!(
        item.common().parent_folder_id,
        Some(
            mailbox
                .folder_identifier(super::folder(&mailbox, DistinguishedFolderName::Notes))
                .to_folder_id()
        )
    );

    let request = serde_json::from_value::<Request>(serde_json::json!({
        "Body": {
            "UpdateItem": {
                "ConflictResolution": "AlwaysOverwrite",
                "ItemChanges": [{
                    "ItemId": {"ItemId": {"Id": item_id.id}},
                    "Updates": [{
                        "SetItemField": {
                            "FieldURI": "item:Subject",
                            "Item": {"Message": {"Subject": "Renamed"}}
                        }
                    }]
                }]
            }
        }
    }))
    .unwrap();
    assert!(matches!(request.body, Operation::UpdateItem(_)));
    assert_success(&request.body.execute(&mailbox, DateTimePrecision::Seconds)[0]);
    assert_eq!(
        get_item(&mailbox, super::without_change_key(&item_id)).subject(),
        Some("Renamed")
    );
}
