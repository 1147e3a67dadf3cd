pub mod batch;
pub mod copy_move;
pub mod http;
pub mod items;
pub mod mark_read;

use std::sync::Arc;

use ews::{
    batch::SlotState,
    config::EwsConfig,
    error::response::ResponseCode,
    mailbox::Mailbox,
    observer::EventObserver,
    types::{
        common::{Body, DateTimePrecision, EmailAddress},
        folder::{DisposalType, DistinguishedFolderName, TargetFolderId},
        id::{BaseItemId, ItemId},
        item::{Item, ItemCommon, Message},
        request::{
            ConflictResolution, CreateItemRequest, DeleteItemRequest, GetItemRequest,
            ItemChange, ItemChangeDescription, UpdateItemRequest,
        },
        response::ResponseMessage,
    },
};
use store::{config::store::StoreConfig, parking_lot::Mutex, FolderId};

#[derive(Default)]
pub struct RecordingObserver {
    pub sent: Mutex<Vec<Item>>,
    pub read_receipts: Mutex<Vec<Item>>,
    pub slots: Mutex<Vec<(&'static str, usize, SlotState)>>,
}

impl EventObserver for RecordingObserver {
    fn message_sent(&self, item: &Item) {
        self.sent.lock().push(item.clone());
    }

    fn read_receipt(&self, item: &Item) {
        self.read_receipts.lock().push(item.clone());
    }

    fn slot_completed(&self, operation: &'static str, index: usize, state: &SlotState) {
        self.slots.lock().push((operation, index, *state));
    }
}

pub fn init_mailbox() -> (Arc<Mailbox>, Arc<RecordingObserver>) {
    let observer = Arc::new(RecordingObserver::default());
    let mailbox = Mailbox::new(StoreConfig::default(), EwsConfig::default())
        .unwrap()
        .with_observer(observer.clone());
    (Arc::new(mailbox), observer)
}

#[test]
fn mailbox_tests() {
    tracing_subscriber::fmt::try_init().ok();

    for test in [
        items::test,
        update::test,
        copy_move::test,
        disposal::test,
        mark_read::test,
        recurrence::test,
        batch::test,
        concurrency::test,
    ] {
        let (mailbox, observer) = init_mailbox();
        test(mailbox, observer);
    }
}

pub fn message(subject: &str) -> Item {
    Item::Message(Message {
        common: ItemCommon {
            subject: subject.to_string().into(),
            ..Default::default()
        },
        ..Default::default()
    })
}

pub fn message_with_body(subject: &str, body: &str) -> Item {
    Item::Message(Message {
        common: ItemCommon {
            subject: subject.to_string().into(),
            body: Body::text(body).into(),
            ..Default::default()
        },
        to_recipients: vec![EmailAddress::new(Some("Jane Doe"), "jane@example.org")].into(),
        ..Default::default()
    })
}

pub fn folder(mailbox: &Mailbox, name: DistinguishedFolderName) -> FolderId {
    mailbox.distinguished_folder(name).unwrap()
}

pub fn create(
    mailbox: &Mailbox,
    folder: Option<DistinguishedFolderName>,
    items: Vec<Item>,
) -> Vec<ResponseMessage> {
    mailbox.create_items(CreateItemRequest {
        message_disposition: None,
        saved_item_folder_id: folder.map(TargetFolderId::from),
        items,
    })
}

/// Creates a single item and returns its identifier.
pub fn create_one(mailbox: &Mailbox, folder: Option<DistinguishedFolderName>, item: Item) -> ItemId {
    let response = create(mailbox, folder, vec![item]).pop().unwrap();
    assert_success(&response);
    first_id(&response)
}

pub fn get(mailbox: &Mailbox, item_id: impl Into<BaseItemId>) -> ResponseMessage {
    mailbox
        .get_items(
            GetItemRequest {
                item_ids: vec![item_id.into()],
            },
            DateTimePrecision::Milliseconds,
        )
        .pop()
        .unwrap()
}

/// Fetches a single item, panicking if the request fails.
pub fn get_item(mailbox: &Mailbox, item_id: impl Into<BaseItemId>) -> Item {
    let mut response = get(mailbox, item_id);
    assert_success(&response);
    assert_eq!(response.items.len(), 1);
    response.items.pop().unwrap()
}

pub fn update(
    mailbox: &Mailbox,
    item_id: impl Into<BaseItemId>,
    resolution: ConflictResolution,
    updates: Vec<ItemChangeDescription>,
) -> ResponseMessage {
    mailbox
        .update_items(UpdateItemRequest {
            conflict_resolution: resolution,
            message_disposition: None,
            suppress_read_receipts: false,
            saved_item_folder_id: None,
            item_changes: vec![ItemChange {
                item_id: item_id.into(),
                updates,
            }],
        })
        .pop()
        .unwrap()
}

pub fn delete(
    mailbox: &Mailbox,
    item_id: impl Into<BaseItemId>,
    delete_type: DisposalType,
) -> ResponseMessage {
    mailbox
        .delete_items(DeleteItemRequest {
            delete_type,
            affected_task_occurrences: None,
            item_ids: vec![item_id.into()],
        })
        .pop()
        .unwrap()
}

pub fn first_id(response: &ResponseMessage) -> ItemId {
    response.items[0].item_id().unwrap().clone()
}

pub fn without_change_key(item_id: &ItemId) -> ItemId {
    ItemId {
        id: item_id.id.clone(),
        change_key: None,
    }
}

pub fn assert_success(response: &ResponseMessage) {
    assert!(
        response.is_success(),
        "Expected success, got {:?}: {:?}",
        response.response_code,
        response.message_text
    );
}

pub fn assert_code(response: &ResponseMessage, code: ResponseCode) {
    assert_eq!(
        response.response_code, code,
        "Unexpected response: {:?}",
        response.message_text
    );
    assert!(response.items.is_empty());
}
