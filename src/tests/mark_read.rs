use std::sync::Arc;

use ews::{
    error::response::ResponseCode,
    mailbox::Mailbox,
    types::{
        folder::{DistinguishedFolderName, TargetFolderId},
        item::{Item, ItemCommon, Message},
        request::MarkAllItemsAsReadRequest,
        response::ResponseMessage,
    },
};

use super::{
    assert_code, assert_success, create_one, get_item, message, without_change_key,
    RecordingObserver,
};

fn mark_all(
    mailbox: &Mailbox,
    read_flag: bool,
    suppress_read_receipts: bool,
    folder_ids: Vec<TargetFolderId>,
) -> Vec<ResponseMessage> {
    mailbox.mark_all_items_as_read(MarkAllItemsAsReadRequest {
        read_flag,
        suppress_read_receipts,
        folder_ids,
    })
}

pub fn test(mailbox: Arc<Mailbox>, observer: Arc<RecordingObserver>) {
    let inbox = Some(DistinguishedFolderName::Inbox);
    let unread_id = create_one(&mailbox, inbox, message("Unread"));
    let read_id = create_one(
        &mailbox,
        inbox,
        Item::Message(Message {
            common: ItemCommon {
                subject: "Already read".to_string().into(),
                is_read: true.into(),
                ..Default::default()
            },
            ..Default::default()
        }),
    );
    let receipt_id = create_one(
        &mailbox,
        inbox,
        Item::Message(Message {
            common: ItemCommon {
                subject: "Receipt requested".to_string().into(),
                ..Default::default()
            },
            is_read_receipt_requested: true.into(),
            ..Default::default()
        }),
    );
    let draft_id = create_one(&mailbox, None, message("Draft"));

    let responses = mark_all(
        &mailbox,
        true,
        false,
        vec![
            DistinguishedFolderName::Inbox.into(),
            DistinguishedFolderName::Drafts.into(),
            TargetFolderId::DistinguishedFolderId {
                id: "archive".to_string(),
            },
        ],
    );
    assert_eq!(responses.len(), 3);
    assert_success(&responses[0]);
    assert_success(&responses[1]);
    assert_code(&responses[2], ResponseCode::ErrorFolderNotFound);

    for item_id in [&unread_id, &read_id, &receipt_id, &draft_id] {
        assert!(get_item(&mailbox, without_change_key(item_id)).is_read());
    }

    // Items already in the requested state keep their change key
    assert_eq!(
        get_item(&mailbox, without_change_key(&read_id))
            .item_id()
            .unwrap(),
        &read_id
    );
    assert_ne!(
        get_item(&mailbox, without_change_key(&unread_id))
            .item_id()
            .unwrap(),
        &unread_id
    );
    assert_eq!(observer.read_receipts.lock().len(), 1);
    assert_eq!(
        observer.read_receipts.lock()[0].subject(),
        Some("Receipt requested")
    );

    // Marking unread never produces receipts
    let responses = mark_all(
        &mailbox,
        false,
        true,
        vec![DistinguishedFolderName::Inbox.into()],
    );
    assert_success(&responses[0]);
    for item_id in [&unread_id, &read_id, &receipt_id] {
        assert!(!get_item(&mailbox, without_change_key(item_id)).is_read());
    }
    assert!(get_item(&mailbox, without_change_key(&draft_id)).is_read());
    assert_eq!(observer.read_receipts.lock().len(), 1);

    // Suppressed receipts
    let responses = mark_all(
        &mailbox,
        true,
        true,
        vec![DistinguishedFolderName::Inbox.into()],
    );
    assert_success(&responses[0]);
    assert!(get_item(&mailbox, without_change_key(&receipt_id)).is_read());
    assert_eq!(observer.read_receipts.lock().len(), 1);

    // Empty folders succeed
    assert_success(
        &mark_all(
            &mailbox,
            true,
            false,
            vec![DistinguishedFolderName::Notes.into()],
        )[0],
    );
}
