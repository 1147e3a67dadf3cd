use std::sync::Arc;

use ews::{
    error::response::ResponseCode,
    id::ItemIdentifier,
    mailbox::Mailbox,
    types::{
        common::{DateTimePrecision, Importance},
        folder::{DistinguishedFolderName, TargetFolderId},
        id::{FolderId, ItemId},
        item::{Contact, Item, ItemCommon, ItemKind, Message, PostItem},
        request::{CreateItemRequest, GetItemRequest, MessageDisposition},
    },
};
use store::chrono::{Timelike, Utc};

use super::{
    assert_code, assert_success, create, create_one, first_id, folder, get, get_item, message,
    message_with_body, RecordingObserver,
};

pub fn test(mailbox: Arc<Mailbox>, observer: Arc<RecordingObserver>) {
    create_and_get(&mailbox);
    class_mismatch(&mailbox);
    dispositions(&mailbox, &observer);
    invalid_references(&mailbox);
    date_time_precision(&mailbox);
}

fn create_and_get(mailbox: &Mailbox) {
    let drafts = folder(mailbox, DistinguishedFolderName::Drafts);
    let inbox = folder(mailbox, DistinguishedFolderName::Inbox);

    // Messages default to drafts
    let item_id = create_one(mailbox, None, message_with_body("Hello", "How are you?"));
    assert!(item_id.change_key.is_some());
    let item = get_item(mailbox, item_id.clone());
    let common = item.common();
    assert_eq!(item.kind(), ItemKind::Message);
    assert_eq!(common.item_id.as_ref(), Some(&item_id));
    assert_eq!(common.subject.as_deref(), Some("Hello"));
    assert_eq!(common.item_class.as_deref(), Some("IPM.Note"));
    assert_eq!(common.importance, Some(Importance::Normal));
    assert_eq!(common.is_read, Some(false));
    assert_eq!(common.display_to.as_deref(), Some("Jane Doe"));
    assert!(common.size.unwrap() > 0);
    assert!(common.date_time_created.is_some());
    assert!(common.date_time_sent.is_none());
    assert_eq!(
        common.parent_folder_id,
        Some(mailbox.folder_identifier(drafts).to_folder_id())
    );
    assert_eq!(
        ItemIdentifier::decode(&item_id.id)
            .unwrap()
            .location
            .folder_id,
        drafts
    );

    // Explicit target folder
    let item_id = create_one(
        mailbox,
        DistinguishedFolderName::Inbox.into(),
        message("In the inbox"),
    );
    assert_eq!(
        get_item(mailbox, item_id).common().parent_folder_id,
        Some(mailbox.folder_identifier(inbox).to_folder_id())
    );

    // Other kinds go to their own folders
    let item_id = create_one(
        mailbox,
        None,
        Item::Contact(Contact {
            display_name: "John Doe".to_string().into(),
            given_name: "John".to_string().into(),
            ..Default::default()
        }),
    );
    let contact = get_item(mailbox, item_id);
    assert_eq!(contact.common().item_class.as_deref(), Some("IPM.Contact"));
    assert_eq!(
        contact.common().parent_folder_id,
        Some(
            mailbox
                .folder_identifier(folder(mailbox, DistinguishedFolderName::Contacts))
                .to_folder_id()
        )
    );

    let item_id = create_one(mailbox, None, Item::PostItem(PostItem::default()));
    match get_item(mailbox, item_id) {
        Item::PostItem(post) => assert!(post.posted_time.is_some()),
        item => panic!("Unexpected item {:?}", item),
    }

    // Custom classes are accepted by the base item type only
    let item_id = create_one(
        mailbox,
        None,
        Item::Item(ItemCommon {
            item_class: "IPM.Custom.Thing".to_string().into(),
            ..Default::default()
        }),
    );
    assert_eq!(
        get_item(mailbox, item_id).common().item_class.as_deref(),
        Some("IPM.Custom.Thing")
    );
    let response = create(
        mailbox,
        None,
        vec![Item::Message(Message {
            common: ItemCommon {
                item_class: "IPM.StickyNote".to_string().into(),
                ..Default::default()
            },
            ..Default::default()
        })],
    );
    assert_code(&response[0], ResponseCode::ErrorObjectTypeChanged);

    // Read-only fields cannot be supplied
    let response = create(
        mailbox,
        None,
        vec![Item::Message(Message {
            common: ItemCommon {
                subject: "Backdated".to_string().into(),
                date_time_created: Utc::now().into(),
                ..Default::default()
            },
            ..Default::default()
        })],
    );
    assert_code(&response[0], ResponseCode::ErrorInvalidPropertySet);
}

fn class_mismatch(mailbox: &Mailbox) {
    let contacts = folder(mailbox, DistinguishedFolderName::Contacts);
    let num_contacts = mailbox.store.folder_len(contacts).unwrap();

    let responses = create(
        mailbox,
        DistinguishedFolderName::Contacts.into(),
        vec![
            Item::Contact(Contact {
                display_name: "First".to_string().into(),
                ..Default::default()
            }),
            Item::Contact(Contact {
                common: ItemCommon {
                    item_class: "IPM.Note".to_string().into(),
                    ..Default::default()
                },
                display_name: "Mismatch".to_string().into(),
                ..Default::default()
            }),
            Item::Contact(Contact {
                common: ItemCommon {
                    item_class: "IPM.Contact.Custom".to_string().into(),
                    ..Default::default()
                },
                display_name: "Third".to_string().into(),
                ..Default::default()
            }),
        ],
    );
    assert_eq!(responses.len(), 3);
    assert_success(&responses[0]);
    assert_code(&responses[1], ResponseCode::ErrorObjectTypeChanged);
    assert_success(&responses[2]);
    assert_eq!(
        mailbox.store.folder_len(contacts).unwrap(),
        num_contacts + 2
    );
}

fn dispositions(mailbox: &Mailbox, observer: &RecordingObserver) {
    let drafts = folder(mailbox, DistinguishedFolderName::Drafts);
    let sent_items = folder(mailbox, DistinguishedFolderName::SentItems);
    let num_drafts = mailbox.store.folder_len(drafts).unwrap();
    let num_sent = observer.sent.lock().len();

    // SendOnly stores nothing
    let response = mailbox
        .create_items(CreateItemRequest {
            message_disposition: MessageDisposition::SendOnly.into(),
            saved_item_folder_id: None,
            items: vec![message("Fire and forget")],
        })
        .pop()
        .unwrap();
    assert_success(&response);
    assert!(response.items.is_empty());
    assert_eq!(mailbox.store.folder_len(drafts).unwrap(), num_drafts);
    assert_eq!(observer.sent.lock().len(), num_sent + 1);

    // SendAndSaveCopy files the message in sent items
    let response = mailbox
        .create_items(CreateItemRequest {
            message_disposition: MessageDisposition::SendAndSaveCopy.into(),
            saved_item_folder_id: None,
            items: vec![message("Keep a copy")],
        })
        .pop()
        .unwrap();
    assert_success(&response);
    let item = get_item(mailbox, first_id(&response));
    assert_eq!(item.common().is_read, Some(true));
    assert!(item.common().date_time_sent.is_some());
    assert_eq!(
        item.common().parent_folder_id,
        Some(mailbox.folder_identifier(sent_items).to_folder_id())
    );
    assert_eq!(observer.sent.lock().len(), num_sent + 2);

    // Only messages can be sent
    let response = mailbox
        .create_items(CreateItemRequest {
            message_disposition: MessageDisposition::SendOnly.into(),
            saved_item_folder_id: None,
            items: vec![Item::Contact(Contact::default())],
        })
        .pop()
        .unwrap();
    assert_code(&response, ResponseCode::ErrorInvalidOperation);
    assert_eq!(observer.sent.lock().len(), num_sent + 2);
}

fn invalid_references(mailbox: &Mailbox) {
    // Unknown folders
    for target in [
        TargetFolderId::DistinguishedFolderId {
            id: "archive".to_string(),
        },
        TargetFolderId::FolderId(
            mailbox
                .folder_identifier(folder(mailbox, DistinguishedFolderName::Inbox) + 1000)
                .to_folder_id(),
        ),
    ] {
        let response = mailbox
            .create_items(CreateItemRequest {
                message_disposition: None,
                saved_item_folder_id: target.into(),
                items: vec![message("Nowhere")],
            })
            .pop()
            .unwrap();
        assert_code(&response, ResponseCode::ErrorFolderNotFound);
    }
    let response = mailbox
        .create_items(CreateItemRequest {
            message_disposition: None,
            saved_item_folder_id: TargetFolderId::FolderId(FolderId {
                id: "not-an-id".to_string(),
                change_key: None,
            })
            .into(),
            items: vec![message("Nowhere")],
        })
        .pop()
        .unwrap();
    assert_code(&response, ResponseCode::ErrorInvalidIdMalformed);

    // Malformed and dangling item identifiers
    let item_id = create_one(mailbox, None, message("Short lived"));
    let mut identifier = ItemIdentifier::parse(&item_id).unwrap();
    identifier.object_id += 1000;
    let responses = mailbox.get_items(
        GetItemRequest {
            item_ids: vec![
                ItemId {
                    id: "AAECAwQ=".to_string(),
                    change_key: None,
                }
                .into(),
                identifier.to_item_id().into(),
                item_id.into(),
            ],
        },
        DateTimePrecision::Seconds,
    );
    assert_code(&responses[0], ResponseCode::ErrorInvalidIdMalformed);
    assert_code(&responses[1], ResponseCode::ErrorItemNotFound);
    assert_success(&responses[2]);

    // Identifiers issued for another mailbox do not resolve
    let mut identifier = ItemIdentifier::parse(&first_id(&responses[2])).unwrap();
    identifier.location.moniker = "someone.else@example.org".to_string();
    assert_code(
        &get(mailbox, identifier.to_item_id()),
        ResponseCode::ErrorItemNotFound,
    );
}

fn date_time_precision(mailbox: &Mailbox) {
    let item_id = create_one(mailbox, None, message("Precise"));

    let seconds = mailbox
        .get_items(
            GetItemRequest {
                item_ids: vec![item_id.clone().into()],
            },
            DateTimePrecision::Seconds,
        )
        .pop()
        .unwrap();
    let created = seconds.items[0].common().date_time_created.unwrap();
    assert_eq!(created.nanosecond(), 0);

    let millis = get_item(mailbox, item_id);
    let created = millis.common().date_time_created.unwrap();
    assert_eq!(created.nanosecond() % 1_000_000, 0);
}
