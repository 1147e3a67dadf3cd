use std::sync::Arc;

use ews::{
    error::response::ResponseCode,
    mailbox::Mailbox,
    types::{
        folder::{DistinguishedFolderName, TargetFolderId},
        id::BaseItemId,
        request::RelocateItemRequest,
    },
};

use super::{
    assert_code, assert_success, create_one, first_id, folder, get, get_item, message,
    RecordingObserver,
};

fn relocate(to_folder_id: TargetFolderId, item_ids: Vec<BaseItemId>) -> RelocateItemRequest {
    RelocateItemRequest {
        to_folder_id,
        item_ids,
        return_new_item_ids: None,
    }
}

pub fn test(mailbox: Arc<Mailbox>, _observer: Arc<RecordingObserver>) {
    let drafts = folder(&mailbox, DistinguishedFolderName::Drafts);
    let inbox = folder(&mailbox, DistinguishedFolderName::Inbox);
    let junk = folder(&mailbox, DistinguishedFolderName::JunkEmail);
    let inbox_id = mailbox.folder_identifier(inbox).to_folder_id();

    // Copies are new items, the original stays where it was
    let original_id = create_one(&mailbox, None, message("Quarterly report"));
    let response = mailbox
        .copy_items(relocate(
            DistinguishedFolderName::Inbox.into(),
            vec![original_id.clone().into()],
        ))
        .pop()
        .unwrap();
    assert_success(&response);
    let copy_id = first_id(&response);
    assert_ne!(copy_id.id, original_id.id);
    let copy = get_item(&mailbox, copy_id.clone());
    assert_eq!(copy.subject(), Some("Quarterly report"));
    assert_eq!(copy.common().parent_folder_id, Some(inbox_id.clone()));
    assert_eq!(
        get_item(&mailbox, original_id.clone())
            .common()
            .parent_folder_id,
        Some(mailbox.folder_identifier(drafts).to_folder_id())
    );
    assert_eq!(mailbox.store.folder_len(drafts).unwrap(), 1);
    assert_eq!(mailbox.store.folder_len(inbox).unwrap(), 1);

    // Moved items are issued a new identifier
    let response = mailbox
        .move_items(relocate(
            TargetFolderId::FolderId(mailbox.folder_identifier(junk).to_folder_id()),
            vec![original_id.clone().into()],
        ))
        .pop()
        .unwrap();
    assert_success(&response);
    let moved_id = first_id(&response);
    assert_ne!(moved_id.id, original_id.id);
    assert_code(&get(&mailbox, original_id.clone()), ResponseCode::ErrorItemNotFound);
    assert_eq!(
        get_item(&mailbox, moved_id.clone())
            .common()
            .parent_folder_id,
        Some(mailbox.folder_identifier(junk).to_folder_id())
    );
    assert_eq!(mailbox.store.folder_len(drafts).unwrap(), 0);

    // New identifiers can be omitted from the response
    let response = mailbox
        .move_items(RelocateItemRequest {
            to_folder_id: DistinguishedFolderName::Inbox.into(),
            item_ids: vec![moved_id.clone().into()],
            return_new_item_ids: false.into(),
        })
        .pop()
        .unwrap();
    assert_success(&response);
    assert!(response.items.is_empty());
    assert_eq!(mailbox.store.folder_len(junk).unwrap(), 0);
    assert_eq!(mailbox.store.folder_len(inbox).unwrap(), 2);

    // Unknown destinations fail before anything is touched
    let response = mailbox
        .copy_items(relocate(
            TargetFolderId::DistinguishedFolderId {
                id: "archive".to_string(),
            },
            vec![copy_id.clone().into()],
        ))
        .pop()
        .unwrap();
    assert_code(&response, ResponseCode::ErrorFolderNotFound);
    assert_eq!(mailbox.store.folder_len(inbox).unwrap(), 2);

    // Each slot succeeds or fails on its own
    let responses = mailbox.move_items(relocate(
        DistinguishedFolderName::DeletedItems.into(),
        vec![
            copy_id.into(),
            original_id.into(),
            moved_id.into(),
        ],
    ));
    assert_eq!(responses.len(), 3);
    assert_success(&responses[0]);
    assert_code(&responses[1], ResponseCode::ErrorItemNotFound);
    assert_code(&responses[2], ResponseCode::ErrorItemNotFound);
    assert_eq!(
        mailbox
            .store
            .folder_len(folder(&mailbox, DistinguishedFolderName::DeletedItems))
            .unwrap(),
        1
    );
}
