use super::{
    field::FieldUri,
    folder::{AffectedTaskOccurrences, DisposalType, TargetFolderId},
    id::BaseItemId,
    item::Item,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum MessageDisposition {
    #[default]
    SaveOnly,
    SendOnly,
    SendAndSaveCopy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ConflictResolution {
    NeverOverwrite,
    #[default]
    AutoResolve,
    AlwaysOverwrite,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_disposition: Option<MessageDisposition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_item_folder_id: Option<TargetFolderId>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemRequest {
    pub item_ids: Vec<BaseItemId>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ItemChangeDescription {
    SetItemField {
        #[serde(rename = "FieldURI")]
        field_uri: FieldUri,
        #[serde(rename = "Item")]
        item: Item,
    },
    AppendToItemField {
        #[serde(rename = "FieldURI")]
        field_uri: FieldUri,
        #[serde(rename = "Item")]
        item: Item,
    },
    DeleteItemField {
        #[serde(rename = "FieldURI")]
        field_uri: FieldUri,
    },
}

impl ItemChangeDescription {
    pub fn field_uri(&self) -> FieldUri {
        match self {
            ItemChangeDescription::SetItemField { field_uri, .. }
            | ItemChangeDescription::AppendToItemField { field_uri, .. }
            | ItemChangeDescription::DeleteItemField { field_uri } => *field_uri,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemChange {
    pub item_id: BaseItemId,
    pub updates: Vec<ItemChangeDescription>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub conflict_resolution: ConflictResolution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_disposition: Option<MessageDisposition>,
    #[serde(default)]
    pub suppress_read_receipts: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_item_folder_id: Option<TargetFolderId>,
    pub item_changes: Vec<ItemChange>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemRequest {
    pub delete_type: DisposalType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_task_occurrences: Option<AffectedTaskOccurrences>,
    pub item_ids: Vec<BaseItemId>,
}

/// Shared by CopyItem and MoveItem.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RelocateItemRequest {
    pub to_folder_id: TargetFolderId,
    pub item_ids: Vec<BaseItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_new_item_ids: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarkAllItemsAsReadRequest {
    pub read_flag: bool,
    #[serde(default)]
    pub suppress_read_receipts: bool,
    pub folder_ids: Vec<TargetFolderId>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Restriction {
    SubjectContains(String),
    IsRead(bool),
}

impl Restriction {
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Restriction::SubjectContains(text) => item.subject().map_or(false, |subject| {
                subject.to_lowercase().contains(&text.to_lowercase())
            }),
            Restriction::IsRead(is_read) => item.is_read() == *is_read,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FindItemRequest {
    pub parent_folder_ids: Vec<TargetFolderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restriction: Option<Restriction>,
}
