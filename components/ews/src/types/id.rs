use store::chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ItemId {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "ChangeKey", default, skip_serializing_if = "Option::is_none")]
    pub change_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FolderId {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "ChangeKey", default, skip_serializing_if = "Option::is_none")]
    pub change_key: Option<String>,
}

/// The identifier forms accepted wherever a request references items.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BaseItemId {
    ItemId(ItemId),
    OccurrenceItemId {
        #[serde(rename = "RecurringMasterId")]
        recurring_master_id: String,
        #[serde(rename = "ChangeKey", default, skip_serializing_if = "Option::is_none")]
        change_key: Option<String>,
        #[serde(rename = "InstanceIndex")]
        instance_index: u32,
    },
    RecurringMasterItemId {
        #[serde(rename = "OccurrenceId")]
        occurrence_id: String,
        #[serde(rename = "ChangeKey", default, skip_serializing_if = "Option::is_none")]
        change_key: Option<String>,
    },
    RecurringMasterItemIdRanges {
        #[serde(rename = "Id")]
        id: String,
        #[serde(rename = "ChangeKey", default, skip_serializing_if = "Option::is_none")]
        change_key: Option<String>,
        #[serde(rename = "Ranges")]
        ranges: Vec<OccurrencesRange>,
    },
}

impl From<ItemId> for BaseItemId {
    fn from(id: ItemId) -> Self {
        BaseItemId::ItemId(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OccurrencesRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_original_start_time: Option<bool>,
}
