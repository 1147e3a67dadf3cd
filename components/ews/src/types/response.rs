use crate::error::{
    item::ItemError,
    response::{ResponseClass, ResponseCode},
};

use super::{field::FieldUri, item::Item};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConflictResults {
    pub count: u32,
}

/// One slot of a batch response.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseMessage {
    pub response_class: ResponseClass,
    pub response_code: ResponseCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_text: Option<String>,
    #[serde(rename = "FieldURI", default, skip_serializing_if = "Option::is_none")]
    pub field_uri: Option<FieldUri>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_results: Option<ConflictResults>,
}

impl ResponseMessage {
    pub fn success() -> Self {
        ResponseMessage {
            response_class: ResponseClass::Success,
            response_code: ResponseCode::NoError,
            message_text: None,
            field_uri: None,
            items: Vec::new(),
            conflict_results: None,
        }
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        ResponseMessage {
            items,
            ..ResponseMessage::success()
        }
    }

    pub fn with_item(item: Item) -> Self {
        ResponseMessage::with_items(vec![item])
    }

    pub fn with_conflicts(mut self, count: u32) -> Self {
        self.conflict_results = ConflictResults { count }.into();
        self
    }

    pub fn is_success(&self) -> bool {
        self.response_class == ResponseClass::Success
    }
}

impl From<ItemError> for ResponseMessage {
    fn from(error: ItemError) -> Self {
        ResponseMessage {
            response_class: error.code.class(),
            response_code: error.code,
            message_text: error.description.map(|d| d.into_owned()),
            field_uri: error.field,
            items: Vec::new(),
            conflict_results: None,
        }
    }
}
