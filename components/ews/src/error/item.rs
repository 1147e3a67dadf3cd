use std::{borrow::Cow, fmt::Display};

use store::{tracing::error, StoreError};

use crate::{id::IdError, types::field::FieldUri};

use super::response::ResponseCode;

/// Failure of a single response slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemError {
    pub code: ResponseCode,
    pub description: Option<Cow<'static, str>>,
    pub field: Option<FieldUri>,
}

impl ItemError {
    pub fn new(code: ResponseCode, description: impl Into<Cow<'static, str>>) -> Self {
        ItemError {
            code,
            description: Some(description.into()),
            field: None,
        }
    }

    pub fn with_field(mut self, field: FieldUri) -> Self {
        self.field = field.into();
        self
    }

    pub fn item_not_found() -> Self {
        ItemError::new(
            ResponseCode::ErrorItemNotFound,
            "The specified object was not found in the store.",
        )
    }

    pub fn folder_not_found() -> Self {
        ItemError::new(
            ResponseCode::ErrorFolderNotFound,
            "The specified folder could not be found in the store.",
        )
    }

    pub fn malformed_id(description: impl Into<Cow<'static, str>>) -> Self {
        ItemError::new(ResponseCode::ErrorInvalidIdMalformed, description)
    }

    pub fn object_type_changed(class: &str) -> Self {
        ItemError::new(
            ResponseCode::ErrorObjectTypeChanged,
            format!(
                "The item class {:?} does not match the type of the item.",
                class
            ),
        )
        .with_field(FieldUri::ItemClass)
    }

    pub fn incorrect_update_property_count(count: usize) -> Self {
        ItemError::new(
            ResponseCode::ErrorIncorrectUpdatePropertyCount,
            format!(
                "An update must set exactly one property, found {} properties.",
                count
            ),
        )
    }

    pub fn invalid_property_set(field: FieldUri) -> Self {
        ItemError::new(
            ResponseCode::ErrorInvalidPropertySet,
            format!("Property {} cannot be set.", field.as_str()),
        )
        .with_field(field)
    }

    pub fn invalid_property_append(field: FieldUri) -> Self {
        ItemError::new(
            ResponseCode::ErrorInvalidPropertyAppend,
            format!("Property {} does not support append.", field.as_str()),
        )
        .with_field(field)
    }

    pub fn invalid_property_delete(field: FieldUri) -> Self {
        ItemError::new(
            ResponseCode::ErrorInvalidPropertyDelete,
            format!("Property {} cannot be deleted.", field.as_str()),
        )
        .with_field(field)
    }

    pub fn invalid_argument(description: impl Into<Cow<'static, str>>) -> Self {
        ItemError::new(ResponseCode::ErrorInvalidArgument, description)
    }

    pub fn invalid_recurrence(description: impl Into<Cow<'static, str>>) -> Self {
        ItemError::new(ResponseCode::ErrorInvalidRecurrence, description)
    }

    pub fn invalid_operation(description: impl Into<Cow<'static, str>>) -> Self {
        ItemError::new(ResponseCode::ErrorInvalidOperation, description)
    }

    pub fn end_before_start() -> Self {
        ItemError::new(
            ResponseCode::ErrorCalendarEndDateIsEarlierThanStartDate,
            "The end date cannot be earlier than the start date.",
        )
    }

    pub fn occurrence_out_of_range() -> Self {
        ItemError::new(
            ResponseCode::ErrorCalendarOccurrenceIndexIsOutOfRecurrenceRange,
            "The occurrence index is out of the recurrence range.",
        )
    }

    pub fn occurrence_deleted() -> Self {
        ItemError::new(
            ResponseCode::ErrorCalendarOccurrenceIsDeletedFromRecurrence,
            "The occurrence was deleted from the recurrence.",
        )
    }

    pub fn cannot_move_or_copy_occurrence() -> Self {
        ItemError::new(
            ResponseCode::ErrorCalendarCannotMoveOrCopyOccurrence,
            "Occurrences of a recurring series cannot be moved or copied.",
        )
    }

    pub fn irresolvable_conflict() -> Self {
        ItemError::new(
            ResponseCode::ErrorIrresolvableConflict,
            "The item has been modified since the change key was issued.",
        )
    }

    pub fn internal_error() -> Self {
        ItemError::new(
            ResponseCode::ErrorInternalServerError,
            "There was a problem while processing your request.",
        )
    }
}

impl Display for ItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.code, description),
            None => write!(f, "{}", self.code),
        }
    }
}

impl std::error::Error for ItemError {}

impl From<StoreError> for ItemError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(_) => ItemError::item_not_found(),
            StoreError::FolderNotFound(_) => ItemError::folder_not_found(),
            _ => {
                error!("Failed store operation: {}", error);
                ItemError::internal_error()
            }
        }
    }
}

impl From<IdError> for ItemError {
    fn from(error: IdError) -> Self {
        ItemError::malformed_id(error.to_string())
    }
}
