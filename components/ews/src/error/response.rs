use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ResponseClass {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ResponseCode {
    NoError,
    ErrorItemNotFound,
    ErrorObjectTypeChanged,
    ErrorIncorrectUpdatePropertyCount,
    ErrorFolderNotFound,
    ErrorInvalidIdMalformed,
    ErrorInvalidPropertySet,
    ErrorInvalidPropertyAppend,
    ErrorInvalidPropertyDelete,
    ErrorInvalidArgument,
    ErrorInvalidRecurrence,
    ErrorCalendarEndDateIsEarlierThanStartDate,
    ErrorCalendarOccurrenceIndexIsOutOfRecurrenceRange,
    ErrorCalendarOccurrenceIsDeletedFromRecurrence,
    ErrorCalendarCannotMoveOrCopyOccurrence,
    ErrorIrresolvableConflict,
    ErrorInvalidOperation,
    ErrorInternalServerError,
}

impl ResponseCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NoError",
            ResponseCode::ErrorItemNotFound => "ErrorItemNotFound",
            ResponseCode::ErrorObjectTypeChanged => "ErrorObjectTypeChanged",
            ResponseCode::ErrorIncorrectUpdatePropertyCount => {
                "ErrorIncorrectUpdatePropertyCount"
            }
            ResponseCode::ErrorFolderNotFound => "ErrorFolderNotFound",
            ResponseCode::ErrorInvalidIdMalformed => "ErrorInvalidIdMalformed",
            ResponseCode::ErrorInvalidPropertySet => "ErrorInvalidPropertySet",
            ResponseCode::ErrorInvalidPropertyAppend => "ErrorInvalidPropertyAppend",
            ResponseCode::ErrorInvalidPropertyDelete => "ErrorInvalidPropertyDelete",
            ResponseCode::ErrorInvalidArgument => "ErrorInvalidArgument",
            ResponseCode::ErrorInvalidRecurrence => "ErrorInvalidRecurrence",
            ResponseCode::ErrorCalendarEndDateIsEarlierThanStartDate => {
                "ErrorCalendarEndDateIsEarlierThanStartDate"
            }
            ResponseCode::ErrorCalendarOccurrenceIndexIsOutOfRecurrenceRange => {
                "ErrorCalendarOccurrenceIndexIsOutOfRecurrenceRange"
            }
            ResponseCode::ErrorCalendarOccurrenceIsDeletedFromRecurrence => {
                "ErrorCalendarOccurrenceIsDeletedFromRecurrence"
            }
            ResponseCode::ErrorCalendarCannotMoveOrCopyOccurrence => {
                "ErrorCalendarCannotMoveOrCopyOccurrence"
            }
            ResponseCode::ErrorIrresolvableConflict => "ErrorIrresolvableConflict",
            ResponseCode::ErrorInvalidOperation => "ErrorInvalidOperation",
            ResponseCode::ErrorInternalServerError => "ErrorInternalServerError",
        }
    }

    pub fn class(&self) -> ResponseClass {
        if let ResponseCode::NoError = self {
            ResponseClass::Success
        } else {
            ResponseClass::Error
        }
    }
}

impl Display for ResponseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
