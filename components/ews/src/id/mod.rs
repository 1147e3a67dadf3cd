pub mod change_key;
pub mod codec;
pub mod compression;

use std::fmt::Display;

use store::{
    chrono::{DateTime, Utc},
    ChangeNum, FolderId, ObjectId,
};

use crate::types::item::ItemKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageType {
    MailboxItemSmtpAddressBased = 0,
    PublicFolder = 1,
    PublicFolderItem = 2,
    MailboxItemMailboxGuidBased = 3,
    ConversationIdMailboxGuidBased = 4,
    ActiveDirectoryObject = 5,
}

impl StorageType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageType::MailboxItemSmtpAddressBased),
            1 => Some(StorageType::PublicFolder),
            2 => Some(StorageType::PublicFolderItem),
            3 => Some(StorageType::MailboxItemMailboxGuidBased),
            4 => Some(StorageType::ConversationIdMailboxGuidBased),
            5 => Some(StorageType::ActiveDirectoryObject),
            _ => None,
        }
    }

    pub fn is_mailbox(&self) -> bool {
        matches!(
            self,
            StorageType::MailboxItemSmtpAddressBased | StorageType::MailboxItemMailboxGuidBased
        )
    }
}

/// Mailbox and folder an identifier is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageLocation {
    pub storage_type: StorageType,
    pub moniker: String,
    pub folder_id: FolderId,
}

/// Filter selecting occurrences of a recurring series. Bounds are kept
/// with millisecond precision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OccurrenceWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub count: Option<u32>,
    pub compare_original_start_time: bool,
}

/// How an identifier addresses its target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Addressing {
    Normal,
    Recurrence { original_start: DateTime<Utc> },
    Series,
    Range { windows: Vec<OccurrenceWindow> },
}

impl Addressing {
    pub fn instruction(&self) -> ProcessingInstruction {
        match self {
            Addressing::Normal => ProcessingInstruction::Normal,
            Addressing::Recurrence { .. } => ProcessingInstruction::Recurrence,
            Addressing::Series => ProcessingInstruction::Series,
            Addressing::Range { .. } => ProcessingInstruction::Range,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingInstruction {
    Normal = 0,
    Recurrence = 1,
    Series = 2,
    Range = 3,
}

impl ProcessingInstruction {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ProcessingInstruction::Normal),
            1 => Some(ProcessingInstruction::Recurrence),
            2 => Some(ProcessingInstruction::Series),
            3 => Some(ProcessingInstruction::Range),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeKey {
    pub kind: ItemKind,
    pub change_num: ChangeNum,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemIdentifier {
    pub location: StorageLocation,
    pub object_id: ObjectId,
    pub change_key: Option<ChangeKey>,
    pub addressing: Addressing,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderIdentifier {
    pub storage_type: StorageType,
    pub moniker: String,
    pub folder_id: FolderId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    InvalidEncoding,
    InvalidCompression(u8),
    UnknownStorageType(u8),
    UnsupportedStorageType(StorageType),
    UnknownProcessingInstruction(u8),
    InvalidObjectKind(u8),
    InvalidMoniker,
    InvalidTimestamp,
    InvalidRange,
    Truncated,
    TooLong,
    TrailingBytes,
    ChecksumMismatch,
}

impl Display for IdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdError::InvalidEncoding => write!(f, "Id is not valid base64."),
            IdError::InvalidCompression(tag) => write!(f, "Unknown compression type {}.", tag),
            IdError::UnknownStorageType(tag) => write!(f, "Unknown storage type {}.", tag),
            IdError::UnsupportedStorageType(storage_type) => {
                write!(f, "Storage type {:?} is not supported.", storage_type)
            }
            IdError::UnknownProcessingInstruction(tag) => {
                write!(f, "Unknown processing instruction {}.", tag)
            }
            IdError::InvalidObjectKind(tag) => write!(f, "Unexpected object kind {}.", tag),
            IdError::InvalidMoniker => write!(f, "Invalid moniker."),
            IdError::InvalidTimestamp => write!(f, "Invalid occurrence timestamp."),
            IdError::InvalidRange => write!(f, "Invalid occurrence range."),
            IdError::Truncated => write!(f, "Id is truncated."),
            IdError::TooLong => write!(f, "Id exceeds the maximum length."),
            IdError::TrailingBytes => write!(f, "Id contains trailing bytes."),
            IdError::ChecksumMismatch => write!(f, "Id checksum mismatch."),
        }
    }
}

impl std::error::Error for IdError {}
