use std::fmt::Display;

use crate::{FolderId, ObjectId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    InternalError(String),
    InvalidArguments(String),
    NotFound(ObjectId),
    FolderNotFound(FolderId),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::FolderNotFound(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::InternalError(s) => write!(f, "Internal error: {}", s),
            StoreError::InvalidArguments(s) => write!(f, "Invalid arguments: {}", s),
            StoreError::NotFound(id) => write!(f, "Object {} not found", id),
            StoreError::FolderNotFound(id) => write!(f, "Folder {} not found", id),
        }
    }
}

impl std::error::Error for StoreError {}
