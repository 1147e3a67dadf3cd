use store::chrono::{DateTime, Utc};

use crate::error::item::ItemError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum FlagStatus {
    #[default]
    NotFlagged,
    Flagged,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Flag {
    pub flag_status: FlagStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete_date: Option<DateTime<Utc>>,
}

impl Flag {
    pub fn validate(&self) -> crate::Result<()> {
        match self.flag_status {
            FlagStatus::Flagged => {
                if self.complete_date.is_some() {
                    return Err(ItemError::invalid_argument(
                        "CompleteDate cannot be set on a flagged item.",
                    ));
                }
                if self.start_date.is_some() != self.due_date.is_some() {
                    return Err(ItemError::invalid_argument(
                        "StartDate and DueDate must be set together.",
                    ));
                }
                if let (Some(start), Some(due)) = (self.start_date, self.due_date) {
                    if due < start {
                        return Err(ItemError::invalid_argument(
                            "DueDate cannot be earlier than StartDate.",
                        ));
                    }
                }
            }
            FlagStatus::Complete => {
                if self.start_date.is_some() || self.due_date.is_some() {
                    return Err(ItemError::invalid_argument(
                        "StartDate and DueDate cannot be set on a completed flag.",
                    ));
                }
            }
            FlagStatus::NotFlagged => {
                if self.start_date.is_some()
                    || self.due_date.is_some()
                    || self.complete_date.is_some()
                {
                    return Err(ItemError::invalid_argument(
                        "Dates cannot be set on an item that is not flagged.",
                    ));
                }
            }
        }
        Ok(())
    }
}
