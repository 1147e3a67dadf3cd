use store::chrono::{DateTime, Utc};

use super::{
    common::{
        Body, CalendarItemType, DateTimePrecision, EmailAddress, Importance, Sensitivity,
        TaskStatus,
    },
    field::{FieldUri, FieldValue},
    flag::Flag,
    folder::DistinguishedFolderName,
    id::{FolderId, ItemId},
    recurrence::Recurrence,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Item,
    Message,
    Contact,
    DistributionList,
    CalendarItem,
    PostItem,
    Task,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Item => "Item",
            ItemKind::Message => "Message",
            ItemKind::Contact => "Contact",
            ItemKind::DistributionList => "DistributionList",
            ItemKind::CalendarItem => "CalendarItem",
            ItemKind::PostItem => "PostItem",
            ItemKind::Task => "Task",
        }
    }

    pub fn default_class(&self) -> &'static str {
        match self {
            ItemKind::Item => "IPM",
            ItemKind::Message => "IPM.Note",
            ItemKind::Contact => "IPM.Contact",
            ItemKind::DistributionList => "IPM.DistList",
            ItemKind::CalendarItem => "IPM.Appointment",
            ItemKind::PostItem => "IPM.Post",
            ItemKind::Task => "IPM.Task",
        }
    }

    pub fn default_folder(&self) -> DistinguishedFolderName {
        match self {
            ItemKind::Item | ItemKind::PostItem => DistinguishedFolderName::Inbox,
            ItemKind::Message => DistinguishedFolderName::Drafts,
            ItemKind::Contact | ItemKind::DistributionList => DistinguishedFolderName::Contacts,
            ItemKind::CalendarItem => DistinguishedFolderName::Calendar,
            ItemKind::Task => DistinguishedFolderName::Tasks,
        }
    }

    /// Returns the kind a message class is reserved for, if any.
    pub fn from_class(class: &str) -> Option<ItemKind> {
        [
            ("IPM.Note", ItemKind::Message),
            ("IPM.Contact", ItemKind::Contact),
            ("IPM.DistList", ItemKind::DistributionList),
            ("IPM.Appointment", ItemKind::CalendarItem),
            ("IPM.Schedule.Meeting", ItemKind::CalendarItem),
            ("IPM.Post", ItemKind::PostItem),
            ("IPM.Task", ItemKind::Task),
        ]
        .into_iter()
        .find_map(|(prefix, kind)| {
            let class = class.as_bytes();
            let is_match = class.len() >= prefix.len()
                && class[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
                && (class.len() == prefix.len() || class[prefix.len()] == b'.');
            if is_match {
                Some(kind)
            } else {
                None
            }
        })
    }

    pub fn accepts_class(&self, class: &str) -> bool {
        match (self, ItemKind::from_class(class)) {
            (ItemKind::Item, None) => true,
            (ItemKind::Item, Some(ItemKind::Message)) => true,
            (kind, Some(class_kind)) => *kind == class_kind,
            (_, None) => false,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            ItemKind::Item => 0,
            ItemKind::Message => 1,
            ItemKind::Contact => 2,
            ItemKind::DistributionList => 3,
            ItemKind::CalendarItem => 4,
            ItemKind::PostItem => 5,
            ItemKind::Task => 6,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ItemKind::Item),
            1 => Some(ItemKind::Message),
            2 => Some(ItemKind::Contact),
            3 => Some(ItemKind::DistributionList),
            4 => Some(ItemKind::CalendarItem),
            5 => Some(ItemKind::PostItem),
            6 => Some(ItemKind::Task),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemCommon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<FolderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<Sensitivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_received: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_sent: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_is_set: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_minutes_before_start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    #[serde(flatten)]
    pub common: ItemCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_recipients: Option<Vec<EmailAddress>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<EmailAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_read_receipt_requested: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    #[serde(flatten)]
    pub common: ItemCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DistributionList {
    #[serde(flatten)]
    pub common: ItemCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<EmailAddress>>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OccurrenceInfo {
    pub item_id: ItemId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub original_start: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeletedOccurrenceInfo {
    pub start: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CalendarItem {
    #[serde(flatten)]
    pub common: ItemCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_all_day_event: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_item_type: Option<CalendarItemType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_occurrence: Option<OccurrenceInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_occurrence: Option<OccurrenceInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_occurrences: Option<Vec<OccurrenceInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_occurrences: Option<Vec<DeletedOccurrenceInfo>>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostItem {
    #[serde(flatten)]
    pub common: ItemCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<EmailAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    #[serde(flatten)]
    pub common: ItemCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_complete: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

/// Closed set of item types. Every variant embeds the shared
/// `ItemCommon` fields.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Item {
    Item(ItemCommon),
    Message(Message),
    Contact(Contact),
    DistributionList(DistributionList),
    CalendarItem(CalendarItem),
    PostItem(PostItem),
    Task(Task),
}

fn assign<T>(
    slot: &mut Option<T>,
    value: Option<FieldValue>,
    convert: impl FnOnce(FieldValue) -> Option<T>,
) -> bool {
    match value {
        Some(value) => match convert(value) {
            Some(value) => {
                *slot = Some(value);
                true
            }
            None => false,
        },
        None => {
            *slot = None;
            true
        }
    }
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Item => Item::Item(ItemCommon::default()),
            ItemKind::Message => Item::Message(Message::default()),
            ItemKind::Contact => Item::Contact(Contact::default()),
            ItemKind::DistributionList => Item::DistributionList(DistributionList::default()),
            ItemKind::CalendarItem => Item::CalendarItem(CalendarItem::default()),
            ItemKind::PostItem => Item::PostItem(PostItem::default()),
            ItemKind::Task => Item::Task(Task::default()),
        }
    }

    /// An item of the same kind carrying only an identifier.
    pub fn id_only(kind: ItemKind, item_id: ItemId) -> Self {
        let mut item = Item::new(kind);
        item.common_mut().item_id = item_id.into();
        item
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Item(_) => ItemKind::Item,
            Item::Message(_) => ItemKind::Message,
            Item::Contact(_) => ItemKind::Contact,
            Item::DistributionList(_) => ItemKind::DistributionList,
            Item::CalendarItem(_) => ItemKind::CalendarItem,
            Item::PostItem(_) => ItemKind::PostItem,
            Item::Task(_) => ItemKind::Task,
        }
    }

    pub fn common(&self) -> &ItemCommon {
        match self {
            Item::Item(common) => common,
            Item::Message(item) => &item.common,
            Item::Contact(item) => &item.common,
            Item::DistributionList(item) => &item.common,
            Item::CalendarItem(item) => &item.common,
            Item::PostItem(item) => &item.common,
            Item::Task(item) => &item.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut ItemCommon {
        match self {
            Item::Item(common) => common,
            Item::Message(item) => &mut item.common,
            Item::Contact(item) => &mut item.common,
            Item::DistributionList(item) => &mut item.common,
            Item::CalendarItem(item) => &mut item.common,
            Item::PostItem(item) => &mut item.common,
            Item::Task(item) => &mut item.common,
        }
    }

    pub fn item_id(&self) -> Option<&ItemId> {
        self.common().item_id.as_ref()
    }

    pub fn subject(&self) -> Option<&str> {
        self.common().subject.as_deref()
    }

    pub fn is_read(&self) -> bool {
        self.common().is_read.unwrap_or(false)
    }

    pub fn read_receipt_requested(&self) -> bool {
        matches!(self, Item::Message(message) if message.is_read_receipt_requested == Some(true))
    }

    pub fn recurrence(&self) -> Option<&Recurrence> {
        match self {
            Item::CalendarItem(item) => item.recurrence.as_ref(),
            Item::Task(item) => item.recurrence.as_ref(),
            _ => None,
        }
    }

    /// Start and end of a schedulable item: the meeting time for calendar
    /// items, the start and due dates for tasks.
    pub fn schedule(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match self {
            Item::CalendarItem(item) => {
                let start = item.start?;
                Some((start, item.end.unwrap_or(start)))
            }
            Item::Task(item) => match (item.start_date, item.due_date) {
                (Some(start), Some(due)) => Some((start, due)),
                (Some(date), None) | (None, Some(date)) => Some((date, date)),
                (None, None) => None,
            },
            _ => None,
        }
    }

    pub fn set_schedule(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) {
        match self {
            Item::CalendarItem(item) => {
                item.start = start.into();
                item.end = end.into();
            }
            Item::Task(item) => {
                item.start_date = start.into();
                item.due_date = end.into();
            }
            _ => (),
        }
    }

    /// Reads a writable field. Server computed fields are reported by
    /// `has_field` only.
    pub fn field(&self, field: FieldUri) -> Option<FieldValue> {
        let common = self.common();
        match field {
            FieldUri::ItemClass => common.item_class.clone().map(FieldValue::Text),
            FieldUri::Subject => common.subject.clone().map(FieldValue::Text),
            FieldUri::Sensitivity => common.sensitivity.map(FieldValue::Sensitivity),
            FieldUri::Body => common.body.clone().map(FieldValue::Body),
            FieldUri::Categories => common.categories.clone().map(FieldValue::Strings),
            FieldUri::Importance => common.importance.map(FieldValue::Importance),
            FieldUri::ReminderIsSet => common.reminder_is_set.map(FieldValue::Bool),
            FieldUri::ReminderMinutesBeforeStart => common
                .reminder_minutes_before_start
                .map(FieldValue::Integer),
            FieldUri::Flag => common.flag.clone().map(FieldValue::Flag),
            FieldUri::IsRead => common.is_read.map(FieldValue::Bool),
            FieldUri::ToRecipients => match self {
                Item::Message(item) => item.to_recipients.clone().map(FieldValue::Mailboxes),
                _ => None,
            },
            FieldUri::From => match self {
                Item::Message(item) => item.from.clone().map(FieldValue::Mailbox),
                Item::PostItem(item) => item.from.clone().map(FieldValue::Mailbox),
                _ => None,
            },
            FieldUri::IsReadReceiptRequested => match self {
                Item::Message(item) => item.is_read_receipt_requested.map(FieldValue::Bool),
                _ => None,
            },
            FieldUri::GivenName => match self {
                Item::Contact(item) => item.given_name.clone().map(FieldValue::Text),
                _ => None,
            },
            FieldUri::Surname => match self {
                Item::Contact(item) => item.surname.clone().map(FieldValue::Text),
                _ => None,
            },
            FieldUri::DisplayName => match self {
                Item::Contact(item) => item.display_name.clone().map(FieldValue::Text),
                Item::DistributionList(item) => item.display_name.clone().map(FieldValue::Text),
                _ => None,
            },
            FieldUri::CompanyName => match self {
                Item::Contact(item) => item.company_name.clone().map(FieldValue::Text),
                _ => None,
            },
            FieldUri::JobTitle => match self {
                Item::Contact(item) => item.job_title.clone().map(FieldValue::Text),
                _ => None,
            },
            FieldUri::Members => match self {
                Item::DistributionList(item) => item.members.clone().map(FieldValue::Mailboxes),
                _ => None,
            },
            FieldUri::Start => match self {
                Item::CalendarItem(item) => item.start.map(FieldValue::Date),
                _ => None,
            },
            FieldUri::End => match self {
                Item::CalendarItem(item) => item.end.map(FieldValue::Date),
                _ => None,
            },
            FieldUri::Location => match self {
                Item::CalendarItem(item) => item.location.clone().map(FieldValue::Text),
                _ => None,
            },
            FieldUri::IsAllDayEvent => match self {
                Item::CalendarItem(item) => item.is_all_day_event.map(FieldValue::Bool),
                _ => None,
            },
            FieldUri::CalendarRecurrence => match self {
                Item::CalendarItem(item) => item.recurrence.clone().map(FieldValue::Recurrence),
                _ => None,
            },
            FieldUri::StartDate => match self {
                Item::Task(item) => item.start_date.map(FieldValue::Date),
                _ => None,
            },
            FieldUri::DueDate => match self {
                Item::Task(item) => item.due_date.map(FieldValue::Date),
                _ => None,
            },
            FieldUri::Status => match self {
                Item::Task(item) => item.status.map(FieldValue::TaskStatus),
                _ => None,
            },
            FieldUri::PercentComplete => match self {
                Item::Task(item) => item.percent_complete.map(FieldValue::Float),
                _ => None,
            },
            FieldUri::TaskRecurrence => match self {
                Item::Task(item) => item.recurrence.clone().map(FieldValue::Recurrence),
                _ => None,
            },
            FieldUri::ItemId
            | FieldUri::ParentFolderId
            | FieldUri::DateTimeReceived
            | FieldUri::DateTimeSent
            | FieldUri::DateTimeCreated
            | FieldUri::LastModifiedTime
            | FieldUri::Size
            | FieldUri::DisplayTo
            | FieldUri::CalendarItemType
            | FieldUri::OriginalStart
            | FieldUri::FirstOccurrence
            | FieldUri::LastOccurrence
            | FieldUri::ModifiedOccurrences
            | FieldUri::DeletedOccurrences
            | FieldUri::PostedTime
            | FieldUri::IsComplete => None,
        }
    }

    /// Writes or clears a writable field. Returns `false` when the field
    /// does not exist on this kind of item or the value has the wrong type.
    pub fn set_field(&mut self, field: FieldUri, value: Option<FieldValue>) -> bool {
        match field {
            FieldUri::ItemClass => {
                assign(&mut self.common_mut().item_class, value, FieldValue::into_text)
            }
            FieldUri::Subject => assign(&mut self.common_mut().subject, value, FieldValue::into_text),
            FieldUri::Sensitivity => assign(
                &mut self.common_mut().sensitivity,
                value,
                FieldValue::into_sensitivity,
            ),
            FieldUri::Body => assign(&mut self.common_mut().body, value, FieldValue::into_body),
            FieldUri::Categories => assign(
                &mut self.common_mut().categories,
                value,
                FieldValue::into_strings,
            ),
            FieldUri::Importance => assign(
                &mut self.common_mut().importance,
                value,
                FieldValue::into_importance,
            ),
            FieldUri::ReminderIsSet => assign(
                &mut self.common_mut().reminder_is_set,
                value,
                FieldValue::into_bool,
            ),
            FieldUri::ReminderMinutesBeforeStart => assign(
                &mut self.common_mut().reminder_minutes_before_start,
                value,
                FieldValue::into_integer,
            ),
            FieldUri::Flag => assign(&mut self.common_mut().flag, value, FieldValue::into_flag),
            FieldUri::IsRead => assign(&mut self.common_mut().is_read, value, FieldValue::into_bool),
            FieldUri::ToRecipients => match self {
                Item::Message(item) => {
                    assign(&mut item.to_recipients, value, FieldValue::into_mailboxes)
                }
                _ => false,
            },
            FieldUri::From => match self {
                Item::Message(item) => assign(&mut item.from, value, FieldValue::into_mailbox),
                Item::PostItem(item) => assign(&mut item.from, value, FieldValue::into_mailbox),
                _ => false,
            },
            FieldUri::IsReadReceiptRequested => match self {
                Item::Message(item) => assign(
                    &mut item.is_read_receipt_requested,
                    value,
                    FieldValue::into_bool,
                ),
                _ => false,
            },
            FieldUri::GivenName => match self {
                Item::Contact(item) => assign(&mut item.given_name, value, FieldValue::into_text),
                _ => false,
            },
            FieldUri::Surname => match self {
                Item::Contact(item) => assign(&mut item.surname, value, FieldValue::into_text),
                _ => false,
            },
            FieldUri::DisplayName => match self {
                Item::Contact(item) => assign(&mut item.display_name, value, FieldValue::into_text),
                Item::DistributionList(item) => {
                    assign(&mut item.display_name, value, FieldValue::into_text)
                }
                _ => false,
            },
            FieldUri::CompanyName => match self {
                Item::Contact(item) => assign(&mut item.company_name, value, FieldValue::into_text),
                _ => false,
            },
            FieldUri::JobTitle => match self {
                Item::Contact(item) => assign(&mut item.job_title, value, FieldValue::into_text),
                _ => false,
            },
            FieldUri::Members => match self {
                Item::DistributionList(item) => {
                    assign(&mut item.members, value, FieldValue::into_mailboxes)
                }
                _ => false,
            },
            FieldUri::Start => match self {
                Item::CalendarItem(item) => assign(&mut item.start, value, FieldValue::into_date),
                _ => false,
            },
            FieldUri::End => match self {
                Item::CalendarItem(item) => assign(&mut item.end, value, FieldValue::into_date),
                _ => false,
            },
            FieldUri::Location => match self {
                Item::CalendarItem(item) => assign(&mut item.location, value, FieldValue::into_text),
                _ => false,
            },
            FieldUri::IsAllDayEvent => match self {
                Item::CalendarItem(item) => {
                    assign(&mut item.is_all_day_event, value, FieldValue::into_bool)
                }
                _ => false,
            },
            FieldUri::CalendarRecurrence => match self {
                Item::CalendarItem(item) => {
                    assign(&mut item.recurrence, value, FieldValue::into_recurrence)
                }
                _ => false,
            },
            FieldUri::StartDate => match self {
                Item::Task(item) => assign(&mut item.start_date, value, FieldValue::into_date),
                _ => false,
            },
            FieldUri::DueDate => match self {
                Item::Task(item) => assign(&mut item.due_date, value, FieldValue::into_date),
                _ => false,
            },
            FieldUri::Status => match self {
                Item::Task(item) => assign(&mut item.status, value, FieldValue::into_task_status),
                _ => false,
            },
            FieldUri::PercentComplete => match self {
                Item::Task(item) => {
                    assign(&mut item.percent_complete, value, FieldValue::into_float)
                }
                _ => false,
            },
            FieldUri::TaskRecurrence => match self {
                Item::Task(item) => assign(&mut item.recurrence, value, FieldValue::into_recurrence),
                _ => false,
            },
            FieldUri::ItemId
            | FieldUri::ParentFolderId
            | FieldUri::DateTimeReceived
            | FieldUri::DateTimeSent
            | FieldUri::DateTimeCreated
            | FieldUri::LastModifiedTime
            | FieldUri::Size
            | FieldUri::DisplayTo
            | FieldUri::CalendarItemType
            | FieldUri::OriginalStart
            | FieldUri::FirstOccurrence
            | FieldUri::LastOccurrence
            | FieldUri::ModifiedOccurrences
            | FieldUri::DeletedOccurrences
            | FieldUri::PostedTime
            | FieldUri::IsComplete => false,
        }
    }

    pub fn has_field(&self, field: FieldUri) -> bool {
        if !field.is_read_only() {
            return self.field(field).is_some();
        }

        let common = self.common();
        match field {
            FieldUri::ItemId => common.item_id.is_some(),
            FieldUri::ParentFolderId => common.parent_folder_id.is_some(),
            FieldUri::DateTimeReceived => common.date_time_received.is_some(),
            FieldUri::DateTimeSent => common.date_time_sent.is_some(),
            FieldUri::DateTimeCreated => common.date_time_created.is_some(),
            FieldUri::LastModifiedTime => common.last_modified_time.is_some(),
            FieldUri::Size => common.size.is_some(),
            FieldUri::DisplayTo => common.display_to.is_some(),
            FieldUri::CalendarItemType
            | FieldUri::OriginalStart
            | FieldUri::FirstOccurrence
            | FieldUri::LastOccurrence
            | FieldUri::ModifiedOccurrences
            | FieldUri::DeletedOccurrences => match self {
                Item::CalendarItem(item) => match field {
                    FieldUri::CalendarItemType => item.calendar_item_type.is_some(),
                    FieldUri::OriginalStart => item.original_start.is_some(),
                    FieldUri::FirstOccurrence => item.first_occurrence.is_some(),
                    FieldUri::LastOccurrence => item.last_occurrence.is_some(),
                    FieldUri::ModifiedOccurrences => item.modified_occurrences.is_some(),
                    _ => item.deleted_occurrences.is_some(),
                },
                _ => false,
            },
            FieldUri::PostedTime => {
                matches!(self, Item::PostItem(item) if item.posted_time.is_some())
            }
            FieldUri::IsComplete => matches!(self, Item::Task(item) if item.is_complete.is_some()),
            _ => false,
        }
    }

    pub fn populated_fields(&self) -> Vec<FieldUri> {
        FieldUri::ALL
            .into_iter()
            .filter(|field| self.has_field(*field))
            .collect()
    }

    /// Clears every server computed field.
    pub fn clear_computed(&mut self) {
        let common = self.common_mut();
        common.item_id = None;
        common.parent_folder_id = None;
        common.date_time_received = None;
        common.date_time_sent = None;
        common.date_time_created = None;
        common.last_modified_time = None;
        common.size = None;
        common.display_to = None;
        match self {
            Item::CalendarItem(item) => {
                item.calendar_item_type = None;
                item.original_start = None;
                item.first_occurrence = None;
                item.last_occurrence = None;
                item.modified_occurrences = None;
                item.deleted_occurrences = None;
            }
            Item::PostItem(item) => item.posted_time = None,
            Item::Task(item) => item.is_complete = None,
            _ => (),
        }
    }

    /// Truncates every timestamp to the requested precision.
    pub fn truncate_dates(&mut self, precision: DateTimePrecision) {
        let truncate = |date: &mut Option<DateTime<Utc>>| {
            if let Some(value) = date {
                *value = precision.truncate(*value);
            }
        };
        let truncate_occurrence = |occurrence: &mut OccurrenceInfo| {
            occurrence.start = precision.truncate(occurrence.start);
            occurrence.end = precision.truncate(occurrence.end);
            occurrence.original_start = precision.truncate(occurrence.original_start);
        };

        let common = self.common_mut();
        truncate(&mut common.date_time_received);
        truncate(&mut common.date_time_sent);
        truncate(&mut common.date_time_created);
        truncate(&mut common.last_modified_time);
        if let Some(flag) = &mut common.flag {
            truncate(&mut flag.start_date);
            truncate(&mut flag.due_date);
            truncate(&mut flag.complete_date);
        }

        match self {
            Item::CalendarItem(item) => {
                truncate(&mut item.start);
                truncate(&mut item.end);
                truncate(&mut item.original_start);
                if let Some(occurrence) = &mut item.first_occurrence {
                    truncate_occurrence(occurrence);
                }
                if let Some(occurrence) = &mut item.last_occurrence {
                    truncate_occurrence(occurrence);
                }
                for occurrence in item.modified_occurrences.iter_mut().flatten() {
                    truncate_occurrence(occurrence);
                }
                for occurrence in item.deleted_occurrences.iter_mut().flatten() {
                    occurrence.start = precision.truncate(occurrence.start);
                }
            }
            Item::PostItem(item) => truncate(&mut item.posted_time),
            Item::Task(item) => {
                truncate(&mut item.start_date);
                truncate(&mut item.due_date);
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{
        common::Body,
        field::{FieldUri, FieldValue},
    };

    use super::{Item, ItemKind};

    #[test]
    fn class_mapping() {
        for (class, kind) in [
            ("IPM.Note", Some(ItemKind::Message)),
            ("ipm.note.SMIME", Some(ItemKind::Message)),
            ("IPM.Contact", Some(ItemKind::Contact)),
            ("IPM.DistList", Some(ItemKind::DistributionList)),
            ("IPM.Appointment", Some(ItemKind::CalendarItem)),
            ("IPM.Schedule.Meeting.Request", Some(ItemKind::CalendarItem)),
            ("IPM.Post", Some(ItemKind::PostItem)),
            ("IPM.Task", Some(ItemKind::Task)),
            ("IPM.Notes", None),
            ("IPM", None),
            ("IPM.StickyNote", None),
        ] {
            assert_eq!(ItemKind::from_class(class), kind, "{}", class);
        }

        assert!(ItemKind::Item.accepts_class("IPM.Note"));
        assert!(ItemKind::Item.accepts_class("IPM.StickyNote"));
        assert!(!ItemKind::Item.accepts_class("IPM.Contact"));
        assert!(ItemKind::Message.accepts_class("IPM.Note.Custom"));
        assert!(!ItemKind::Message.accepts_class("IPM.StickyNote"));
        assert!(!ItemKind::Message.accepts_class("IPM.Task"));
        assert!(ItemKind::Contact.accepts_class("IPM.Contact"));
        assert!(!ItemKind::Contact.accepts_class("IPM.Note"));
        assert!(!ItemKind::Task.accepts_class("IPM"));
    }

    #[test]
    fn field_access() {
        let mut item = Item::new(ItemKind::Contact);
        assert!(item.set_field(FieldUri::Subject, Some(FieldValue::Text("Hi".into()))));
        assert!(item.set_field(FieldUri::GivenName, Some(FieldValue::Text("Jane".into()))));
        assert!(!item.set_field(FieldUri::Members, None));
        assert!(!item.set_field(FieldUri::Subject, Some(FieldValue::Bool(true))));
        assert!(!item.set_field(FieldUri::Size, None));
        assert_eq!(
            item.populated_fields(),
            vec![FieldUri::Subject, FieldUri::GivenName]
        );

        assert!(item.set_field(FieldUri::Body, Some(FieldValue::Body(Body::text("A")))));
        assert!(item.set_field(FieldUri::Subject, None));
        assert_eq!(item.field(FieldUri::Subject), None);
        assert_eq!(
            item.field(FieldUri::Body),
            Some(FieldValue::Body(Body::text("A")))
        );
    }
}
