use store::chrono::{DateTime, Utc};

use super::{
    common::{Body, EmailAddress, Importance, Sensitivity, TaskStatus},
    flag::Flag,
    item::ItemKind,
    recurrence::Recurrence,
};

/// Property paths addressable by update descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FieldUri {
    #[serde(rename = "item:ItemId")]
    ItemId,
    #[serde(rename = "item:ParentFolderId")]
    ParentFolderId,
    #[serde(rename = "item:ItemClass")]
    ItemClass,
    #[serde(rename = "item:Subject")]
    Subject,
    #[serde(rename = "item:Sensitivity")]
    Sensitivity,
    #[serde(rename = "item:Body")]
    Body,
    #[serde(rename = "item:Categories")]
    Categories,
    #[serde(rename = "item:Importance")]
    Importance,
    #[serde(rename = "item:DateTimeReceived")]
    DateTimeReceived,
    #[serde(rename = "item:DateTimeSent")]
    DateTimeSent,
    #[serde(rename = "item:DateTimeCreated")]
    DateTimeCreated,
    #[serde(rename = "item:LastModifiedTime")]
    LastModifiedTime,
    #[serde(rename = "item:Size")]
    Size,
    #[serde(rename = "item:DisplayTo")]
    DisplayTo,
    #[serde(rename = "item:ReminderIsSet")]
    ReminderIsSet,
    #[serde(rename = "item:ReminderMinutesBeforeStart")]
    ReminderMinutesBeforeStart,
    #[serde(rename = "item:Flag")]
    Flag,
    #[serde(rename = "message:IsRead")]
    IsRead,
    #[serde(rename = "message:ToRecipients")]
    ToRecipients,
    #[serde(rename = "message:From")]
    From,
    #[serde(rename = "message:IsReadReceiptRequested")]
    IsReadReceiptRequested,
    #[serde(rename = "contacts:GivenName")]
    GivenName,
    #[serde(rename = "contacts:Surname")]
    Surname,
    #[serde(rename = "contacts:DisplayName")]
    DisplayName,
    #[serde(rename = "contacts:CompanyName")]
    CompanyName,
    #[serde(rename = "contacts:JobTitle")]
    JobTitle,
    #[serde(rename = "distributionlist:Members")]
    Members,
    #[serde(rename = "calendar:Start")]
    Start,
    #[serde(rename = "calendar:End")]
    End,
    #[serde(rename = "calendar:Location")]
    Location,
    #[serde(rename = "calendar:IsAllDayEvent")]
    IsAllDayEvent,
    #[serde(rename = "calendar:Recurrence")]
    CalendarRecurrence,
    #[serde(rename = "calendar:CalendarItemType")]
    CalendarItemType,
    #[serde(rename = "calendar:OriginalStart")]
    OriginalStart,
    #[serde(rename = "calendar:FirstOccurrence")]
    FirstOccurrence,
    #[serde(rename = "calendar:LastOccurrence")]
    LastOccurrence,
    #[serde(rename = "calendar:ModifiedOccurrences")]
    ModifiedOccurrences,
    #[serde(rename = "calendar:DeletedOccurrences")]
    DeletedOccurrences,
    #[serde(rename = "postitem:PostedTime")]
    PostedTime,
    #[serde(rename = "task:StartDate")]
    StartDate,
    #[serde(rename = "task:DueDate")]
    DueDate,
    #[serde(rename = "task:Status")]
    Status,
    #[serde(rename = "task:PercentComplete")]
    PercentComplete,
    #[serde(rename = "task:IsComplete")]
    IsComplete,
    #[serde(rename = "task:Recurrence")]
    TaskRecurrence,
}

impl FieldUri {
    pub const ALL: [FieldUri; 45] = [
        FieldUri::ItemId,
        FieldUri::ParentFolderId,
        FieldUri::ItemClass,
        FieldUri::Subject,
        FieldUri::Sensitivity,
        FieldUri::Body,
        FieldUri::Categories,
        FieldUri::Importance,
        FieldUri::DateTimeReceived,
        FieldUri::DateTimeSent,
        FieldUri::DateTimeCreated,
        FieldUri::LastModifiedTime,
        FieldUri::Size,
        FieldUri::DisplayTo,
        FieldUri::ReminderIsSet,
        FieldUri::ReminderMinutesBeforeStart,
        FieldUri::Flag,
        FieldUri::IsRead,
        FieldUri::ToRecipients,
        FieldUri::From,
        FieldUri::IsReadReceiptRequested,
        FieldUri::GivenName,
        FieldUri::Surname,
        FieldUri::DisplayName,
        FieldUri::CompanyName,
        FieldUri::JobTitle,
        FieldUri::Members,
        FieldUri::Start,
        FieldUri::End,
        FieldUri::Location,
        FieldUri::IsAllDayEvent,
        FieldUri::CalendarRecurrence,
        FieldUri::CalendarItemType,
        FieldUri::OriginalStart,
        FieldUri::FirstOccurrence,
        FieldUri::LastOccurrence,
        FieldUri::ModifiedOccurrences,
        FieldUri::DeletedOccurrences,
        FieldUri::PostedTime,
        FieldUri::StartDate,
        FieldUri::DueDate,
        FieldUri::Status,
        FieldUri::PercentComplete,
        FieldUri::IsComplete,
        FieldUri::TaskRecurrence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldUri::ItemId => "item:ItemId",
            FieldUri::ParentFolderId => "item:ParentFolderId",
            FieldUri::ItemClass => "item:ItemClass",
            FieldUri::Subject => "item:Subject",
            FieldUri::Sensitivity => "item:Sensitivity",
            FieldUri::Body => "item:Body",
            FieldUri::Categories => "item:Categories",
            FieldUri::Importance => "item:Importance",
            FieldUri::DateTimeReceived => "item:DateTimeReceived",
            FieldUri::DateTimeSent => "item:DateTimeSent",
            FieldUri::DateTimeCreated => "item:DateTimeCreated",
            FieldUri::LastModifiedTime => "item:LastModifiedTime",
            FieldUri::Size => "item:Size",
            FieldUri::DisplayTo => "item:DisplayTo",
            FieldUri::ReminderIsSet => "item:ReminderIsSet",
            FieldUri::ReminderMinutesBeforeStart => "item:ReminderMinutesBeforeStart",
            FieldUri::Flag => "item:Flag",
            FieldUri::IsRead => "message:IsRead",
            FieldUri::ToRecipients => "message:ToRecipients",
            FieldUri::From => "message:From",
            FieldUri::IsReadReceiptRequested => "message:IsReadReceiptRequested",
            FieldUri::GivenName => "contacts:GivenName",
            FieldUri::Surname => "contacts:Surname",
            FieldUri::DisplayName => "contacts:DisplayName",
            FieldUri::CompanyName => "contacts:CompanyName",
            FieldUri::JobTitle => "contacts:JobTitle",
            FieldUri::Members => "distributionlist:Members",
            FieldUri::Start => "calendar:Start",
            FieldUri::End => "calendar:End",
            FieldUri::Location => "calendar:Location",
            FieldUri::IsAllDayEvent => "calendar:IsAllDayEvent",
            FieldUri::CalendarRecurrence => "calendar:Recurrence",
            FieldUri::CalendarItemType => "calendar:CalendarItemType",
            FieldUri::OriginalStart => "calendar:OriginalStart",
            FieldUri::FirstOccurrence => "calendar:FirstOccurrence",
            FieldUri::LastOccurrence => "calendar:LastOccurrence",
            FieldUri::ModifiedOccurrences => "calendar:ModifiedOccurrences",
            FieldUri::DeletedOccurrences => "calendar:DeletedOccurrences",
            FieldUri::PostedTime => "postitem:PostedTime",
            FieldUri::StartDate => "task:StartDate",
            FieldUri::DueDate => "task:DueDate",
            FieldUri::Status => "task:Status",
            FieldUri::PercentComplete => "task:PercentComplete",
            FieldUri::IsComplete => "task:IsComplete",
            FieldUri::TaskRecurrence => "task:Recurrence",
        }
    }

    /// Fields computed by the server that clients may never write.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
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
                | FieldUri::IsComplete
        )
    }

    pub fn supports_append(&self) -> bool {
        matches!(
            self,
            FieldUri::Body | FieldUri::Categories | FieldUri::ToRecipients | FieldUri::Members
        )
    }

    pub fn supports_delete(&self) -> bool {
        !self.is_read_only() && !matches!(self, FieldUri::ItemClass)
    }

    pub fn applies_to(&self, kind: ItemKind) -> bool {
        match self {
            FieldUri::ItemId
            | FieldUri::ParentFolderId
            | FieldUri::ItemClass
            | FieldUri::Subject
            | FieldUri::Sensitivity
            | FieldUri::Body
            | FieldUri::Categories
            | FieldUri::Importance
            | FieldUri::DateTimeReceived
            | FieldUri::DateTimeSent
            | FieldUri::DateTimeCreated
            | FieldUri::LastModifiedTime
            | FieldUri::Size
            | FieldUri::DisplayTo
            | FieldUri::ReminderIsSet
            | FieldUri::ReminderMinutesBeforeStart
            | FieldUri::Flag
            | FieldUri::IsRead => true,
            FieldUri::ToRecipients | FieldUri::IsReadReceiptRequested => {
                kind == ItemKind::Message
            }
            FieldUri::From => matches!(kind, ItemKind::Message | ItemKind::PostItem),
            FieldUri::GivenName
            | FieldUri::Surname
            | FieldUri::CompanyName
            | FieldUri::JobTitle => kind == ItemKind::Contact,
            FieldUri::DisplayName => {
                matches!(kind, ItemKind::Contact | ItemKind::DistributionList)
            }
            FieldUri::Members => kind == ItemKind::DistributionList,
            FieldUri::Start
            | FieldUri::End
            | FieldUri::Location
            | FieldUri::IsAllDayEvent
            | FieldUri::CalendarRecurrence
            | FieldUri::CalendarItemType
            | FieldUri::OriginalStart
            | FieldUri::FirstOccurrence
            | FieldUri::LastOccurrence
            | FieldUri::ModifiedOccurrences
            | FieldUri::DeletedOccurrences => kind == ItemKind::CalendarItem,
            FieldUri::PostedTime => kind == ItemKind::PostItem,
            FieldUri::StartDate
            | FieldUri::DueDate
            | FieldUri::Status
            | FieldUri::PercentComplete
            | FieldUri::IsComplete
            | FieldUri::TaskRecurrence => kind == ItemKind::Task,
        }
    }
}

/// Value of a writable field, detached from the item that holds it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Body(Body),
    Strings(Vec<String>),
    Bool(bool),
    Integer(u32),
    Float(f64),
    Date(DateTime<Utc>),
    Sensitivity(Sensitivity),
    Importance(Importance),
    Flag(Flag),
    Mailbox(EmailAddress),
    Mailboxes(Vec<EmailAddress>),
    Recurrence(Recurrence),
    TaskStatus(TaskStatus),
}

impl FieldValue {
    pub fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_body(self) -> Option<Body> {
        match self {
            FieldValue::Body(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_strings(self) -> Option<Vec<String>> {
        match self {
            FieldValue::Strings(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_bool(self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_integer(self) -> Option<u32> {
        match self {
            FieldValue::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_float(self) -> Option<f64> {
        match self {
            FieldValue::Float(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_date(self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Date(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_sensitivity(self) -> Option<Sensitivity> {
        match self {
            FieldValue::Sensitivity(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_importance(self) -> Option<Importance> {
        match self {
            FieldValue::Importance(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_flag(self) -> Option<Flag> {
        match self {
            FieldValue::Flag(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_mailbox(self) -> Option<EmailAddress> {
        match self {
            FieldValue::Mailbox(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_mailboxes(self) -> Option<Vec<EmailAddress>> {
        match self {
            FieldValue::Mailboxes(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_recurrence(self) -> Option<Recurrence> {
        match self {
            FieldValue::Recurrence(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_task_status(self) -> Option<TaskStatus> {
        match self {
            FieldValue::TaskStatus(value) => Some(value),
            _ => None,
        }
    }
}
