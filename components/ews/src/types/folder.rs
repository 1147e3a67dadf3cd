use super::id::FolderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistinguishedFolderName {
    MsgFolderRoot,
    Inbox,
    Drafts,
    SentItems,
    DeletedItems,
    Outbox,
    JunkEmail,
    Calendar,
    Contacts,
    Tasks,
    Notes,
    Journal,
}

impl DistinguishedFolderName {
    pub const ALL: [DistinguishedFolderName; 12] = [
        DistinguishedFolderName::MsgFolderRoot,
        DistinguishedFolderName::Inbox,
        DistinguishedFolderName::Drafts,
        DistinguishedFolderName::SentItems,
        DistinguishedFolderName::DeletedItems,
        DistinguishedFolderName::Outbox,
        DistinguishedFolderName::JunkEmail,
        DistinguishedFolderName::Calendar,
        DistinguishedFolderName::Contacts,
        DistinguishedFolderName::Tasks,
        DistinguishedFolderName::Notes,
        DistinguishedFolderName::Journal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DistinguishedFolderName::MsgFolderRoot => "msgfolderroot",
            DistinguishedFolderName::Inbox => "inbox",
            DistinguishedFolderName::Drafts => "drafts",
            DistinguishedFolderName::SentItems => "sentitems",
            DistinguishedFolderName::DeletedItems => "deleteditems",
            DistinguishedFolderName::Outbox => "outbox",
            DistinguishedFolderName::JunkEmail => "junkemail",
            DistinguishedFolderName::Calendar => "calendar",
            DistinguishedFolderName::Contacts => "contacts",
            DistinguishedFolderName::Tasks => "tasks",
            DistinguishedFolderName::Notes => "notes",
            DistinguishedFolderName::Journal => "journal",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DistinguishedFolderName::MsgFolderRoot => "Top of Information Store",
            DistinguishedFolderName::Inbox => "Inbox",
            DistinguishedFolderName::Drafts => "Drafts",
            DistinguishedFolderName::SentItems => "Sent Items",
            DistinguishedFolderName::DeletedItems => "Deleted Items",
            DistinguishedFolderName::Outbox => "Outbox",
            DistinguishedFolderName::JunkEmail => "Junk Email",
            DistinguishedFolderName::Calendar => "Calendar",
            DistinguishedFolderName::Contacts => "Contacts",
            DistinguishedFolderName::Tasks => "Tasks",
            DistinguishedFolderName::Notes => "Notes",
            DistinguishedFolderName::Journal => "Journal",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        DistinguishedFolderName::ALL
            .into_iter()
            .find(|folder| folder.as_str().eq_ignore_ascii_case(name))
    }
}

/// Folder reference as it appears in requests.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TargetFolderId {
    DistinguishedFolderId {
        #[serde(rename = "Id")]
        id: String,
    },
    FolderId(FolderId),
}

impl TargetFolderId {
    pub fn distinguished(name: DistinguishedFolderName) -> Self {
        TargetFolderId::DistinguishedFolderId {
            id: name.as_str().to_string(),
        }
    }
}

impl From<DistinguishedFolderName> for TargetFolderId {
    fn from(name: DistinguishedFolderName) -> Self {
        TargetFolderId::distinguished(name)
    }
}

impl From<FolderId> for TargetFolderId {
    fn from(id: FolderId) -> Self {
        TargetFolderId::FolderId(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DisposalType {
    HardDelete,
    SoftDelete,
    MoveToDeletedItems,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum AffectedTaskOccurrences {
    #[default]
    AllOccurrences,
    SpecifiedOccurrenceOnly,
}
