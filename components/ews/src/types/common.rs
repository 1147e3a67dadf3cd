use store::chrono::{DateTime, DurationRound, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Sensitivity {
    #[default]
    Normal,
    Personal,
    Private,
    Confidential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Importance {
    Low,
    #[default]
    Normal,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum BodyType {
    #[serde(rename = "HTML")]
    Html,
    #[default]
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Body {
    #[serde(rename = "BodyType", default)]
    pub body_type: BodyType,
    #[serde(rename = "Value", default)]
    pub value: String,
}

impl Body {
    pub fn text(value: impl Into<String>) -> Self {
        Body {
            body_type: BodyType::Text,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmailAddress {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "EmailAddress")]
    pub email_address: String,
}

impl EmailAddress {
    pub fn new(name: Option<&str>, email_address: impl Into<String>) -> Self {
        EmailAddress {
            name: name.map(|n| n.to_string()),
            email_address: email_address.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email_address)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    WaitingOnOthers,
    Deferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CalendarItemType {
    Single,
    Occurrence,
    Exception,
    RecurringMaster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum DateTimePrecision {
    #[default]
    Seconds,
    Milliseconds,
}

impl DateTimePrecision {
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("seconds") {
            Some(DateTimePrecision::Seconds)
        } else if value.eq_ignore_ascii_case("milliseconds") {
            Some(DateTimePrecision::Milliseconds)
        } else {
            None
        }
    }

    pub fn truncate(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        let unit = match self {
            DateTimePrecision::Seconds => store::chrono::Duration::seconds(1),
            DateTimePrecision::Milliseconds => store::chrono::Duration::milliseconds(1),
        };
        date.duration_trunc(unit).unwrap_or(date)
    }
}

impl std::str::FromStr for DateTimePrecision {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTimePrecision::parse(s).ok_or(())
    }
}
