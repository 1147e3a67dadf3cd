use store::chrono::{NaiveDate, Weekday};

use crate::error::item::ItemError;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Recurrence {
    #[serde(rename = "Pattern")]
    pub pattern: RecurrencePattern,
    #[serde(rename = "Range")]
    pub range: RecurrenceRange,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RecurrencePattern {
    #[serde(rename = "DailyRecurrence")]
    Daily {
        #[serde(rename = "Interval")]
        interval: u32,
    },
    #[serde(rename = "WeeklyRecurrence")]
    Weekly {
        #[serde(rename = "Interval")]
        interval: u32,
        #[serde(rename = "DaysOfWeek")]
        days_of_week: Vec<DayOfWeek>,
    },
    #[serde(rename = "AbsoluteMonthlyRecurrence")]
    AbsoluteMonthly {
        #[serde(rename = "Interval")]
        interval: u32,
        #[serde(rename = "DayOfMonth")]
        day_of_month: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RecurrenceRange {
    #[serde(rename = "NoEndRecurrence")]
    NoEnd {
        #[serde(rename = "StartDate")]
        start_date: NaiveDate,
    },
    #[serde(rename = "EndDateRecurrence")]
    EndDate {
        #[serde(rename = "StartDate")]
        start_date: NaiveDate,
        #[serde(rename = "EndDate")]
        end_date: NaiveDate,
    },
    #[serde(rename = "NumberedRecurrence")]
    Numbered {
        #[serde(rename = "StartDate")]
        start_date: NaiveDate,
        #[serde(rename = "NumberOfOccurrences")]
        number_of_occurrences: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

impl RecurrenceRange {
    pub fn start_date(&self) -> NaiveDate {
        match self {
            RecurrenceRange::NoEnd { start_date }
            | RecurrenceRange::EndDate { start_date, .. }
            | RecurrenceRange::Numbered { start_date, .. } => *start_date,
        }
    }
}

impl Recurrence {
    pub fn validate(&self) -> crate::Result<()> {
        match &self.pattern {
            RecurrencePattern::Daily { interval } => {
                if *interval == 0 || *interval > 999 {
                    return Err(ItemError::invalid_recurrence(
                        "Daily interval must be between 1 and 999.",
                    ));
                }
            }
            RecurrencePattern::Weekly {
                interval,
                days_of_week,
            } => {
                if *interval == 0 || *interval > 99 {
                    return Err(ItemError::invalid_recurrence(
                        "Weekly interval must be between 1 and 99.",
                    ));
                } else if days_of_week.is_empty() {
                    return Err(ItemError::invalid_recurrence(
                        "Weekly recurrences require at least one day of the week.",
                    ));
                }
            }
            RecurrencePattern::AbsoluteMonthly {
                interval,
                day_of_month,
            } => {
                if *interval == 0 || *interval > 99 {
                    return Err(ItemError::invalid_recurrence(
                        "Monthly interval must be between 1 and 99.",
                    ));
                } else if !(1..=31).contains(day_of_month) {
                    return Err(ItemError::invalid_recurrence(
                        "Day of month must be between 1 and 31.",
                    ));
                }
            }
        }

        match &self.range {
            RecurrenceRange::Numbered {
                number_of_occurrences,
                ..
            } if *number_of_occurrences == 0 => Err(ItemError::invalid_recurrence(
                "NumberOfOccurrences must be at least 1.",
            )),
            RecurrenceRange::EndDate {
                start_date,
                end_date,
            } if end_date < start_date => Err(ItemError::invalid_recurrence(
                "EndDate cannot be earlier than StartDate.",
            )),
            _ => Ok(()),
        }
    }
}
