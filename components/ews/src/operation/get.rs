use store::StoredObject;

use crate::{
    batch::Slot,
    id::Addressing,
    mailbox::{ItemRecord, Mailbox},
    recurrence::{materialize, Occurrence},
    types::{
        common::{CalendarItemType, DateTimePrecision, TaskStatus},
        id::{BaseItemId, ItemId},
        item::{DeletedOccurrenceInfo, Item, OccurrenceInfo},
        response::ResponseMessage,
    },
};

impl Mailbox {
    pub fn get_item(
        &self,
        slot: &mut Slot,
        item_id: &BaseItemId,
        precision: DateTimePrecision,
    ) -> crate::Result<ResponseMessage> {
        slot.resolving();
        let resolved = self.resolve_item(item_id)?;
        let stored = &resolved.stored;

        let items = match &resolved.identifier.addressing {
            Addressing::Normal | Addressing::Series => vec![self.item_view(stored, precision)],
            Addressing::Recurrence { original_start } => {
                let occurrence = self.find_occurrence(&stored.object, |series| {
                    series.by_original_start(*original_start)
                })?;
                vec![self.occurrence_view(stored, &occurrence, precision)]
            }
            Addressing::Range { windows } => self
                .series(&stored.object)
                .map(|series| {
                    series
                        .matching(windows)
                        .into_iter()
                        .map(|occurrence| self.occurrence_view(stored, occurrence, precision))
                        .collect()
                })
                .unwrap_or_default(),
        };

        Ok(ResponseMessage::with_items(items))
    }

    /// The item as returned to clients, with every computed field filled in.
    pub fn item_view(
        &self,
        stored: &StoredObject<ItemRecord>,
        precision: DateTimePrecision,
    ) -> Item {
        let record = &stored.object;
        let mut item = record.item.clone();
        self.set_computed(&mut item, stored, self.item_id(stored, Addressing::Normal));

        let series = self.series(record);
        match &mut item {
            Item::CalendarItem(calendar) => match &series {
                Some(series) => {
                    let occurrence_info = |occurrence: &Occurrence| OccurrenceInfo {
                        item_id: self.item_id(
                            stored,
                            Addressing::Recurrence {
                                original_start: occurrence.original_start,
                            },
                        ),
                        start: occurrence.start,
                        end: occurrence.end,
                        original_start: occurrence.original_start,
                    };
                    calendar.calendar_item_type = CalendarItemType::RecurringMaster.into();
                    calendar.first_occurrence = series.active().next().map(occurrence_info);
                    calendar.last_occurrence = series.active().last().map(occurrence_info);
                    let modified = series
                        .active()
                        .filter(|occurrence| occurrence.is_exception)
                        .map(occurrence_info)
                        .collect::<Vec<_>>();
                    if !modified.is_empty() {
                        calendar.modified_occurrences = modified.into();
                    }
                    let deleted = series
                        .deleted()
                        .map(|occurrence| DeletedOccurrenceInfo {
                            start: occurrence.original_start,
                        })
                        .collect::<Vec<_>>();
                    if !deleted.is_empty() {
                        calendar.deleted_occurrences = deleted.into();
                    }
                }
                None => {
                    calendar.calendar_item_type = CalendarItemType::Single.into();
                }
            },
            Item::Task(task) => {
                // A recurring task shows its next pending occurrence
                if let Some(occurrence) = series.as_ref().and_then(|s| s.active().next()) {
                    task.start_date = occurrence.start.into();
                    task.due_date = occurrence.end.into();
                }
            }
            _ => (),
        }

        item.truncate_dates(precision);
        item
    }

    pub fn occurrence_view(
        &self,
        stored: &StoredObject<ItemRecord>,
        occurrence: &Occurrence,
        precision: DateTimePrecision,
    ) -> Item {
        let mut item = materialize(&stored.object.item, &stored.object.exceptions, occurrence);
        self.set_computed(
            &mut item,
            stored,
            self.item_id(
                stored,
                Addressing::Recurrence {
                    original_start: occurrence.original_start,
                },
            ),
        );
        item.truncate_dates(precision);
        item
    }

    fn set_computed(&self, item: &mut Item, stored: &StoredObject<ItemRecord>, item_id: ItemId) {
        let record = &stored.object;
        let size = serde_json::to_vec(&record.item).map_or(0, |bytes| bytes.len() as u64);
        let display_to = match &record.item {
            Item::Message(message) => message.to_recipients.as_ref().map(|recipients| {
                recipients
                    .iter()
                    .map(|recipient| recipient.display_name())
                    .collect::<Vec<_>>()
                    .join("; ")
            }),
            _ => None,
        };

        let common = item.common_mut();
        common.item_id = item_id.into();
        common.parent_folder_id = self
            .folder_identifier(stored.folder_id)
            .to_folder_id()
            .into();
        common.date_time_created = stored.created_at.into();
        common.date_time_received = stored.created_at.into();
        common.last_modified_time = stored.modified_at.into();
        common.date_time_sent = record.sent_at;
        common.size = size.into();
        common.display_to = display_to;

        match item {
            Item::PostItem(post) => post.posted_time = stored.created_at.into(),
            Item::Task(task) => {
                task.is_complete = (task.status == Some(TaskStatus::Completed)
                    || task.percent_complete.map_or(false, |p| p >= 100.0))
                .into()
            }
            _ => (),
        }
    }
}
