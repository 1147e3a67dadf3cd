/*
 * Copyright (c) 2020-2022, Stalwart Labs Ltd.
 *
 * This file is part of the Stalwart EWS Server.
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of
 * the License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 * in the LICENSE file at the top-level directory of this distribution.
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 *
 * You can be released from the requirements of the AGPLv3 license by
 * purchasing a commercial license. Please contact licensing@stalw.art
 * for more details.
*/

pub mod expand;

use std::collections::{BTreeMap, BTreeSet};

use store::{
    ahash::AHashMap,
    chrono::{DateTime, Utc},
    ChangeNum,
};

use crate::{
    id::OccurrenceWindow,
    types::{common::CalendarItemType, field::FieldUri, item::Item},
};

use self::expand::expand;

/// Per-occurrence deviations of a recurring series, keyed by the original
/// start time of the occurrence in milliseconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecurrenceExceptions {
    pub modified: BTreeMap<i64, Item>,
    /// Change number of the last write to each field of a modified
    /// occurrence.
    pub field_changes: BTreeMap<i64, AHashMap<FieldUri, ChangeNum>>,
    pub deleted: BTreeSet<i64>,
}

impl RecurrenceExceptions {
    pub fn is_empty(&self) -> bool {
        self.modified.is_empty() && self.deleted.is_empty()
    }

    pub fn clear(&mut self) {
        self.modified.clear();
        self.field_changes.clear();
        self.deleted.clear();
    }

    pub fn delete(&mut self, original_start: DateTime<Utc>) {
        let key = original_start.timestamp_millis();
        self.modified.remove(&key);
        self.field_changes.remove(&key);
        self.deleted.insert(key);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub index: u32,
    pub original_start: DateTime<Utc>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_exception: bool,
    pub is_deleted: bool,
}

/// Expanded view of a recurring item. Indexes are 1-based and stay stable
/// when occurrences are deleted.
#[derive(Debug, Clone)]
pub struct Series {
    pub occurrences: Vec<Occurrence>,
}

impl Series {
    /// Returns `None` for items that do not recur.
    pub fn new(item: &Item, exceptions: &RecurrenceExceptions, max: usize) -> Option<Series> {
        let recurrence = item.recurrence()?;
        let (start, end) = item.schedule()?;
        let duration = end - start;

        let occurrences = expand(recurrence, start, max)
            .into_iter()
            .enumerate()
            .map(|(pos, original_start)| {
                let key = original_start.timestamp_millis();
                let (start, end, is_exception) = match exceptions
                    .modified
                    .get(&key)
                    .and_then(|exception| exception.schedule())
                {
                    Some((start, end)) => (start, end, true),
                    None => (original_start, original_start + duration, false),
                };
                Occurrence {
                    index: pos as u32 + 1,
                    original_start,
                    start,
                    end,
                    is_exception,
                    is_deleted: exceptions.deleted.contains(&key),
                }
            })
            .collect();

        Some(Series { occurrences })
    }

    pub fn active(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.iter().filter(|o| !o.is_deleted)
    }

    pub fn deleted(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.iter().filter(|o| o.is_deleted)
    }

    pub fn by_index(&self, index: u32) -> Option<&Occurrence> {
        self.occurrences.get((index as usize).checked_sub(1)?)
    }

    pub fn by_original_start(&self, original_start: DateTime<Utc>) -> Option<&Occurrence> {
        let key = original_start.timestamp_millis();
        self.occurrences
            .iter()
            .find(|o| o.original_start.timestamp_millis() == key)
    }

    /// Occurrences selected by any of the windows, in series order.
    pub fn matching(&self, windows: &[OccurrenceWindow]) -> Vec<&Occurrence> {
        let mut selected = BTreeSet::new();
        for window in windows {
            let matches = self
                .active()
                .filter(|occurrence| {
                    let date = if window.compare_original_start_time {
                        occurrence.original_start
                    } else {
                        occurrence.start
                    };
                    window.start.map_or(true, |start| date >= start)
                        && window.end.map_or(true, |end| date <= end)
                })
                .take(window.count.map_or(usize::MAX, |count| count as usize));
            selected.extend(matches.map(|occurrence| occurrence.index));
        }

        selected
            .into_iter()
            .filter_map(|index| self.by_index(index))
            .collect()
    }
}

/// Builds the item seen when a single occurrence is addressed.
pub fn materialize(master: &Item, exceptions: &RecurrenceExceptions, occurrence: &Occurrence) -> Item {
    let mut item = exceptions
        .modified
        .get(&occurrence.original_start.timestamp_millis())
        .cloned()
        .unwrap_or_else(|| master.clone());
    item.set_schedule(occurrence.start, occurrence.end);

    match &mut item {
        Item::CalendarItem(calendar) => {
            calendar.recurrence = None;
            calendar.original_start = occurrence.original_start.into();
            calendar.calendar_item_type = if occurrence.is_exception {
                CalendarItemType::Exception
            } else {
                CalendarItemType::Occurrence
            }
            .into();
        }
        Item::Task(task) => task.recurrence = None,
        _ => (),
    }

    item
}
