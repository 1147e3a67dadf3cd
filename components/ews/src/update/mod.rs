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

use store::{ahash::AHashMap, ChangeNum};

use crate::{
    error::item::ItemError,
    types::{
        field::{FieldUri, FieldValue},
        item::{Item, ItemKind},
        request::{ConflictResolution, ItemChangeDescription},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldAction {
    Set(FieldValue),
    Append(FieldValue),
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub field: FieldUri,
    pub action: FieldAction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub conflicts: u32,
    pub read_receipt: bool,
    pub schedule_changed: bool,
}

/// Checks every change description against an item of the given kind and
/// turns them into field updates. Nothing is applied unless all of them
/// are valid.
pub fn prepare(
    kind: ItemKind,
    descriptions: &[ItemChangeDescription],
    is_occurrence: bool,
) -> crate::Result<Vec<FieldUpdate>> {
    let mut updates = Vec::with_capacity(descriptions.len());

    for description in descriptions {
        let field = description.field_uri();
        let update = match description {
            ItemChangeDescription::SetItemField { item, .. }
            | ItemChangeDescription::AppendToItemField { item, .. } => {
                let is_append =
                    matches!(description, ItemChangeDescription::AppendToItemField { .. });
                let populated = item.populated_fields();
                if populated.len() != 1 {
                    return Err(ItemError::incorrect_update_property_count(populated.len()));
                } else if populated[0] != field {
                    return Err(ItemError::incorrect_update_property_count(0).with_field(field));
                } else if is_append && !field.supports_append() {
                    return Err(ItemError::invalid_property_append(field));
                } else if field.is_read_only()
                    || !field.applies_to(kind)
                    || (is_occurrence && is_recurrence_field(field))
                {
                    return Err(ItemError::invalid_property_set(field));
                }

                let value = item
                    .field(field)
                    .ok_or_else(|| ItemError::invalid_property_set(field))?;
                match &value {
                    FieldValue::Text(class) if field == FieldUri::ItemClass => {
                        if !kind.accepts_class(class) {
                            return Err(ItemError::object_type_changed(class));
                        }
                    }
                    FieldValue::Flag(flag) => flag.validate()?,
                    FieldValue::Recurrence(recurrence) => recurrence.validate()?,
                    _ => (),
                }

                FieldUpdate {
                    field,
                    action: if is_append {
                        FieldAction::Append(value)
                    } else {
                        FieldAction::Set(value)
                    },
                }
            }
            ItemChangeDescription::DeleteItemField { .. } => {
                if !field.supports_delete()
                    || !field.applies_to(kind)
                    || (is_occurrence && is_recurrence_field(field))
                {
                    return Err(ItemError::invalid_property_delete(field));
                }
                FieldUpdate {
                    field,
                    action: FieldAction::Delete,
                }
            }
        };
        updates.push(update);
    }

    Ok(updates)
}

/// Applies prepared updates to `item`. Updates to fields written after the
/// change number presented by the client are conflicts, resolved according
/// to `resolution`.
pub fn apply(
    item: &mut Item,
    field_changes: &mut AHashMap<FieldUri, ChangeNum>,
    updates: Vec<FieldUpdate>,
    resolution: ConflictResolution,
    client_change_num: Option<ChangeNum>,
    change_num: ChangeNum,
) -> crate::Result<UpdateOutcome> {
    let mut outcome = UpdateOutcome::default();

    for update in updates {
        let field = update.field;
        let is_conflict = client_change_num.map_or(false, |client_change_num| {
            field_changes
                .get(&field)
                .map_or(false, |changed| *changed > client_change_num)
        });
        if is_conflict {
            outcome.conflicts += 1;
            match resolution {
                ConflictResolution::NeverOverwrite => {
                    return Err(ItemError::irresolvable_conflict().with_field(field))
                }
                ConflictResolution::AutoResolve => continue,
                ConflictResolution::AlwaysOverwrite => (),
            }
        }

        let was_read = item.is_read();
        let is_set = match update.action {
            FieldAction::Set(value) => item.set_field(field, value.into()),
            FieldAction::Append(value) => {
                let value = append(item.field(field), value)
                    .ok_or_else(|| ItemError::invalid_property_append(field))?;
                item.set_field(field, value.into())
            }
            FieldAction::Delete => item.set_field(field, None),
        };
        if !is_set {
            return Err(ItemError::invalid_property_set(field));
        }
        field_changes.insert(field, change_num);

        match field {
            FieldUri::IsRead if !was_read && item.is_read() => {
                outcome.read_receipt = item.read_receipt_requested();
            }
            FieldUri::CalendarRecurrence
            | FieldUri::TaskRecurrence
            | FieldUri::Start
            | FieldUri::StartDate => {
                outcome.schedule_changed = true;
            }
            _ => (),
        }
    }

    check_schedule(item)?;

    Ok(outcome)
}

pub fn check_schedule(item: &Item) -> crate::Result<()> {
    match item {
        Item::CalendarItem(calendar) => match (calendar.start, calendar.end) {
            (Some(start), Some(end)) if end < start => Err(ItemError::end_before_start()),
            _ => Ok(()),
        },
        _ => Ok(()),
    }
}

fn is_recurrence_field(field: FieldUri) -> bool {
    matches!(
        field,
        FieldUri::CalendarRecurrence | FieldUri::TaskRecurrence
    )
}

fn append(current: Option<FieldValue>, value: FieldValue) -> Option<FieldValue> {
    match (current, value) {
        (None, value) => Some(value),
        (Some(FieldValue::Body(mut body)), FieldValue::Body(appended)) => {
            body.value.push_str(&appended.value);
            Some(FieldValue::Body(body))
        }
        (Some(FieldValue::Strings(mut values)), FieldValue::Strings(appended)) => {
            values.extend(appended);
            Some(FieldValue::Strings(values))
        }
        (Some(FieldValue::Mailboxes(mut values)), FieldValue::Mailboxes(appended)) => {
            values.extend(appended);
            Some(FieldValue::Mailboxes(values))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use store::{
        ahash::AHashMap,
        chrono::{Duration, TimeZone, Utc},
    };

    use crate::{
        error::response::ResponseCode,
        types::{
            common::Body,
            field::{FieldUri, FieldValue},
            item::{CalendarItem, Item, ItemCommon, ItemKind},
            request::{ConflictResolution, ItemChangeDescription},
        },
    };

    use super::{apply, prepare, FieldAction};

    fn set(field_uri: FieldUri, item: Item) -> ItemChangeDescription {
        ItemChangeDescription::SetItemField { field_uri, item }
    }

    fn with_common(common: ItemCommon) -> Item {
        Item::Item(common)
    }

    #[test]
    fn prepare_rejects_invalid_changes() {
        let two_fields = with_common(ItemCommon {
            subject: Some("Subject".into()),
            body: Some(Body::text("Body")),
            ..Default::default()
        });
        let subject = with_common(ItemCommon {
            subject: Some("Subject".into()),
            ..Default::default()
        });
        let class = |class: &str| {
            with_common(ItemCommon {
                item_class: Some(class.to_string()),
                ..Default::default()
            })
        };

        for (kind, description, code) in [
            (
                ItemKind::Message,
                set(FieldUri::Subject, two_fields),
                ResponseCode::ErrorIncorrectUpdatePropertyCount,
            ),
            (
                ItemKind::Message,
                set(FieldUri::Body, subject.clone()),
                ResponseCode::ErrorIncorrectUpdatePropertyCount,
            ),
            (
                ItemKind::Message,
                ItemChangeDescription::AppendToItemField {
                    field_uri: FieldUri::Subject,
                    item: subject.clone(),
                },
                ResponseCode::ErrorInvalidPropertyAppend,
            ),
            (
                ItemKind::Message,
                ItemChangeDescription::DeleteItemField {
                    field_uri: FieldUri::ItemClass,
                },
                ResponseCode::ErrorInvalidPropertyDelete,
            ),
            (
                ItemKind::Message,
                ItemChangeDescription::DeleteItemField {
                    field_uri: FieldUri::Size,
                },
                ResponseCode::ErrorInvalidPropertyDelete,
            ),
            (
                ItemKind::Contact,
                set(FieldUri::ItemClass, class("IPM.Task")),
                ResponseCode::ErrorObjectTypeChanged,
            ),
            (
                ItemKind::Contact,
                set(
                    FieldUri::Location,
                    Item::CalendarItem(CalendarItem {
                        location: Some("Room".into()),
                        ..Default::default()
                    }),
                ),
                ResponseCode::ErrorInvalidPropertySet,
            ),
            (
                ItemKind::Message,
                set(
                    FieldUri::Size,
                    with_common(ItemCommon {
                        size: Some(10),
                        ..Default::default()
                    }),
                ),
                ResponseCode::ErrorInvalidPropertySet,
            ),
        ] {
            assert_eq!(
                prepare(kind, &[description.clone()], false)
                    .unwrap_err()
                    .code,
                code,
                "{:?}",
                description
            );
        }

        // A single invalid description rejects the whole change
        assert!(prepare(
            ItemKind::Message,
            &[
                set(FieldUri::Subject, subject),
                ItemChangeDescription::DeleteItemField {
                    field_uri: FieldUri::ItemClass
                }
            ],
            false
        )
        .is_err());

        let updates = prepare(ItemKind::Contact, &[set(FieldUri::ItemClass, class("IPM.Contact.Custom"))], false)
            .unwrap();
        assert_eq!(
            updates[0].action,
            FieldAction::Set(FieldValue::Text("IPM.Contact.Custom".into()))
        );
    }

    #[test]
    fn apply_field_semantics() {
        let mut item = with_common(ItemCommon {
            body: Some(Body::text("A")),
            subject: Some("Old".into()),
            categories: Some(vec!["Red".into()]),
            ..Default::default()
        });
        let mut field_changes = AHashMap::new();

        let updates = prepare(
            ItemKind::Item,
            &[
                ItemChangeDescription::AppendToItemField {
                    field_uri: FieldUri::Body,
                    item: with_common(ItemCommon {
                        body: Some(Body::text("B")),
                        ..Default::default()
                    }),
                },
                ItemChangeDescription::AppendToItemField {
                    field_uri: FieldUri::Categories,
                    item: with_common(ItemCommon {
                        categories: Some(vec!["Blue".into()]),
                        ..Default::default()
                    }),
                },
                set(
                    FieldUri::Subject,
                    with_common(ItemCommon {
                        subject: Some("New".into()),
                        ..Default::default()
                    }),
                ),
                ItemChangeDescription::DeleteItemField {
                    field_uri: FieldUri::Importance,
                },
            ],
            false,
        )
        .unwrap();
        let outcome = apply(
            &mut item,
            &mut field_changes,
            updates,
            ConflictResolution::AutoResolve,
            None,
            5,
        )
        .unwrap();

        assert_eq!(outcome.conflicts, 0);
        let common = item.common();
        assert_eq!(common.body.as_ref().unwrap().value, "AB");
        assert_eq!(
            common.categories.as_deref(),
            Some(&["Red".to_string(), "Blue".to_string()][..])
        );
        assert_eq!(common.subject.as_deref(), Some("New"));
        assert_eq!(common.importance, None);
        assert_eq!(field_changes.get(&FieldUri::Subject), Some(&5));
    }

    #[test]
    fn conflict_resolution() {
        let subject = |text: &str| {
            set(
                FieldUri::Subject,
                with_common(ItemCommon {
                    subject: Some(text.to_string()),
                    ..Default::default()
                }),
            )
        };
        let mut field_changes = AHashMap::from_iter([(FieldUri::Subject, 10)]);

        for (resolution, client_change_num, expected_subject, conflicts) in [
            (ConflictResolution::AutoResolve, Some(5), "Server", 1),
            (ConflictResolution::AlwaysOverwrite, Some(5), "Client", 1),
            (ConflictResolution::AutoResolve, Some(10), "Client", 0),
            (ConflictResolution::AutoResolve, None, "Client", 0),
        ] {
            let mut item = with_common(ItemCommon {
                subject: Some("Server".into()),
                ..Default::default()
            });
            let updates = prepare(ItemKind::Item, &[subject("Client")], false).unwrap();
            let outcome = apply(
                &mut item,
                &mut field_changes.clone(),
                updates,
                resolution,
                client_change_num,
                11,
            )
            .unwrap();
            assert_eq!(item.subject(), Some(expected_subject));
            assert_eq!(outcome.conflicts, conflicts);
        }

        let updates = prepare(ItemKind::Item, &[subject("Client")], false).unwrap();
        assert_eq!(
            apply(
                &mut Item::new(ItemKind::Item),
                &mut field_changes,
                updates,
                ConflictResolution::NeverOverwrite,
                Some(5),
                11,
            )
            .unwrap_err()
            .code,
            ResponseCode::ErrorIrresolvableConflict
        );
    }

    #[test]
    fn calendar_dates() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();
        let mut item = Item::CalendarItem(CalendarItem {
            start: start.into(),
            end: (start + Duration::hours(1)).into(),
            ..Default::default()
        });
        let updates = prepare(
            ItemKind::CalendarItem,
            &[set(
                FieldUri::End,
                Item::CalendarItem(CalendarItem {
                    end: (start - Duration::hours(1)).into(),
                    ..Default::default()
                }),
            )],
            false,
        )
        .unwrap();
        assert_eq!(
            apply(
                &mut item,
                &mut AHashMap::new(),
                updates,
                ConflictResolution::AutoResolve,
                None,
                1
            )
            .unwrap_err()
            .code,
            ResponseCode::ErrorCalendarEndDateIsEarlierThanStartDate
        );
    }
}
