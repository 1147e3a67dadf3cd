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

use store::{chrono::Utc, tracing::debug};

use crate::{
    batch::Slot,
    error::item::ItemError,
    id::Addressing,
    mailbox::Mailbox,
    recurrence::materialize,
    types::{
        field::FieldUri,
        folder::DistinguishedFolderName,
        item::ItemKind,
        request::{ConflictResolution, ItemChange, MessageDisposition, UpdateItemRequest},
        response::ResponseMessage,
    },
    update::{apply, prepare, UpdateOutcome},
};

impl Mailbox {
    pub fn update_item(
        &self,
        slot: &mut Slot,
        change: ItemChange,
        options: &UpdateItemRequest,
    ) -> crate::Result<ResponseMessage> {
        slot.resolving();
        let resolved = self.resolve_item(&change.item_id)?;
        let original_start = match &resolved.identifier.addressing {
            Addressing::Normal | Addressing::Series => None,
            Addressing::Recurrence { original_start } => Some(*original_start),
            Addressing::Range { .. } => {
                return Err(ItemError::invalid_operation(
                    "Occurrence ranges cannot be updated.",
                ))
            }
        };

        let kind = resolved.stored.object.item.kind();
        let disposition = options.message_disposition.unwrap_or_default();
        if disposition != MessageDisposition::SaveOnly
            && (kind != ItemKind::Message || original_start.is_some())
        {
            return Err(ItemError::invalid_operation(
                "Only messages can be sent.",
            ));
        }
        let saved_folder_id = match (disposition, &options.saved_item_folder_id) {
            (MessageDisposition::SendAndSaveCopy, Some(folder_id)) => {
                Some(self.resolve_folder(folder_id)?)
            }
            (MessageDisposition::SendAndSaveCopy, None) => {
                Some(self.distinguished_folder(DistinguishedFolderName::SentItems)?)
            }
            _ => None,
        };

        let updates = prepare(kind, &change.updates, original_start.is_some())?;
        let client_change_num = resolved.client_change_num();
        let resolution = options.conflict_resolution;

        slot.mutating();
        let (stored, outcome) = self.store.update(
            resolved.stored.object_id,
            |stored, change_num| -> crate::Result<Option<UpdateOutcome>> {
                if resolution == ConflictResolution::NeverOverwrite
                    && client_change_num.map_or(false, |client| client < stored.change_num)
                {
                    return Err(ItemError::irresolvable_conflict());
                }

                let record = &mut stored.object;
                let outcome = match original_start {
                    None => {
                        let outcome = apply(
                            &mut record.item,
                            &mut record.field_changes,
                            updates,
                            resolution,
                            client_change_num,
                            change_num,
                        )?;
                        if outcome.schedule_changed && !record.exceptions.is_empty() {
                            debug!(
                                "Discarding exceptions of object {} after a schedule change.",
                                stored.object_id
                            );
                            record.exceptions.clear();
                        }
                        if record.item.recurrence().is_some() && record.item.schedule().is_none() {
                            return Err(ItemError::invalid_recurrence(
                                "A recurring item requires a start date.",
                            ));
                        }
                        outcome
                    }
                    Some(original_start) => {
                        let occurrence = self.find_occurrence(record, |series| {
                            series.by_original_start(original_start)
                        })?;
                        let key = original_start.timestamp_millis();
                        let mut item = materialize(&record.item, &record.exceptions, &occurrence);
                        item.clear_computed();

                        // Unmodified occurrences show the fields of the master.
                        let mut field_changes = if record.exceptions.modified.contains_key(&key) {
                            record
                                .exceptions
                                .field_changes
                                .get(&key)
                                .cloned()
                                .unwrap_or_default()
                        } else {
                            record.field_changes.clone()
                        };
                        let outcome = apply(
                            &mut item,
                            &mut field_changes,
                            updates,
                            resolution,
                            client_change_num,
                            change_num,
                        )?;
                        record.exceptions.modified.insert(key, item);
                        record.exceptions.field_changes.insert(key, field_changes);
                        outcome
                    }
                };

                Ok(Some(outcome))
            },
        )?;
        let outcome = outcome.unwrap_or_default();

        if outcome.read_receipt && !options.suppress_read_receipts {
            self.observer.read_receipt(&stored.object.item);
        }

        let stored = match disposition {
            MessageDisposition::SaveOnly => stored,
            MessageDisposition::SendOnly => {
                self.observer.message_sent(&stored.object.item);
                self.store.delete(stored.object_id)?;
                return Ok(ResponseMessage::success().with_conflicts(outcome.conflicts));
            }
            MessageDisposition::SendAndSaveCopy => {
                let (stored, _) = self.store.update(
                    stored.object_id,
                    |stored, change_num| -> crate::Result<Option<()>> {
                        let record = &mut stored.object;
                        record.sent_at = Utc::now().into();
                        record.item.common_mut().is_read = true.into();
                        record.field_changes.insert(FieldUri::IsRead, change_num);
                        Ok(Some(()))
                    },
                )?;
                self.observer.message_sent(&stored.object.item);
                match saved_folder_id {
                    Some(folder_id) if folder_id != stored.folder_id => {
                        self.store.move_to(stored.object_id, folder_id)?
                    }
                    _ => stored,
                }
            }
        };

        let addressing = match original_start {
            Some(original_start) => Addressing::Recurrence { original_start },
            None => Addressing::Normal,
        };
        Ok(
            ResponseMessage::with_item(self.item_id_only(&stored, addressing))
                .with_conflicts(outcome.conflicts),
        )
    }
}
