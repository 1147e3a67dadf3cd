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

use store::{FolderId, ObjectId};

use crate::{
    batch::Slot,
    id::Addressing,
    mailbox::Mailbox,
    types::{
        folder::{AffectedTaskOccurrences, DisposalType, DistinguishedFolderName},
        id::BaseItemId,
        item::ItemKind,
        request::DeleteItemRequest,
        response::ResponseMessage,
    },
};

impl Mailbox {
    pub fn delete_item(
        &self,
        slot: &mut Slot,
        item_id: &BaseItemId,
        options: &DeleteItemRequest,
    ) -> crate::Result<ResponseMessage> {
        slot.resolving();
        let resolved = self.resolve_item(item_id)?;
        let stored = &resolved.stored;
        let object_id = stored.object_id;

        match &resolved.identifier.addressing {
            Addressing::Recurrence { original_start } => {
                slot.mutating();
                self.store.update(
                    object_id,
                    |stored, _| -> crate::Result<Option<()>> {
                        self.find_occurrence(&stored.object, |series| {
                            series.by_original_start(*original_start)
                        })?;
                        stored.object.exceptions.delete(*original_start);
                        Ok(Some(()))
                    },
                )?;
            }
            Addressing::Range { windows } => {
                slot.mutating();
                self.store.update(
                    object_id,
                    |stored, _| -> crate::Result<Option<()>> {
                        let record = &mut stored.object;
                        let original_starts = self
                            .series(record)
                            .map(|series| {
                                series
                                    .matching(windows)
                                    .into_iter()
                                    .map(|occurrence| occurrence.original_start)
                                    .collect::<Vec<_>>()
                            })
                            .unwrap_or_default();
                        if original_starts.is_empty() {
                            return Ok(None);
                        }
                        for original_start in original_starts {
                            record.exceptions.delete(original_start);
                        }
                        Ok(Some(()))
                    },
                )?;
            }
            Addressing::Normal | Addressing::Series
                if stored.object.item.kind() == ItemKind::Task
                    && stored.object.item.recurrence().is_some()
                    && options.affected_task_occurrences
                        == Some(AffectedTaskOccurrences::SpecifiedOccurrenceOnly) =>
            {
                slot.mutating();
                let (_, remaining) = self.store.update(
                    object_id,
                    |stored, _| -> crate::Result<Option<bool>> {
                        let record = &mut stored.object;
                        let series = match self.series(record) {
                            Some(series) => series,
                            None => return Ok(None),
                        };
                        let mut active = series.active();
                        match active.next() {
                            Some(current) => {
                                let original_start = current.original_start;
                                let has_next = active.next().is_some();
                                record.exceptions.delete(original_start);
                                Ok(Some(has_next))
                            }
                            None => Ok(None),
                        }
                    },
                )?;
                // Completing the last occurrence removes the whole task
                if remaining != Some(true) {
                    self.dispose(object_id, stored.folder_id, options.delete_type)?;
                }
            }
            Addressing::Normal | Addressing::Series => {
                slot.mutating();
                self.dispose(object_id, stored.folder_id, options.delete_type)?;
            }
        }

        Ok(ResponseMessage::success())
    }

    /// Removes an item according to the requested disposal type.
    pub fn dispose(
        &self,
        object_id: ObjectId,
        folder_id: FolderId,
        delete_type: DisposalType,
    ) -> crate::Result<()> {
        match delete_type {
            DisposalType::HardDelete => {
                self.store.delete(object_id)?;
            }
            DisposalType::SoftDelete => {
                self.store.soft_delete(object_id)?;
            }
            DisposalType::MoveToDeletedItems => {
                let deleted_items =
                    self.distinguished_folder(DistinguishedFolderName::DeletedItems)?;
                if folder_id == deleted_items {
                    self.store.soft_delete(object_id)?;
                } else {
                    self.store.move_to(object_id, deleted_items)?;
                }
            }
        }
        Ok(())
    }
}
