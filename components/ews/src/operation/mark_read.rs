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

use store::{tracing::debug, StoreError};

use crate::{
    batch::Slot,
    mailbox::Mailbox,
    types::{field::FieldUri, folder::TargetFolderId, response::ResponseMessage},
};

impl Mailbox {
    /// Sets the read state of every item in a folder. Items already in the
    /// requested state keep their change key.
    pub fn mark_folder_as_read(
        &self,
        slot: &mut Slot,
        folder_id: &TargetFolderId,
        read_flag: bool,
        suppress_read_receipts: bool,
    ) -> crate::Result<ResponseMessage> {
        slot.resolving();
        let folder_id = self.resolve_folder(folder_id)?;
        let candidates = self
            .store
            .find(folder_id, |stored| stored.object.item.is_read() != read_flag)?;

        slot.mutating();
        let mut changed = 0;
        for candidate in candidates {
            let result = self.store.update(candidate.object_id, |stored, change_num| {
                let record = &mut stored.object;
                if stored.folder_id != folder_id || record.item.is_read() == read_flag {
                    return Ok::<_, StoreError>(None);
                }
                let read_receipt = read_flag && record.item.read_receipt_requested();
                record.item.common_mut().is_read = read_flag.into();
                record.field_changes.insert(FieldUri::IsRead, change_num);
                Ok(Some(read_receipt))
            });

            match result {
                Ok((stored, Some(read_receipt))) => {
                    changed += 1;
                    if read_receipt && !suppress_read_receipts {
                        self.observer.read_receipt(&stored.object.item);
                    }
                }
                Ok((_, None)) => (),
                // Moved or deleted concurrently
                Err(err) if err.is_not_found() => (),
                Err(err) => return Err(err.into()),
            }
        }
        debug!(
            "Marked {} items in folder {} as {}.",
            changed,
            folder_id,
            if read_flag { "read" } else { "unread" }
        );

        Ok(ResponseMessage::success())
    }
}
