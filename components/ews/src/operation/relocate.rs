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

use crate::{
    batch::Slot,
    error::item::ItemError,
    id::Addressing,
    mailbox::Mailbox,
    types::{id::BaseItemId, request::RelocateItemRequest, response::ResponseMessage},
};

impl Mailbox {
    /// Copies or moves an item into another folder. Moved items are issued
    /// a new identifier, the old one stops resolving.
    pub fn relocate_item(
        &self,
        slot: &mut Slot,
        item_id: &BaseItemId,
        options: &RelocateItemRequest,
        is_move: bool,
    ) -> crate::Result<ResponseMessage> {
        slot.resolving();
        let folder_id = self.resolve_folder(&options.to_folder_id)?;
        let resolved = self.resolve_item(item_id)?;
        match &resolved.identifier.addressing {
            Addressing::Recurrence { .. } => {
                return Err(ItemError::cannot_move_or_copy_occurrence())
            }
            Addressing::Range { .. } => {
                return Err(ItemError::invalid_operation(
                    "Occurrence ranges cannot be moved or copied.",
                ))
            }
            Addressing::Normal | Addressing::Series => (),
        }

        slot.mutating();
        let stored = if is_move {
            self.store.move_to(resolved.stored.object_id, folder_id)?
        } else {
            self.store.copy_to(resolved.stored.object_id, folder_id)?
        };

        if options.return_new_item_ids.unwrap_or(true) {
            Ok(ResponseMessage::with_item(
                self.item_id_only(&stored, Addressing::Normal),
            ))
        } else {
            Ok(ResponseMessage::success())
        }
    }
}
