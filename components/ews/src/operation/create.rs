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

use store::chrono::Utc;

use crate::{
    batch::Slot,
    error::item::ItemError,
    id::Addressing,
    mailbox::{ItemRecord, Mailbox},
    types::{
        folder::{DistinguishedFolderName, TargetFolderId},
        item::{Item, ItemKind},
        request::MessageDisposition,
        response::ResponseMessage,
    },
    update::check_schedule,
};

impl Mailbox {
    pub fn create_item(
        &self,
        slot: &mut Slot,
        item: Item,
        disposition: MessageDisposition,
        saved_item_folder_id: Option<&TargetFolderId>,
    ) -> crate::Result<ResponseMessage> {
        slot.resolving();
        let kind = item.kind();
        if disposition != MessageDisposition::SaveOnly && kind != ItemKind::Message {
            return Err(ItemError::invalid_operation(
                "Only messages can be sent.",
            ));
        }
        let folder_id = match (disposition, saved_item_folder_id) {
            (MessageDisposition::SendOnly, _) => None,
            (_, Some(folder_id)) => Some(self.resolve_folder(folder_id)?),
            (MessageDisposition::SendAndSaveCopy, None) => {
                Some(self.distinguished_folder(DistinguishedFolderName::SentItems)?)
            }
            (MessageDisposition::SaveOnly, None) => {
                Some(self.distinguished_folder(kind.default_folder())?)
            }
        };
        let mut item = prepare_new_item(item)?;

        let folder_id = match folder_id {
            Some(folder_id) => folder_id,
            None => {
                self.observer.message_sent(&item);
                return Ok(ResponseMessage::success());
            }
        };

        slot.mutating();
        let is_sent = disposition == MessageDisposition::SendAndSaveCopy;
        if is_sent {
            item.common_mut().is_read = true.into();
        }
        let mut record = ItemRecord::new(item);
        if is_sent {
            record.sent_at = Utc::now().into();
        }
        let stored = self.store.insert(folder_id, record)?;
        if is_sent {
            self.observer.message_sent(&stored.object.item);
        }

        Ok(ResponseMessage::with_item(
            self.item_id_only(&stored, Addressing::Normal),
        ))
    }
}

/// Validates a client supplied item and fills in the defaults every stored
/// item carries.
pub fn prepare_new_item(mut item: Item) -> crate::Result<Item> {
    if let Some(field) = item
        .populated_fields()
        .into_iter()
        .find(|field| field.is_read_only())
    {
        return Err(ItemError::invalid_property_set(field));
    }

    let kind = item.kind();
    let common = item.common_mut();
    let class = common
        .item_class
        .get_or_insert_with(|| kind.default_class().to_string());
    if !kind.accepts_class(class) {
        return Err(ItemError::object_type_changed(class));
    }
    if let Some(flag) = &common.flag {
        flag.validate()?;
    }
    common.importance.get_or_insert_with(Default::default);
    common.sensitivity.get_or_insert_with(Default::default);
    common.is_read.get_or_insert(false);

    if let Some(recurrence) = item.recurrence() {
        recurrence.validate()?;
        if item.schedule().is_none() {
            return Err(ItemError::invalid_recurrence(
                "A recurring item requires a start date.",
            ));
        }
    }
    check_schedule(&item)?;

    Ok(item)
}
