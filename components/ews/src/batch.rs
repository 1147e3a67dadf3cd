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

use rayon::prelude::*;
use store::tracing::{debug, trace};

use crate::{
    error::response::ResponseCode,
    mailbox::Mailbox,
    types::{
        common::DateTimePrecision,
        request::{
            CreateItemRequest, DeleteItemRequest, FindItemRequest, GetItemRequest,
            MarkAllItemsAsReadRequest, RelocateItemRequest, UpdateItemRequest,
        },
        response::ResponseMessage,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Pending,
    Resolving,
    Mutating,
    Succeeded,
    Failed(ResponseCode),
}

impl SlotState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SlotState::Succeeded | SlotState::Failed(_))
    }
}

/// Progress of one element of a batch request.
#[derive(Debug)]
pub struct Slot {
    pub operation: &'static str,
    pub index: usize,
    state: SlotState,
}

impl Slot {
    pub fn new(operation: &'static str, index: usize) -> Self {
        Slot {
            operation,
            index,
            state: SlotState::Pending,
        }
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn resolving(&mut self) {
        self.transition(SlotState::Resolving);
    }

    pub fn mutating(&mut self) {
        self.transition(SlotState::Mutating);
    }

    fn transition(&mut self, state: SlotState) {
        if self.state.is_terminal() {
            debug!(
                "{} slot {} is already {:?}, ignoring transition to {:?}.",
                self.operation, self.index, self.state, state
            );
            return;
        }
        trace!(
            "{} slot {}: {:?} -> {:?}",
            self.operation,
            self.index,
            self.state,
            state
        );
        self.state = state;
    }
}

impl Mailbox {
    /// Processes every input independently and returns one response per
    /// input, in request order.
    pub fn run_batch<I, F>(&self, operation: &'static str, inputs: Vec<I>, f: F) -> Vec<ResponseMessage>
    where
        I: Send,
        F: Fn(&mut Slot, I) -> crate::Result<ResponseMessage> + Sync + Send,
    {
        inputs
            .into_par_iter()
            .enumerate()
            .map(|(index, input)| {
                let mut slot = Slot::new(operation, index);
                let response = match f(&mut slot, input) {
                    Ok(response) => {
                        slot.transition(SlotState::Succeeded);
                        response
                    }
                    Err(err) => {
                        debug!("{} slot {} failed: {}", operation, index, err);
                        slot.transition(SlotState::Failed(err.code));
                        err.into()
                    }
                };
                self.observer
                    .slot_completed(operation, index, &slot.state);
                response
            })
            .collect()
    }

    pub fn create_items(&self, request: CreateItemRequest) -> Vec<ResponseMessage> {
        let disposition = request.message_disposition.unwrap_or_default();
        let saved_item_folder_id = request.saved_item_folder_id;
        self.run_batch("CreateItem", request.items, |slot, item| {
            self.create_item(slot, item, disposition, saved_item_folder_id.as_ref())
        })
    }

    pub fn get_items(
        &self,
        request: GetItemRequest,
        precision: DateTimePrecision,
    ) -> Vec<ResponseMessage> {
        self.run_batch("GetItem", request.item_ids, |slot, item_id| {
            self.get_item(slot, &item_id, precision)
        })
    }

    pub fn update_items(&self, mut request: UpdateItemRequest) -> Vec<ResponseMessage> {
        let item_changes = std::mem::take(&mut request.item_changes);
        let options = &request;
        self.run_batch("UpdateItem", item_changes, |slot, change| {
            self.update_item(slot, change, options)
        })
    }

    pub fn delete_items(&self, mut request: DeleteItemRequest) -> Vec<ResponseMessage> {
        let item_ids = std::mem::take(&mut request.item_ids);
        let options = &request;
        self.run_batch("DeleteItem", item_ids, |slot, item_id| {
            self.delete_item(slot, &item_id, options)
        })
    }

    pub fn copy_items(&self, mut request: RelocateItemRequest) -> Vec<ResponseMessage> {
        let item_ids = std::mem::take(&mut request.item_ids);
        let options = &request;
        self.run_batch("CopyItem", item_ids, |slot, item_id| {
            self.relocate_item(slot, &item_id, options, false)
        })
    }

    pub fn move_items(&self, mut request: RelocateItemRequest) -> Vec<ResponseMessage> {
        let item_ids = std::mem::take(&mut request.item_ids);
        let options = &request;
        self.run_batch("MoveItem", item_ids, |slot, item_id| {
            self.relocate_item(slot, &item_id, options, true)
        })
    }

    pub fn mark_all_items_as_read(&self, request: MarkAllItemsAsReadRequest) -> Vec<ResponseMessage> {
        let read_flag = request.read_flag;
        let suppress_read_receipts = request.suppress_read_receipts;
        self.run_batch("MarkAllItemsAsRead", request.folder_ids, |slot, folder_id| {
            self.mark_folder_as_read(slot, &folder_id, read_flag, suppress_read_receipts)
        })
    }

    pub fn find_items(
        &self,
        request: FindItemRequest,
        precision: DateTimePrecision,
    ) -> Vec<ResponseMessage> {
        let restriction = request.restriction;
        self.run_batch("FindItem", request.parent_folder_ids, |slot, folder_id| {
            self.find_in_folder(slot, &folder_id, restriction.as_ref(), precision)
        })
    }
}

#[cfg(test)]
mod tests {
    use store::config::store::StoreConfig;

    use crate::{
        config::EwsConfig,
        error::{item::ItemError, response::ResponseCode},
        mailbox::Mailbox,
        types::response::ResponseMessage,
    };

    use super::{Slot, SlotState};

    #[test]
    fn slot_transitions() {
        let mut slot = Slot::new("GetItem", 0);
        assert_eq!(slot.state(), SlotState::Pending);
        slot.resolving();
        slot.mutating();
        assert_eq!(slot.state(), SlotState::Mutating);
        slot.transition(SlotState::Failed(ResponseCode::ErrorItemNotFound));
        slot.transition(SlotState::Succeeded);
        assert_eq!(
            slot.state(),
            SlotState::Failed(ResponseCode::ErrorItemNotFound)
        );
    }

    #[test]
    fn batch_order() {
        let mailbox = Mailbox::new(StoreConfig::default(), EwsConfig::default()).unwrap();
        let responses = mailbox.run_batch("Test", (0..200).collect(), |slot, value: u32| {
            slot.resolving();
            if value % 3 == 0 {
                Err(ItemError::item_not_found())
            } else {
                Ok(ResponseMessage::success().with_conflicts(value))
            }
        });

        assert_eq!(responses.len(), 200);
        for (value, response) in responses.into_iter().enumerate() {
            if value % 3 == 0 {
                assert_eq!(response.response_code, ResponseCode::ErrorItemNotFound);
            } else {
                assert_eq!(response.conflict_results.unwrap().count, value as u32);
            }
        }
    }
}
