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

use chrono::Utc;

use crate::{FolderId, ObjectId, Store, StoreError, StoreObject, StoredObject};

impl<O: StoreObject> Store<O> {
    /// Moves an object to another folder. The object is reassigned a new
    /// identifier and the old one stops resolving.
    pub fn move_to(
        &self,
        object_id: ObjectId,
        folder_id: FolderId,
    ) -> crate::Result<StoredObject<O>> {
        let _lock = self.object_lock.lock(object_id);
        self.ensure_folder(folder_id)?;

        let current = self.unlink(object_id)?;
        let stored = StoredObject {
            object_id: self.assign_object_id(),
            folder_id,
            change_num: self.assign_change_num(),
            created_at: current.created_at,
            modified_at: Utc::now(),
            object: current.object,
        };
        self.link(stored.clone())?;

        Ok(stored)
    }

    pub fn copy_to(
        &self,
        object_id: ObjectId,
        folder_id: FolderId,
    ) -> crate::Result<StoredObject<O>> {
        let object = {
            let _lock = self.object_lock.lock(object_id);
            self.objects
                .get(&object_id)
                .map(|o| o.object.duplicate())
                .ok_or(StoreError::NotFound(object_id))?
        };
        self.insert(folder_id, object)
    }
}
