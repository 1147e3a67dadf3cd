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

use crate::{FolderId, Store, StoreError, StoreObject, StoredObject};

impl<O: StoreObject> Store<O> {
    pub fn insert(&self, folder_id: FolderId, object: O) -> crate::Result<StoredObject<O>> {
        self.ensure_folder(folder_id)?;

        let now = Utc::now();
        let stored = StoredObject {
            object_id: self.assign_object_id(),
            folder_id,
            change_num: self.assign_change_num(),
            created_at: now,
            modified_at: now,
            object,
        };
        self.link(stored.clone())?;

        Ok(stored)
    }

    /// Publishes an object and then indexes it, so that folder listings
    /// never reference an object that cannot be fetched.
    pub(crate) fn link(&self, stored: StoredObject<O>) -> crate::Result<()> {
        let object_id = stored.object_id;
        let folder_id = stored.folder_id;
        self.objects.insert(object_id, stored);

        match self.folder_index.get_mut(&folder_id) {
            Some(mut index) => {
                index.insert(object_id);
                Ok(())
            }
            None => {
                self.objects.remove(&object_id);
                Err(StoreError::FolderNotFound(folder_id))
            }
        }
    }

    pub(crate) fn unlink(&self, object_id: u64) -> crate::Result<StoredObject<O>> {
        let folder_id = self
            .objects
            .get(&object_id)
            .map(|o| o.folder_id)
            .ok_or(StoreError::NotFound(object_id))?;
        if let Some(mut index) = self.folder_index.get_mut(&folder_id) {
            index.remove(object_id);
        }
        self.objects
            .remove(&object_id)
            .map(|(_, stored)| stored)
            .ok_or(StoreError::NotFound(object_id))
    }
}
