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

use crate::{Folder, FolderId, Store, StoreError, StoreObject, StoredObject};

impl<O: StoreObject> Store<O> {
    pub fn folder(&self, folder_id: FolderId) -> Option<Folder> {
        self.folders
            .read()
            .iter()
            .find(|f| f.folder_id == folder_id)
            .cloned()
    }

    pub fn folders(&self) -> Vec<Folder> {
        self.folders.read().clone()
    }

    pub fn folder_len(&self, folder_id: FolderId) -> crate::Result<u64> {
        self.folder_index
            .get(&folder_id)
            .map(|index| index.len())
            .ok_or(StoreError::FolderNotFound(folder_id))
    }

    /// Objects filed in a folder, in ascending identifier order.
    pub fn folder_objects(&self, folder_id: FolderId) -> crate::Result<Vec<StoredObject<O>>> {
        self.find(folder_id, |_| true)
    }

    pub fn find(
        &self,
        folder_id: FolderId,
        filter: impl Fn(&StoredObject<O>) -> bool,
    ) -> crate::Result<Vec<StoredObject<O>>> {
        let object_ids = self
            .folder_index
            .get(&folder_id)
            .map(|index| index.clone())
            .ok_or(StoreError::FolderNotFound(folder_id))?;

        Ok(object_ids
            .into_iter()
            .filter_map(|object_id| {
                self.objects
                    .get(&object_id)
                    .filter(|o| o.folder_id == folder_id && filter(o))
                    .map(|o| o.clone())
            })
            .collect())
    }
}
