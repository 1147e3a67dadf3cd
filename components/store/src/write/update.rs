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

use crate::{ChangeNum, ObjectId, Store, StoreError, StoreObject, StoredObject};

impl<O: StoreObject> Store<O> {
    /// Runs `f` against a working copy of the object while holding the
    /// object's lock. `f` receives the change number the object will carry
    /// if it returns `Some`; returning `None` leaves the object untouched,
    /// as does returning an error.
    pub fn update<T, E>(
        &self,
        object_id: ObjectId,
        f: impl FnOnce(&mut StoredObject<O>, ChangeNum) -> Result<Option<T>, E>,
    ) -> Result<(StoredObject<O>, Option<T>), E>
    where
        E: From<StoreError>,
    {
        let _lock = self.object_lock.lock(object_id);
        let current = self
            .objects
            .get(&object_id)
            .map(|o| o.clone())
            .ok_or(StoreError::NotFound(object_id))?;

        let change_num = self.assign_change_num();
        let mut working = current.clone();
        match f(&mut working, change_num)? {
            Some(result) => {
                let stored = StoredObject {
                    object_id,
                    folder_id: current.folder_id,
                    change_num,
                    created_at: current.created_at,
                    modified_at: Utc::now(),
                    object: working.object,
                };
                self.objects.insert(object_id, stored.clone());
                Ok((stored, Some(result)))
            }
            None => Ok((current, None)),
        }
    }
}
