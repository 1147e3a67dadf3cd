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

use crate::{ChangeNum, ObjectId, RecoverableObject, Store, StoreObject, StoredObject};

impl<O: StoreObject> Store<O> {
    pub fn get(&self, object_id: ObjectId) -> Option<StoredObject<O>> {
        self.objects.get(&object_id).map(|o| o.clone())
    }

    pub fn contains(&self, object_id: ObjectId) -> bool {
        self.objects.contains_key(&object_id)
    }

    pub fn change_num(&self, object_id: ObjectId) -> Option<ChangeNum> {
        self.objects.get(&object_id).map(|o| o.change_num)
    }

    pub fn get_recoverable(&self, object_id: ObjectId) -> Option<RecoverableObject<O>> {
        self.recoverable.get(&object_id).map(|o| o.clone())
    }

    pub fn recoverable_len(&self) -> usize {
        self.recoverable.len()
    }
}
