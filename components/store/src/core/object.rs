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

use chrono::{DateTime, Utc};

use crate::{ChangeNum, FolderId, ObjectId};

/// Objects held by the store. `duplicate` produces the payload persisted
/// when an object is copied into another folder.
pub trait StoreObject: Clone + Send + Sync + 'static {
    fn duplicate(&self) -> Self {
        self.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject<O> {
    pub object_id: ObjectId,
    pub folder_id: FolderId,
    pub change_num: ChangeNum,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub object: O,
}

#[derive(Debug, Clone)]
pub struct RecoverableObject<O> {
    pub stored: StoredObject<O>,
    pub deleted_at: DateTime<Utc>,
}
