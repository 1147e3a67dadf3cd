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
use tracing::debug;

use crate::{ObjectId, RecoverableObject, Store, StoreObject, StoredObject};

impl<O: StoreObject> Store<O> {
    /// Removes an object permanently.
    pub fn delete(&self, object_id: ObjectId) -> crate::Result<StoredObject<O>> {
        let _lock = self.object_lock.lock(object_id);
        self.unlink(object_id)
    }

    /// Removes an object from its folder and keeps it in the recoverable
    /// area until it is purged.
    pub fn soft_delete(&self, object_id: ObjectId) -> crate::Result<()> {
        let _lock = self.object_lock.lock(object_id);
        let stored = self.unlink(object_id)?;
        self.recoverable.insert(
            object_id,
            RecoverableObject {
                stored,
                deleted_at: Utc::now(),
            },
        );
        Ok(())
    }

    pub fn purge_recoverable(&self, deleted_before: DateTime<Utc>) -> usize {
        let total = self.recoverable.len();
        self.recoverable
            .retain(|_, object| object.deleted_at >= deleted_before);
        let purged = total.saturating_sub(self.recoverable.len());
        if purged > 0 {
            debug!("Purged {} recoverable objects.", purged);
        }
        purged
    }
}
