use std::sync::atomic::Ordering;

use crate::{ChangeNum, FolderId, ObjectId, Store, StoreObject};

impl<O: StoreObject> Store<O> {
    pub fn assign_object_id(&self) -> ObjectId {
        self.object_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn assign_change_num(&self) -> ChangeNum {
        self.change_num.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn assign_folder_id(&self) -> FolderId {
        self.folder_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}
