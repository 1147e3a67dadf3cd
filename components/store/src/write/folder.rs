use crate::{Folder, FolderId, Store, StoreError, StoreObject};

impl<O: StoreObject> Store<O> {
    pub fn create_folder(
        &self,
        parent_id: Option<FolderId>,
        name: impl Into<String>,
    ) -> crate::Result<FolderId> {
        let mut folders = self.folders.write();
        if let Some(parent_id) = parent_id {
            if !folders.iter().any(|f| f.folder_id == parent_id) {
                return Err(StoreError::FolderNotFound(parent_id));
            }
        }
        let name = name.into();
        if folders
            .iter()
            .any(|f| f.parent_id == parent_id && f.name.eq_ignore_ascii_case(&name))
        {
            return Err(StoreError::InvalidArguments(format!(
                "Folder {:?} already exists.",
                name
            )));
        }

        let folder_id = self.assign_folder_id();
        folders.push(Folder {
            folder_id,
            parent_id,
            name,
        });
        self.folder_index.insert(folder_id, Default::default());

        Ok(folder_id)
    }

    pub(crate) fn ensure_folder(&self, folder_id: FolderId) -> crate::Result<()> {
        if self.folder_index.contains_key(&folder_id) {
            Ok(())
        } else {
            Err(StoreError::FolderNotFound(folder_id))
        }
    }
}
