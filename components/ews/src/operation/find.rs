use crate::{
    batch::Slot,
    mailbox::Mailbox,
    types::{
        common::DateTimePrecision, folder::TargetFolderId, request::Restriction,
        response::ResponseMessage,
    },
};

impl Mailbox {
    /// Lists the items filed directly in a folder.
    pub fn find_in_folder(
        &self,
        slot: &mut Slot,
        folder_id: &TargetFolderId,
        restriction: Option<&Restriction>,
        precision: DateTimePrecision,
    ) -> crate::Result<ResponseMessage> {
        slot.resolving();
        let folder_id = self.resolve_folder(folder_id)?;
        let items = self
            .store
            .find(folder_id, |stored| {
                restriction.map_or(true, |restriction| restriction.matches(&stored.object.item))
            })?
            .iter()
            .map(|stored| self.item_view(stored, precision))
            .collect();

        Ok(ResponseMessage::with_items(items))
    }
}
