use std::{collections::BTreeMap, sync::Arc};

use store::{
    ahash::AHashMap,
    chrono::{DateTime, Utc},
    config::{env_settings::EnvSettings, store::StoreConfig},
    ChangeNum, FolderId, Store, StoreError, StoreObject, StoredObject,
};

use crate::{
    config::EwsConfig,
    error::item::ItemError,
    id::{
        codec::{truncate_millis, MAX_MONIKER_LEN},
        Addressing, ChangeKey, FolderIdentifier, ItemIdentifier,
        OccurrenceWindow, StorageLocation, StorageType,
    },
    observer::{EventObserver, TracingObserver},
    recurrence::{Occurrence, RecurrenceExceptions, Series},
    types::{
        field::FieldUri,
        folder::{DistinguishedFolderName, TargetFolderId},
        id::{BaseItemId, ItemId},
        item::Item,
    },
};

/// An item as persisted in the store, together with the bookkeeping the
/// protocol needs around it.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub item: Item,
    /// Change number of the last write to each field.
    pub field_changes: AHashMap<FieldUri, ChangeNum>,
    pub exceptions: RecurrenceExceptions,
    pub sent_at: Option<DateTime<Utc>>,
}

impl ItemRecord {
    pub fn new(item: Item) -> Self {
        ItemRecord {
            item,
            field_changes: AHashMap::new(),
            exceptions: RecurrenceExceptions::default(),
            sent_at: None,
        }
    }
}

impl StoreObject for ItemRecord {
    fn duplicate(&self) -> Self {
        ItemRecord {
            item: self.item.clone(),
            field_changes: AHashMap::new(),
            exceptions: RecurrenceExceptions {
                modified: self.exceptions.modified.clone(),
                field_changes: BTreeMap::new(),
                deleted: self.exceptions.deleted.clone(),
            },
            sent_at: self.sent_at,
        }
    }
}

pub struct Mailbox {
    pub store: Store<ItemRecord>,
    pub config: EwsConfig,
    pub observer: Arc<dyn EventObserver>,
    folders: AHashMap<DistinguishedFolderName, FolderId>,
}

/// An item reference resolved against the store. The identifier keeps the
/// addressing mode and the change key presented by the client.
#[derive(Debug, Clone)]
pub struct ResolvedItem {
    pub identifier: ItemIdentifier,
    pub stored: StoredObject<ItemRecord>,
}

impl ResolvedItem {
    pub fn client_change_num(&self) -> Option<ChangeNum> {
        self.identifier.change_key.map(|change_key| change_key.change_num)
    }
}

impl Mailbox {
    pub fn new(store_config: StoreConfig, config: EwsConfig) -> store::Result<Self> {
        if config.mailbox_address.len() > MAX_MONIKER_LEN {
            return Err(StoreError::InvalidArguments(format!(
                "Mailbox address exceeds {} bytes.",
                MAX_MONIKER_LEN
            )));
        }
        let store = Store::new(store_config);
        let root = store.create_folder(None, DistinguishedFolderName::MsgFolderRoot.display_name())?;
        let mut folders = AHashMap::with_capacity(DistinguishedFolderName::ALL.len());
        folders.insert(DistinguishedFolderName::MsgFolderRoot, root);
        for name in DistinguishedFolderName::ALL {
            if name != DistinguishedFolderName::MsgFolderRoot {
                folders.insert(name, store.create_folder(Some(root), name.display_name())?);
            }
        }

        Ok(Mailbox {
            store,
            config,
            observer: Arc::new(TracingObserver),
            folders,
        })
    }

    pub fn init(settings: &EnvSettings) -> store::Result<Self> {
        Mailbox::new(settings.into(), settings.into())
    }

    pub fn with_observer(mut self, observer: Arc<dyn EventObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn distinguished_folder(&self, name: DistinguishedFolderName) -> crate::Result<FolderId> {
        self.folders
            .get(&name)
            .copied()
            .ok_or_else(ItemError::folder_not_found)
    }

    pub fn folder_identifier(&self, folder_id: FolderId) -> FolderIdentifier {
        FolderIdentifier {
            storage_type: StorageType::MailboxItemSmtpAddressBased,
            moniker: self.config.mailbox_address.clone(),
            folder_id,
        }
    }

    pub fn item_identifier(
        &self,
        stored: &StoredObject<ItemRecord>,
        addressing: Addressing,
    ) -> ItemIdentifier {
        ItemIdentifier {
            location: StorageLocation {
                storage_type: StorageType::MailboxItemSmtpAddressBased,
                moniker: self.config.mailbox_address.clone(),
                folder_id: stored.folder_id,
            },
            object_id: stored.object_id,
            change_key: ChangeKey {
                kind: stored.object.item.kind(),
                change_num: stored.change_num,
            }
            .into(),
            addressing,
        }
    }

    pub fn item_id(&self, stored: &StoredObject<ItemRecord>, addressing: Addressing) -> ItemId {
        self.item_identifier(stored, addressing).to_item_id()
    }

    /// An item holding only the identifier of a stored object.
    pub fn item_id_only(&self, stored: &StoredObject<ItemRecord>, addressing: Addressing) -> Item {
        Item::id_only(
            stored.object.item.kind(),
            self.item_id(stored, addressing),
        )
    }

    fn is_own_moniker(&self, moniker: &str) -> bool {
        moniker.eq_ignore_ascii_case(&self.config.mailbox_address)
    }

    pub fn resolve_folder(&self, target: &TargetFolderId) -> crate::Result<FolderId> {
        match target {
            TargetFolderId::DistinguishedFolderId { id } => DistinguishedFolderName::parse(id)
                .ok_or_else(ItemError::folder_not_found)
                .and_then(|name| self.distinguished_folder(name)),
            TargetFolderId::FolderId(folder_id) => {
                let identifier = FolderIdentifier::decode(&folder_id.id)?;
                if self.is_own_moniker(&identifier.moniker)
                    && self.store.folder(identifier.folder_id).is_some()
                {
                    Ok(identifier.folder_id)
                } else {
                    Err(ItemError::folder_not_found())
                }
            }
        }
    }

    pub fn series(&self, record: &ItemRecord) -> Option<Series> {
        Series::new(&record.item, &record.exceptions, self.config.max_occurrences)
    }

    pub fn resolve_item(&self, item_id: &BaseItemId) -> crate::Result<ResolvedItem> {
        match item_id {
            BaseItemId::ItemId(item_id) => {
                let identifier = ItemIdentifier::parse(item_id)?;
                let stored = self.load(&identifier)?;
                match &identifier.addressing {
                    Addressing::Recurrence { original_start } => {
                        self.find_occurrence(&stored.object, |series| {
                            series.by_original_start(*original_start)
                        })?;
                    }
                    Addressing::Series | Addressing::Range { .. }
                        if stored.object.item.recurrence().is_none() =>
                    {
                        return Err(ItemError::item_not_found());
                    }
                    _ => (),
                }
                Ok(ResolvedItem { identifier, stored })
            }
            BaseItemId::OccurrenceItemId {
                recurring_master_id,
                change_key,
                instance_index,
            } => {
                let master = parse_identifier(recurring_master_id, change_key.as_deref())?;
                let stored = self.load(&master)?;
                let occurrence =
                    self.find_occurrence(&stored.object, |series| series.by_index(*instance_index))?;
                Ok(ResolvedItem {
                    identifier: master.with_addressing(Addressing::Recurrence {
                        original_start: occurrence.original_start,
                    }),
                    stored,
                })
            }
            BaseItemId::RecurringMasterItemId {
                occurrence_id,
                change_key,
            } => {
                let occurrence = parse_identifier(occurrence_id, change_key.as_deref())?;
                let stored = self.load(&occurrence)?;
                if stored.object.item.recurrence().is_none() {
                    return Err(ItemError::item_not_found());
                }
                Ok(ResolvedItem {
                    identifier: occurrence.with_addressing(Addressing::Series),
                    stored,
                })
            }
            BaseItemId::RecurringMasterItemIdRanges {
                id,
                change_key,
                ranges,
            } => {
                if ranges.is_empty() || ranges.len() > u8::MAX as usize {
                    return Err(ItemError::invalid_argument(
                        "Between 1 and 255 occurrence ranges are required.",
                    ));
                }
                let master = parse_identifier(id, change_key.as_deref())?;
                let stored = self.load(&master)?;
                if stored.object.item.recurrence().is_none() {
                    return Err(ItemError::invalid_operation(
                        "Occurrence ranges can only address recurring items.",
                    ));
                }
                let windows = ranges
                    .iter()
                    .map(|range| OccurrenceWindow {
                        start: range.start.map(truncate_millis),
                        end: range.end.map(truncate_millis),
                        count: range.count,
                        compare_original_start_time: range
                            .compare_original_start_time
                            .unwrap_or(false),
                    })
                    .collect();
                Ok(ResolvedItem {
                    identifier: master.with_addressing(Addressing::Range { windows }),
                    stored,
                })
            }
        }
    }

    /// Fetches the object an identifier points to. Identifiers issued for a
    /// folder the object no longer lives in do not resolve.
    fn load(&self, identifier: &ItemIdentifier) -> crate::Result<StoredObject<ItemRecord>> {
        if !self.is_own_moniker(&identifier.location.moniker) {
            return Err(ItemError::item_not_found());
        }
        let stored = self
            .store
            .get(identifier.object_id)
            .filter(|stored| stored.folder_id == identifier.location.folder_id)
            .ok_or_else(ItemError::item_not_found)?;
        match identifier.change_key {
            Some(change_key) if change_key.kind != stored.object.item.kind() => Err(
                ItemError::malformed_id("Change key was issued for another item type."),
            ),
            _ => Ok(stored),
        }
    }

    pub fn find_occurrence(
        &self,
        record: &ItemRecord,
        select: impl FnOnce(&Series) -> Option<&Occurrence>,
    ) -> crate::Result<Occurrence> {
        let series = self
            .series(record)
            .ok_or_else(ItemError::occurrence_out_of_range)?;
        match select(&series) {
            Some(occurrence) if occurrence.is_deleted => Err(ItemError::occurrence_deleted()),
            Some(occurrence) => Ok(occurrence.clone()),
            None => Err(ItemError::occurrence_out_of_range()),
        }
    }
}

fn parse_identifier(id: &str, change_key: Option<&str>) -> crate::Result<ItemIdentifier> {
    ItemIdentifier::parse(&ItemId {
        id: id.to_string(),
        change_key: change_key.map(|change_key| change_key.to_string()),
    })
    .map_err(Into::into)
}
