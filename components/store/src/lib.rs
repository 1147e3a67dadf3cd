pub mod config;
pub mod core;
pub mod read;
pub mod serialize;
pub mod write;

pub use ahash;
pub use blake3;
pub use chrono;
pub use dashmap;
pub use parking_lot;
pub use roaring;
pub use tracing;

use std::sync::atomic::{AtomicU32, AtomicU64};

use ahash::RandomState;
use config::store::StoreConfig;
use dashmap::DashMap;
use parking_lot::RwLock;
use roaring::RoaringTreemap;
use write::mutex_map::MutexMap;

pub use crate::core::{
    error::StoreError,
    folder::Folder,
    object::{RecoverableObject, StoreObject, StoredObject},
};

pub type ObjectId = u64;
pub type FolderId = u32;
pub type ChangeNum = u64;

pub type Result<T> = std::result::Result<T, StoreError>;

pub struct Store<O: StoreObject> {
    pub config: StoreConfig,

    pub(crate) objects: DashMap<ObjectId, StoredObject<O>, RandomState>,
    pub(crate) recoverable: DashMap<ObjectId, RecoverableObject<O>, RandomState>,
    pub(crate) folder_index: DashMap<FolderId, RoaringTreemap, RandomState>,
    pub(crate) folders: RwLock<Vec<Folder>>,

    pub(crate) object_lock: MutexMap<()>,
    pub(crate) object_id: AtomicU64,
    pub(crate) change_num: AtomicU64,
    pub(crate) folder_id: AtomicU32,
}

impl<O: StoreObject> Store<O> {
    pub fn new(config: StoreConfig) -> Self {
        Store {
            object_lock: MutexMap::with_capacity(config.lock_shards),
            config,
            objects: DashMap::with_hasher(RandomState::new()),
            recoverable: DashMap::with_hasher(RandomState::new()),
            folder_index: DashMap::with_hasher(RandomState::new()),
            folders: RwLock::new(Vec::new()),
            object_id: AtomicU64::new(0),
            change_num: AtomicU64::new(0),
            folder_id: AtomicU32::new(0),
        }
    }
}
