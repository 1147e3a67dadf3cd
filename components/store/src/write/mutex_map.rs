use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};

/// Fixed set of mutexes addressed by key, so that writers on the same
/// object serialize while writers on other objects rarely contend.
pub struct MutexMap<T: Default> {
    map: Box<[Mutex<T>]>,
    mask: u64,
}

#[allow(clippy::mutex_atomic)]
impl<T: Default> MutexMap<T> {
    pub fn with_capacity(size: usize) -> MutexMap<T> {
        let size = size.max(1).next_power_of_two();
        MutexMap {
            map: (0..size)
                .map(|_| T::default().into())
                .collect::<Vec<Mutex<T>>>()
                .into_boxed_slice(),
            mask: (size - 1) as u64,
        }
    }

    pub fn lock<U>(&self, key: U) -> MutexGuard<'_, T>
    where
        U: Into<u64> + Copy,
    {
        self.map[self.shard(key)].lock()
    }

    pub fn try_lock<U>(&self, key: U, timeout: Duration) -> Option<MutexGuard<'_, T>>
    where
        U: Into<u64> + Copy,
    {
        self.map[self.shard(key)].try_lock_for(timeout)
    }

    #[inline(always)]
    fn shard<U: Into<u64>>(&self, key: U) -> usize {
        (key.into() & self.mask) as usize
    }

    pub fn capacity(&self) -> usize {
        self.map.len()
    }
}
