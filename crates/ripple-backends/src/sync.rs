//! Synchronization primitives used by backend memory managers
//!
//! Thin wrappers over parking_lot so callers acquire locks through one
//! place instead of spreading lock idioms across the crate.

pub use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lock a mutex
#[inline]
pub fn lock_mutex<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock()
}

/// Read lock an RwLock
#[inline]
pub fn read_lock<T>(rwlock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    rwlock.read()
}

/// Write lock an RwLock
#[inline]
pub fn write_lock<T>(rwlock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    rwlock.write()
}
