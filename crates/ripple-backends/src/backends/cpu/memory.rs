//! Memory manager for the CPU backend
//!
//! Buffers live in host memory behind a DashMap with per-buffer locking:
//! concurrent work items touching different buffers never contend, and
//! two items storing into the same buffer serialize on that buffer's
//! write lock only.

use crate::backend::BufferHandle;
use crate::error::{BackendError, Result};
use crate::sync::{lock_mutex, read_lock, write_lock, Mutex, RwLock};
use dashmap::DashMap;
use std::sync::Arc;

/// Host-memory buffer store with per-buffer locking
pub struct MemoryManager {
    /// Per-buffer RwLock so disjoint element writes within one dispatch
    /// serialize per buffer rather than per backend
    buffers: Arc<DashMap<u64, Arc<RwLock<Vec<u8>>>>>,

    /// Next buffer handle id
    next_buffer_id: Arc<Mutex<u64>>,
}

impl MemoryManager {
    /// Create an empty memory manager
    pub fn new() -> Self {
        Self {
            buffers: Arc::new(DashMap::new()),
            next_buffer_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Allocate a zero-filled buffer
    pub fn allocate_buffer(&self, size: usize) -> Result<BufferHandle> {
        let id = {
            let mut next_id = lock_mutex(&self.next_buffer_id);
            let id = *next_id;
            *next_id += 1;
            id
        };

        self.buffers.insert(id, Arc::new(RwLock::new(vec![0u8; size])));

        Ok(BufferHandle(id))
    }

    /// Free a buffer
    pub fn free_buffer(&self, handle: BufferHandle) -> Result<()> {
        self.buffers
            .remove(&handle.0)
            .ok_or(BackendError::InvalidBufferHandle(handle.0))?;
        Ok(())
    }

    /// Copy host data into the front of a buffer
    pub fn copy_to_buffer(&self, handle: BufferHandle, data: &[u8]) -> Result<()> {
        let buffer = self
            .buffers
            .get(&handle.0)
            .ok_or(BackendError::InvalidBufferHandle(handle.0))?;
        let mut guard = write_lock(&buffer);

        if data.len() > guard.len() {
            return Err(BackendError::BufferOutOfBounds {
                offset: 0,
                size: data.len(),
                buffer_size: guard.len(),
            });
        }

        guard[..data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Copy the front of a buffer back to host data
    pub fn copy_from_buffer(&self, handle: BufferHandle, data: &mut [u8]) -> Result<()> {
        let buffer = self
            .buffers
            .get(&handle.0)
            .ok_or(BackendError::InvalidBufferHandle(handle.0))?;
        let guard = read_lock(&buffer);

        if data.len() > guard.len() {
            return Err(BackendError::BufferOutOfBounds {
                offset: 0,
                size: data.len(),
                buffer_size: guard.len(),
            });
        }

        data.copy_from_slice(&guard[..data.len()]);
        Ok(())
    }

    /// Get buffer size in bytes
    pub fn buffer_size(&self, handle: BufferHandle) -> Result<usize> {
        let buffer = self
            .buffers
            .get(&handle.0)
            .ok_or(BackendError::InvalidBufferHandle(handle.0))?;
        let guard = read_lock(&buffer);
        Ok(guard.len())
    }

    /// Load `len` bytes at `offset` from a buffer
    pub fn load_bytes(&self, handle: BufferHandle, offset: usize, len: usize) -> Result<Vec<u8>> {
        let buffer = self
            .buffers
            .get(&handle.0)
            .ok_or(BackendError::InvalidBufferHandle(handle.0))?;
        let guard = read_lock(&buffer);

        let end = offset.checked_add(len).ok_or(BackendError::BufferOutOfBounds {
            offset,
            size: len,
            buffer_size: guard.len(),
        })?;
        if end > guard.len() {
            return Err(BackendError::BufferOutOfBounds {
                offset,
                size: len,
                buffer_size: guard.len(),
            });
        }

        Ok(guard[offset..end].to_vec())
    }

    /// Store bytes at `offset` into a buffer
    pub fn store_bytes(&self, handle: BufferHandle, offset: usize, data: &[u8]) -> Result<()> {
        let buffer = self
            .buffers
            .get(&handle.0)
            .ok_or(BackendError::InvalidBufferHandle(handle.0))?;
        let mut guard = write_lock(&buffer);

        let end = offset.checked_add(data.len()).ok_or(BackendError::BufferOutOfBounds {
            offset,
            size: data.len(),
            buffer_size: guard.len(),
        })?;
        if end > guard.len() {
            return Err(BackendError::BufferOutOfBounds {
                offset,
                size: data.len(),
                buffer_size: guard.len(),
            });
        }

        guard[offset..end].copy_from_slice(data);
        Ok(())
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}
