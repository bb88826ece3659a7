//! CPU backend implementation
//!
//! Reference implementation of the [`Backend`] trait. Work items execute
//! in parallel on the Rayon thread pool; buffers live in host memory
//! behind per-buffer locks.
//!
//! # Architecture
//!
//! ```text
//! CpuBackend
//! ├── MemoryManager  - DashMap of per-RwLock'd buffers
//! └── CpuExecutor    - Rayon dispatch, one context per work item
//! ```

mod executor_impl;
pub(crate) mod memory;

use crate::backend::{Backend, BufferHandle, Kernel, KernelBindings};
use crate::error::Result;
use executor_impl::CpuExecutor;
use memory::MemoryManager;
use std::sync::Arc;

/// CPU backend for executing data-parallel kernels
#[derive(Clone)]
pub struct CpuBackend {
    /// Memory manager; per-buffer locking, no outer lock
    memory: Arc<MemoryManager>,
}

impl CpuBackend {
    /// Create a new CPU backend
    pub fn new() -> Self {
        Self {
            memory: Arc::new(MemoryManager::new()),
        }
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for CpuBackend {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn execute_kernel(
        &mut self,
        kernel: &dyn Kernel,
        bindings: &KernelBindings,
        work_items: usize,
    ) -> Result<()> {
        let executor = CpuExecutor::new(Arc::clone(&self.memory));
        executor.execute(kernel, bindings, work_items)
    }

    fn allocate_buffer(&mut self, size: usize) -> Result<BufferHandle> {
        self.memory.allocate_buffer(size)
    }

    fn free_buffer(&mut self, handle: BufferHandle) -> Result<()> {
        self.memory.free_buffer(handle)
    }

    fn copy_to_buffer(&mut self, handle: BufferHandle, data: &[u8]) -> Result<()> {
        self.memory.copy_to_buffer(handle, data)
    }

    fn copy_from_buffer(&mut self, handle: BufferHandle, data: &mut [u8]) -> Result<()> {
        self.memory.copy_from_buffer(handle, data)
    }

    fn buffer_size(&self, handle: BufferHandle) -> Result<usize> {
        self.memory.buffer_size(handle)
    }
}
