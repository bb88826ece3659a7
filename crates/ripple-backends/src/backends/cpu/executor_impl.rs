//! CPU implementation of kernel dispatch
//!
//! Work items run in parallel across the Rayon thread pool, one
//! [`KernelContext`] per item. The context resolves binding slots to
//! buffers, enforces the declared access modes, and performs element
//! loads/stores through the per-buffer locks of the memory manager.

use crate::backend::{AccessMode, BindingSlot, Kernel, KernelBindings, KernelContext};
use crate::backends::cpu::memory::MemoryManager;
use crate::error::{BackendError, Result};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Bytes per buffer element
const ELEM_BYTES: usize = std::mem::size_of::<i64>();

/// CPU executor
pub struct CpuExecutor {
    memory: Arc<MemoryManager>,
}

impl CpuExecutor {
    /// Create a new CPU executor over `memory`
    pub fn new(memory: Arc<MemoryManager>) -> Self {
        Self { memory }
    }

    /// Execute `kernel` once per global index in `[0, work_items)`
    ///
    /// Parallelism is per work item; the call returns only after every
    /// item completed, so this is the synchronization point between a
    /// dispatch and any host-side read-back. The first failing item
    /// aborts the dispatch via Rayon's `try_for_each` short-circuit.
    pub fn execute(
        &self,
        kernel: &dyn Kernel,
        bindings: &KernelBindings,
        work_items: usize,
    ) -> Result<()> {
        // Reject dead handles before spinning up the pool so a bad
        // binding table fails as a dispatch error, not mid-flight.
        for binding in bindings.iter() {
            self.memory.buffer_size(binding.handle)?;
        }

        debug!(
            kernel = kernel.name(),
            work_items,
            bindings = bindings.len(),
            "dispatching kernel"
        );

        (0..work_items).into_par_iter().try_for_each(|index| {
            let mut ctx = CpuKernelContext {
                memory: &self.memory,
                bindings,
                index,
                work_items,
            };
            kernel.invoke(&mut ctx)
        })
    }
}

/// Per-work-item execution context for the CPU backend
struct CpuKernelContext<'a> {
    memory: &'a MemoryManager,
    bindings: &'a KernelBindings,
    index: usize,
    work_items: usize,
}

impl CpuKernelContext<'_> {
    fn resolve(&self, slot: BindingSlot, want: AccessMode) -> Result<crate::backend::BufferBinding> {
        let binding = *self
            .bindings
            .get(slot)
            .ok_or(BackendError::UnboundSlot(slot.0))?;

        if binding.mode != want {
            let reason = match want {
                AccessMode::ReadOnly => "load from write-only buffer",
                AccessMode::WriteOnly => "store to read-only buffer",
            };
            return Err(BackendError::AccessViolation {
                slot: slot.0,
                reason: reason.to_string(),
            });
        }

        Ok(binding)
    }
}

impl KernelContext for CpuKernelContext<'_> {
    fn global_id(&self) -> usize {
        self.index
    }

    fn work_items(&self) -> usize {
        self.work_items
    }

    fn load_i64(&self, slot: BindingSlot, index: usize) -> Result<i64> {
        let binding = self.resolve(slot, AccessMode::ReadOnly)?;
        let bytes = self
            .memory
            .load_bytes(binding.handle, index * ELEM_BYTES, ELEM_BYTES)?;
        Ok(bytemuck::pod_read_unaligned::<i64>(&bytes))
    }

    fn store_i64(&mut self, slot: BindingSlot, index: usize, value: i64) -> Result<()> {
        let binding = self.resolve(slot, AccessMode::WriteOnly)?;
        self.memory
            .store_bytes(binding.handle, index * ELEM_BYTES, bytemuck::bytes_of(&value))
    }
}
