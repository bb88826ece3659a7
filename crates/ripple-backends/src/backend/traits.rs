//! Backend and kernel traits
//!
//! A [`Kernel`] is a compiled function object invoked once per global
//! index; a [`Backend`] dispatches it across a work-item range and owns
//! the buffers it reads and writes. Kernels never touch buffers directly:
//! all access goes through a [`KernelContext`], which enforces the binding
//! table's access modes and bounds.

use super::types::{BindingSlot, BufferHandle, KernelBindings};
use crate::error::Result;

/// Backend trait for kernel execution
///
/// Backends execute data-parallel kernels over a one-dimensional index
/// space and manage the device buffers those kernels are bound to.
///
/// # Execution Model
///
/// `execute_kernel` launches one logical unit of work per global index in
/// `[0, work_items)`. Work items run in no defined order and may run
/// concurrently; the only writes a well-formed kernel performs are to its
/// own disjoint output slots. The call blocks until every work item has
/// completed, so buffer contents read back afterwards are fully
/// materialized.
///
/// # Errors
///
/// Any work-item failure aborts the dispatch and is returned to the
/// caller; partially-written output buffers must not be treated as valid.
pub trait Backend {
    /// Human-readable backend identifier (e.g. `"cpu"`)
    fn name(&self) -> &'static str;

    /// Execute `kernel` once per global index in `[0, work_items)`
    ///
    /// # Arguments
    ///
    /// * `kernel` - The kernel function object to invoke
    /// * `bindings` - Slot → buffer table the kernel accesses through
    /// * `work_items` - Size of the one-dimensional index space
    fn execute_kernel(
        &mut self,
        kernel: &dyn Kernel,
        bindings: &KernelBindings,
        work_items: usize,
    ) -> Result<()>;

    /// Allocate a zero-filled buffer of the given size in bytes
    fn allocate_buffer(&mut self, size: usize) -> Result<BufferHandle>;

    /// Free a previously allocated buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer handle is invalid.
    fn free_buffer(&mut self, handle: BufferHandle) -> Result<()>;

    /// Copy data from host to buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is invalid or the data does not fit.
    fn copy_to_buffer(&mut self, handle: BufferHandle, data: &[u8]) -> Result<()>;

    /// Copy data from buffer to host
    ///
    /// Blocks until any in-flight dispatch touching the buffer has
    /// completed (trivially true here because `execute_kernel` is itself
    /// blocking).
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is invalid or `data` is larger than
    /// the buffer.
    fn copy_from_buffer(&mut self, handle: BufferHandle, data: &mut [u8]) -> Result<()>;

    /// Get buffer size in bytes
    fn buffer_size(&self, handle: BufferHandle) -> Result<usize>;
}

/// A data-parallel kernel
///
/// Implementations must be pure per index: reads from read-only bindings,
/// writes to this index's own output slots, no other shared state. The
/// same kernel value is shared across all concurrently running work items.
pub trait Kernel: Send + Sync {
    /// Kernel name, used for logging and error reporting
    fn name(&self) -> &str;

    /// Run this kernel for the work item described by `ctx`
    fn invoke(&self, ctx: &mut dyn KernelContext) -> Result<()>;
}

/// Per-work-item view of the dispatch handed to [`Kernel::invoke`]
///
/// Element indexes address `i64` lanes, not bytes. Scalars are bound as
/// single-element buffers and read at index 0.
pub trait KernelContext {
    /// Global index of this work item in `[0, work_items)`
    fn global_id(&self) -> usize;

    /// Total number of work items in the dispatch
    fn work_items(&self) -> usize;

    /// Load element `index` from the buffer bound at `slot`
    ///
    /// # Errors
    ///
    /// `UnboundSlot` if nothing is bound at `slot`, `AccessViolation` if
    /// the slot is write-only, `BufferOutOfBounds` if `index` is past the
    /// end of the buffer.
    fn load_i64(&self, slot: BindingSlot, index: usize) -> Result<i64>;

    /// Store `value` into element `index` of the buffer bound at `slot`
    ///
    /// # Errors
    ///
    /// `UnboundSlot` if nothing is bound at `slot`, `AccessViolation` if
    /// the slot is read-only, `BufferOutOfBounds` if `index` is past the
    /// end of the buffer.
    fn store_i64(&mut self, slot: BindingSlot, index: usize, value: i64) -> Result<()>;
}
