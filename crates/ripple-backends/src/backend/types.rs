//! Handle and binding types shared by all backends

/// Opaque handle to a backend-owned buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

impl BufferHandle {
    /// Create a handle from a raw id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id of this handle
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Position of a buffer in a kernel's argument list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingSlot(pub u32);

/// Declared access mode of a bound buffer
///
/// Kernels may only load from `ReadOnly` slots and only store to
/// `WriteOnly` slots; the executing backend enforces this per access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    WriteOnly,
}

/// One entry of a kernel's binding table
#[derive(Debug, Clone, Copy)]
pub struct BufferBinding {
    pub slot: BindingSlot,
    pub handle: BufferHandle,
    pub mode: AccessMode,
}

/// Binding table supplied to [`Backend::execute_kernel`]
///
/// Built with the chained [`bind`](KernelBindings::bind) method:
///
/// ```
/// use ripple_backends::{AccessMode, BindingSlot, BufferHandle, KernelBindings};
///
/// let bindings = KernelBindings::new()
///     .bind(BindingSlot(0), BufferHandle::new(1), AccessMode::WriteOnly)
///     .bind(BindingSlot(1), BufferHandle::new(2), AccessMode::ReadOnly);
/// assert_eq!(bindings.len(), 2);
/// ```
///
/// [`Backend::execute_kernel`]: super::Backend::execute_kernel
#[derive(Debug, Clone, Default)]
pub struct KernelBindings {
    entries: Vec<BufferBinding>,
}

impl KernelBindings {
    /// Create an empty binding table
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handle` to `slot` with the given access mode
    ///
    /// Rebinding an occupied slot replaces the previous entry.
    pub fn bind(mut self, slot: BindingSlot, handle: BufferHandle, mode: AccessMode) -> Self {
        self.entries.retain(|b| b.slot != slot);
        self.entries.push(BufferBinding { slot, handle, mode });
        self
    }

    /// Look up the binding for `slot`
    pub fn get(&self, slot: BindingSlot) -> Option<&BufferBinding> {
        self.entries.iter().find(|b| b.slot == slot)
    }

    /// Number of bound slots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no slots are bound
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all bindings
    pub fn iter(&self) -> impl Iterator<Item = &BufferBinding> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_lookup() {
        let bindings = KernelBindings::new()
            .bind(BindingSlot(0), BufferHandle::new(7), AccessMode::WriteOnly)
            .bind(BindingSlot(3), BufferHandle::new(9), AccessMode::ReadOnly);

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.get(BindingSlot(3)).unwrap().handle, BufferHandle::new(9));
        assert!(bindings.get(BindingSlot(1)).is_none());
    }

    #[test]
    fn test_rebind_replaces_entry() {
        let bindings = KernelBindings::new()
            .bind(BindingSlot(0), BufferHandle::new(1), AccessMode::ReadOnly)
            .bind(BindingSlot(0), BufferHandle::new(2), AccessMode::WriteOnly);

        assert_eq!(bindings.len(), 1);
        let entry = bindings.get(BindingSlot(0)).unwrap();
        assert_eq!(entry.handle, BufferHandle::new(2));
        assert_eq!(entry.mode, AccessMode::WriteOnly);
    }
}
