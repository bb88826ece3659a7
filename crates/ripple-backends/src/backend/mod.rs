//! Backend abstraction: the trait plus the handle and binding types

mod traits;
mod types;

pub use traits::{Backend, Kernel, KernelContext};
pub use types::{AccessMode, BindingSlot, BufferBinding, BufferHandle, KernelBindings};
