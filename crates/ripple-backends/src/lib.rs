//! Kernel execution backends for fixed-width digit arithmetic
//!
//! This crate provides the execution layer that the carry-propagation
//! driver in `ripple-core` dispatches against: a [`Backend`] trait covering
//! kernel launch and buffer management, and a reference [`CpuBackend`]
//! that runs work items in parallel with Rayon.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                Backend Trait                 │
//! │  - execute_kernel()                          │
//! │  - Buffer management (allocate/free/copy)    │
//! └──────────────────────┬──────────────────────┘
//!                        │
//!                        ▼
//!                  ┌─────────┐
//!                  │   CPU   │
//!                  │ Backend │
//!                  └─────────┘
//! ```

pub mod backend;
pub mod backends;
pub mod error;
pub mod sync;

pub use backend::{
    AccessMode, Backend, BindingSlot, BufferBinding, BufferHandle, Kernel, KernelBindings,
    KernelContext,
};
pub use backends::cpu::CpuBackend;
pub use error::{BackendError, Result};
