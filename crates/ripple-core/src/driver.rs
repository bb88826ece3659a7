//! Carry-propagation driver
//!
//! Host-side control loop around [`DigitAddKernel`]: dispatch the kernel
//! over the full digit range, read back the reduced digits and carries,
//! and keep re-dispatching with `(A, B) := (Carry, Value)` until the
//! carry vector is all zero. Each pass owns its buffers exclusively and
//! the backend's dispatch is blocking, so pass `k + 1` never starts
//! before pass `k`'s outputs are fully materialized host-side.

use crate::digits::DigitVector;
use crate::error::{Result, SumError};
use crate::kernel::{BASE_SLOT, CARRY_SLOT, DigitAddKernel, LHS_SLOT, RHS_SLOT, VALUE_SLOT};
use crate::observer::{PassObserver, PassSnapshot};
use ripple_backends::{AccessMode, Backend, BufferHandle, KernelBindings};
use tracing::{debug, warn};

const ELEM_BYTES: usize = std::mem::size_of::<i64>();

/// Outcome of a completed carry propagation
#[derive(Debug, Clone)]
pub struct SumReport {
    /// Final digit-wise sum with all carries resolved
    pub digits: DigitVector,
    /// Number of kernel passes it took to settle
    pub passes: usize,
}

/// Device buffers for one propagation run, owned by the driver
struct PassBuffers {
    value: BufferHandle,
    carry: BufferHandle,
    base: BufferHandle,
    lhs: BufferHandle,
    rhs: BufferHandle,
}

impl PassBuffers {
    fn allocate<B: Backend>(backend: &mut B, width: usize, base: i64) -> Result<Self> {
        let vec_bytes = width * ELEM_BYTES;
        let buffers = Self {
            value: backend.allocate_buffer(vec_bytes)?,
            carry: backend.allocate_buffer(vec_bytes)?,
            base: backend.allocate_buffer(ELEM_BYTES)?,
            lhs: backend.allocate_buffer(vec_bytes)?,
            rhs: backend.allocate_buffer(vec_bytes)?,
        };
        backend.copy_to_buffer(buffers.base, bytemuck::bytes_of(&base))?;
        Ok(buffers)
    }

    fn bindings(&self) -> KernelBindings {
        KernelBindings::new()
            .bind(VALUE_SLOT, self.value, AccessMode::WriteOnly)
            .bind(CARRY_SLOT, self.carry, AccessMode::WriteOnly)
            .bind(BASE_SLOT, self.base, AccessMode::ReadOnly)
            .bind(LHS_SLOT, self.lhs, AccessMode::ReadOnly)
            .bind(RHS_SLOT, self.rhs, AccessMode::ReadOnly)
    }

    fn release<B: Backend>(self, backend: &mut B) -> Result<()> {
        backend.free_buffer(self.value)?;
        backend.free_buffer(self.carry)?;
        backend.free_buffer(self.base)?;
        backend.free_buffer(self.lhs)?;
        backend.free_buffer(self.rhs)?;
        Ok(())
    }
}

/// Drives [`DigitAddKernel`] to a settled sum
///
/// Borrows the backend for its whole lifetime; buffers are allocated in
/// [`run`](CarryPropagator::run) and released on every exit path before
/// the result is returned.
pub struct CarryPropagator<'b, B: Backend> {
    backend: &'b mut B,
    base: i64,
    width: usize,
}

impl<'b, B: Backend> CarryPropagator<'b, B> {
    /// Create a driver for vectors of `width` digits in the given base
    pub fn new(backend: &'b mut B, base: i64, width: usize) -> Result<Self> {
        if base < 2 {
            return Err(SumError::InvalidOperand(format!(
                "base must be at least 2, got {}",
                base
            )));
        }
        if width < 2 {
            return Err(SumError::InvalidOperand(format!(
                "width must be at least 2 (one sentinel plus one digit), got {}",
                width
            )));
        }
        Ok(Self { backend, base, width })
    }

    /// Add `lhs` and `rhs`, reporting each pass to `observer`
    ///
    /// # Errors
    ///
    /// `InvalidOperand` if either addend is malformed, `NonConvergence`
    /// if carries survive more passes than the vector has positions
    /// (impossible for well-formed inputs; the bound exists so a logic
    /// error is reported instead of looping forever), or any backend
    /// failure, which aborts the loop immediately: no pass ever
    /// continues from stale or partially-written buffers.
    pub fn run(
        &mut self,
        lhs: &DigitVector,
        rhs: &DigitVector,
        observer: &mut dyn PassObserver,
    ) -> Result<SumReport> {
        lhs.validate_operand(self.base, self.width)?;
        rhs.validate_operand(self.base, self.width)?;

        let buffers = PassBuffers::allocate(self.backend, self.width, self.base)?;
        let outcome = self.run_passes(&buffers, lhs, rhs, observer);
        let released = buffers.release(self.backend);

        let report = outcome?;
        released?;
        Ok(report)
    }

    fn run_passes(
        &mut self,
        buffers: &PassBuffers,
        lhs: &DigitVector,
        rhs: &DigitVector,
        observer: &mut dyn PassObserver,
    ) -> Result<SumReport> {
        let width = self.width;
        let zeros = vec![0i64; width];
        let bindings = buffers.bindings();

        let mut a = lhs.as_slice().to_vec();
        let mut b = rhs.as_slice().to_vec();
        let mut value = vec![0i64; width];
        let mut carry = vec![0i64; width];

        // Each pass moves every carry one position left and produces
        // carries strictly below the base, so width passes always
        // suffice; running past that is a logic error, not slow input.
        for pass in 1..=width {
            // Outputs must start zeroed: a work item that sees no
            // overflow leaves its carry slot unwritten.
            self.backend
                .copy_to_buffer(buffers.value, bytemuck::cast_slice(&zeros))?;
            self.backend
                .copy_to_buffer(buffers.carry, bytemuck::cast_slice(&zeros))?;
            self.backend
                .copy_to_buffer(buffers.lhs, bytemuck::cast_slice(&a))?;
            self.backend
                .copy_to_buffer(buffers.rhs, bytemuck::cast_slice(&b))?;

            self.backend
                .execute_kernel(&DigitAddKernel, &bindings, width)?;

            self.backend
                .copy_from_buffer(buffers.value, bytemuck::cast_slice_mut(&mut value))?;
            self.backend
                .copy_from_buffer(buffers.carry, bytemuck::cast_slice_mut(&mut carry))?;

            observer.on_pass(
                pass,
                &PassSnapshot {
                    lhs: &a,
                    rhs: &b,
                    value: &value,
                    carry: &carry,
                },
            );

            // Settled exactly when no position produced a carry.
            if carry.iter().all(|&c| c == 0) {
                debug!(passes = pass, "carry propagation settled");
                return Ok(SumReport {
                    digits: DigitVector::new(value),
                    passes: pass,
                });
            }

            debug!(pass, "carries remain, re-dispatching");
            std::mem::swap(&mut a, &mut carry);
            std::mem::swap(&mut b, &mut value);
        }

        warn!(width, "carry propagation exceeded the pass bound");
        Err(SumError::NonConvergence {
            passes: width,
            width,
        })
    }
}
