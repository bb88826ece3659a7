//! The per-digit addition kernel
//!
//! One work item per digit position: split the raw sum into a reduced
//! digit and a carry, writing the digit at this index and the carry one
//! position to the left. Positions never share write targets, since
//! `Value[n]` and `Carry[n-1]` are disjoint slots in distinct buffers,
//! so every index may run concurrently with no ordering guarantee.

use ripple_backends::{BackendError, BindingSlot, Kernel, KernelContext};

/// Reduced digit output, written at the work item's own index
pub const VALUE_SLOT: BindingSlot = BindingSlot(0);
/// Carry output, written one position to the left
pub const CARRY_SLOT: BindingSlot = BindingSlot(1);
/// Radix scalar, read at element 0
pub const BASE_SLOT: BindingSlot = BindingSlot(2);
/// First addend
pub const LHS_SLOT: BindingSlot = BindingSlot(3);
/// Second addend
pub const RHS_SLOT: BindingSlot = BindingSlot(4);

/// Stateless per-position digit adder
///
/// For global index `n`: `s = A[n] + B[n]`. When `s >= base` the kernel
/// writes `s % base` to `Value[n]` and `s / base` to `Carry[n-1]`;
/// otherwise it writes `s` to `Value[n]` and leaves the carry slot alone,
/// relying on the driver pre-zeroing both outputs each pass.
pub struct DigitAddKernel;

impl Kernel for DigitAddKernel {
    fn name(&self) -> &str {
        "digit_add"
    }

    fn invoke(&self, ctx: &mut dyn KernelContext) -> ripple_backends::Result<()> {
        let n = ctx.global_id();
        let base = ctx.load_i64(BASE_SLOT, 0)?;
        let a = ctx.load_i64(LHS_SLOT, n)?;
        let b = ctx.load_i64(RHS_SLOT, n)?;
        // Digits validate as < base, so a base near i64::MAX admits
        // pairs whose raw sum does not fit.
        let s = a.checked_add(b).ok_or_else(|| {
            BackendError::execution_error(format!("digit sum overflow at index {}", n))
        })?;

        if s >= base {
            ctx.store_i64(VALUE_SLOT, n, s % base)?;
            // Index 0 has no left neighbor; the reserved sentinel digit
            // keeps it from ever overflowing, so the carry write is
            // simply skipped there instead of targeting index -1.
            if n > 0 {
                ctx.store_i64(CARRY_SLOT, n - 1, s / base)?;
            }
        } else {
            ctx.store_i64(VALUE_SLOT, n, s)?;
        }

        Ok(())
    }
}
