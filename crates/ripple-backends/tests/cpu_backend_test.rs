//! Integration tests for the CPU backend
//!
//! Exercises kernel dispatch over a one-dimensional index space and the
//! access-mode enforcement of the binding table.

use ripple_backends::{
    AccessMode, Backend, BindingSlot, CpuBackend, Kernel, KernelBindings, KernelContext,
};

const INPUT: BindingSlot = BindingSlot(0);
const OUTPUT: BindingSlot = BindingSlot(1);

/// out[n] = 2 * in[n]
struct DoubleKernel;

impl Kernel for DoubleKernel {
    fn name(&self) -> &str {
        "double"
    }

    fn invoke(&self, ctx: &mut dyn KernelContext) -> ripple_backends::Result<()> {
        let n = ctx.global_id();
        let x = ctx.load_i64(INPUT, n)?;
        ctx.store_i64(OUTPUT, n, 2 * x)
    }
}

/// Kernel that stores into its read-only input binding
struct MisbehavingKernel;

impl Kernel for MisbehavingKernel {
    fn name(&self) -> &str {
        "misbehaving"
    }

    fn invoke(&self, ctx: &mut dyn KernelContext) -> ripple_backends::Result<()> {
        ctx.store_i64(INPUT, ctx.global_id(), 0)
    }
}

/// Kernel that loads one element past its own index
struct OverreachingKernel;

impl Kernel for OverreachingKernel {
    fn name(&self) -> &str {
        "overreaching"
    }

    fn invoke(&self, ctx: &mut dyn KernelContext) -> ripple_backends::Result<()> {
        let n = ctx.work_items();
        let x = ctx.load_i64(INPUT, n)?; // one past the end
        ctx.store_i64(OUTPUT, ctx.global_id(), x)
    }
}

fn upload(backend: &mut CpuBackend, data: &[i64]) -> ripple_backends::BufferHandle {
    let handle = backend.allocate_buffer(data.len() * 8).unwrap();
    backend.copy_to_buffer(handle, bytemuck::cast_slice(data)).unwrap();
    handle
}

#[test]
fn test_dispatch_covers_every_work_item() {
    let mut backend = CpuBackend::new();

    let n = 64;
    let data: Vec<i64> = (0..n as i64).collect();
    let input = upload(&mut backend, &data);
    let output = backend.allocate_buffer(n * 8).unwrap();

    let bindings = KernelBindings::new()
        .bind(INPUT, input, AccessMode::ReadOnly)
        .bind(OUTPUT, output, AccessMode::WriteOnly);

    backend.execute_kernel(&DoubleKernel, &bindings, n).unwrap();

    let mut result = vec![0i64; n];
    backend
        .copy_from_buffer(output, bytemuck::cast_slice_mut(&mut result))
        .unwrap();

    for (i, &value) in result.iter().enumerate() {
        assert_eq!(value, 2 * i as i64, "mismatch at index {}", i);
    }
}

#[test]
fn test_zero_work_items_is_a_no_op() {
    let mut backend = CpuBackend::new();

    let input = upload(&mut backend, &[1, 2, 3]);
    let output = backend.allocate_buffer(3 * 8).unwrap();

    let bindings = KernelBindings::new()
        .bind(INPUT, input, AccessMode::ReadOnly)
        .bind(OUTPUT, output, AccessMode::WriteOnly);

    backend.execute_kernel(&DoubleKernel, &bindings, 0).unwrap();

    let mut result = vec![0i64; 3];
    backend
        .copy_from_buffer(output, bytemuck::cast_slice_mut(&mut result))
        .unwrap();
    assert_eq!(result, vec![0, 0, 0]);
}

#[test]
fn test_store_to_read_only_slot_fails() {
    let mut backend = CpuBackend::new();

    let input = upload(&mut backend, &[0; 8]);
    let output = backend.allocate_buffer(8 * 8).unwrap();

    let bindings = KernelBindings::new()
        .bind(INPUT, input, AccessMode::ReadOnly)
        .bind(OUTPUT, output, AccessMode::WriteOnly);

    let err = backend
        .execute_kernel(&MisbehavingKernel, &bindings, 8)
        .unwrap_err();
    assert!(matches!(
        err,
        ripple_backends::BackendError::AccessViolation { .. }
    ));
}

#[test]
fn test_out_of_bounds_load_fails() {
    let mut backend = CpuBackend::new();

    let input = upload(&mut backend, &[0; 4]);
    let output = backend.allocate_buffer(4 * 8).unwrap();

    let bindings = KernelBindings::new()
        .bind(INPUT, input, AccessMode::ReadOnly)
        .bind(OUTPUT, output, AccessMode::WriteOnly);

    let err = backend
        .execute_kernel(&OverreachingKernel, &bindings, 4)
        .unwrap_err();
    assert!(matches!(
        err,
        ripple_backends::BackendError::BufferOutOfBounds { .. }
    ));
}

#[test]
fn test_unbound_slot_fails() {
    let mut backend = CpuBackend::new();

    let input = upload(&mut backend, &[0; 4]);

    // OUTPUT slot deliberately left unbound.
    let bindings = KernelBindings::new().bind(INPUT, input, AccessMode::ReadOnly);

    let err = backend
        .execute_kernel(&DoubleKernel, &bindings, 4)
        .unwrap_err();
    assert!(matches!(err, ripple_backends::BackendError::UnboundSlot(1)));
}

#[test]
fn test_dispatch_with_freed_buffer_fails() {
    let mut backend = CpuBackend::new();

    let input = upload(&mut backend, &[0; 4]);
    let output = backend.allocate_buffer(4 * 8).unwrap();
    backend.free_buffer(output).unwrap();

    let bindings = KernelBindings::new()
        .bind(INPUT, input, AccessMode::ReadOnly)
        .bind(OUTPUT, output, AccessMode::WriteOnly);

    let err = backend
        .execute_kernel(&DoubleKernel, &bindings, 4)
        .unwrap_err();
    assert!(matches!(
        err,
        ripple_backends::BackendError::InvalidBufferHandle(_)
    ));
}
