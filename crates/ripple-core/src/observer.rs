//! Observation seam for per-pass presentation
//!
//! The driver reports every pass to a [`PassObserver`] before deciding
//! whether to continue. Observation is one-way: nothing an observer does
//! feeds back into the propagation loop.

/// Everything one kernel pass consumed and produced
#[derive(Debug, Clone, Copy)]
pub struct PassSnapshot<'a> {
    /// First addend fed into this pass
    pub lhs: &'a [i64],
    /// Second addend fed into this pass
    pub rhs: &'a [i64],
    /// Reduced digits produced by this pass
    pub value: &'a [i64],
    /// Carries produced by this pass
    pub carry: &'a [i64],
}

/// Receiver for per-pass snapshots
pub trait PassObserver {
    /// Called once per pass, `pass` counting from 1
    fn on_pass(&mut self, pass: usize, snapshot: &PassSnapshot<'_>);
}

/// Observer that discards every snapshot
pub struct NullObserver;

impl PassObserver for NullObserver {
    fn on_pass(&mut self, _pass: usize, _snapshot: &PassSnapshot<'_>) {}
}
