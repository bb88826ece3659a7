//! Fixed-width decimal addition via a data-parallel digit kernel
//!
//! Adds two digit vectors by dispatching a per-digit addition kernel
//! across a backend from `ripple-backends`, then re-dispatching it with
//! the produced carries as a fresh operand until no carries remain.
//!
//! ```
//! use ripple_backends::CpuBackend;
//! use ripple_core::{CarryPropagator, DigitVector, NullObserver};
//!
//! # fn main() -> ripple_core::Result<()> {
//! let lhs = DigitVector::from_decimal_str("084357083924567890123", 21)?;
//! let rhs = DigitVector::from_decimal_str("025785994397568899987", 21)?;
//!
//! let mut backend = CpuBackend::new();
//! let mut driver = CarryPropagator::new(&mut backend, 10, 21)?;
//! let report = driver.run(&lhs, &rhs, &mut NullObserver)?;
//!
//! assert_eq!(report.digits.to_decimal_string(), "110143078322136790110");
//! # Ok(())
//! # }
//! ```

pub mod digits;
pub mod driver;
pub mod error;
pub mod kernel;
pub mod observer;

pub use digits::DigitVector;
pub use driver::{CarryPropagator, SumReport};
pub use error::{Result, SumError};
pub use kernel::DigitAddKernel;
pub use observer::{NullObserver, PassObserver, PassSnapshot};
