//! Fixed-width digit vectors
//!
//! A [`DigitVector`] holds one operand as an ordered sequence of digit
//! values, index 0 most significant. Index 0 is reserved: it must be zero
//! in well-formed operands so a carry generated anywhere in the vector
//! always has a position to land in.

use crate::error::{Result, SumError};
use std::fmt;
use std::ops::Index;

/// Fixed-length sequence of digit values, most significant first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitVector(Vec<i64>);

impl DigitVector {
    /// Wrap an existing digit sequence
    pub fn new(digits: Vec<i64>) -> Self {
        Self(digits)
    }

    /// All-zero vector of the given width
    pub fn zeroed(width: usize) -> Self {
        Self(vec![0; width])
    }

    /// Parse an unsigned decimal string, left-padded with zeros to `width`
    ///
    /// The number must leave the index-0 sentinel digit zero, so at most
    /// `width - 1` significant digits fit (a full-width string is accepted
    /// only when it already starts with `0`).
    pub fn from_decimal_str(text: &str, width: usize) -> Result<Self> {
        if text.is_empty() {
            return Err(SumError::InvalidOperand("empty operand".to_string()));
        }
        if text.len() > width {
            return Err(SumError::InvalidOperand(format!(
                "operand '{}' has {} digits but the vector width is {}",
                text,
                text.len(),
                width
            )));
        }

        let mut digits = vec![0i64; width];
        let pad = width - text.len();
        for (i, c) in text.chars().enumerate() {
            let d = c.to_digit(10).ok_or_else(|| {
                SumError::InvalidOperand(format!("operand '{}' contains non-digit '{}'", text, c))
            })?;
            digits[pad + i] = i64::from(d);
        }

        if digits[0] != 0 {
            return Err(SumError::InvalidOperand(format!(
                "operand '{}' occupies the reserved leading digit; \
                 at most {} significant digits fit in width {}",
                text,
                width - 1,
                width
            )));
        }

        Ok(Self(digits))
    }

    /// Render as a contiguous digit string, most significant first
    pub fn to_decimal_string(&self) -> String {
        self.0.iter().map(|d| d.to_string()).collect()
    }

    /// Number of digit positions
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no positions
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// View the digits as a slice
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    /// Check this vector is a well-formed addend for the given base
    ///
    /// Well-formed means: exactly `width` positions, every digit in
    /// `[0, base)`, and the index-0 sentinel zero.
    pub(crate) fn validate_operand(&self, base: i64, width: usize) -> Result<()> {
        if self.0.len() != width {
            return Err(SumError::InvalidOperand(format!(
                "operand has {} positions, expected {}",
                self.0.len(),
                width
            )));
        }
        if let Some((i, &d)) = self.0.iter().enumerate().find(|&(_, &d)| d < 0 || d >= base) {
            return Err(SumError::InvalidOperand(format!(
                "digit {} at position {} is outside [0, {})",
                d, i, base
            )));
        }
        if self.0[0] != 0 {
            return Err(SumError::InvalidOperand(
                "leading sentinel digit must be zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Index<usize> for DigitVector {
    type Output = i64;

    fn index(&self, index: usize) -> &i64 {
        &self.0[index]
    }
}

impl fmt::Display for DigitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}
