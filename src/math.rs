//! Math utilities.

use num_traits::{PrimInt, Unsigned};

/// Unsigned integer division rounding away from zero.
pub fn div_ceil<I: PrimInt + Unsigned>(lhs: I, rhs: I) -> I {
  let x = lhs / rhs;
  if lhs % rhs != I::zero() {
    x + I::one()
  } else {
    x
  }
}

/// Number of bytes needed to hold `bits` packed bits.
pub fn packed_len(bits: u64) -> u64 {
  div_ceil(bits, 8)
}

/// Size of `output` relative to `input`, or `None` when `input` is zero.
pub fn ratio(output: u64, input: u64) -> Option<f64> {
  if input == 0 {
    None
  } else {
    Some(output as f64 / input as f64)
  }
}
