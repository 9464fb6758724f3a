//! Utility functions for dealing with bit vectors.

pub use bit_vec::BitVec;

/// Extensions to `BitVec`.
pub trait BitVecExt {
  /// Renders the bits in order as a string of `0` and `1` characters.
  ///
  /// # Example
  ///
  /// ```
  /// # use huffpack::bit::{BitVec, BitVecExt};
  /// let b = BitVec::from_bytes(&[0b1010_0000]);
  /// assert_eq!(b.to_bit_string(), "10100000");
  /// ```
  fn to_bit_string(&self) -> String;

  /// True if the first `prefix.len()` bits of `self` are equal to `prefix`.
  ///
  /// Every vector starts with the empty vector and with itself.
  fn starts_with(&self, prefix: &BitVec) -> bool;
}

impl BitVecExt for BitVec {
  fn to_bit_string(&self) -> String {
    self.iter().map(|b| if b { '1' } else { '0' }).collect()
  }

  fn starts_with(&self, prefix: &BitVec) -> bool {
    if prefix.len() > self.len() {
      return false;
    }
    self.iter().zip(prefix.iter()).all(|(a, b)| a == b)
  }
}
