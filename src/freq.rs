//! Byte frequency tables.

use crate::error::{Error, Result};
use std::convert::TryFrom;
use std::fmt;

/// Number of symbols in the alphabet.
pub const SYMBOLS: usize = 256;

/// Occurrence count of every byte value in some input.
///
/// The table always has one slot per symbol; a zero count means the symbol is
/// absent. Counts are 32 bits wide since that is how they are stored in a
/// compressed file's header.
#[derive(Clone, Eq, PartialEq)]
pub struct FrequencyTable {
  counts: [u32; SYMBOLS],
}

impl FrequencyTable {
  /// A table in which every symbol is absent.
  pub fn empty() -> Self {
    FrequencyTable {
      counts: [0; SYMBOLS],
    }
  }

  /// Wraps a set of counts read from elsewhere, a file header for example.
  pub fn from_counts(counts: [u32; SYMBOLS]) -> Self {
    FrequencyTable { counts }
  }

  /// Counts the occurrences of each byte in `input`.
  ///
  /// Fails if any symbol occurs more than `u32::MAX` times.
  pub fn count(input: &[u8]) -> Result<Self> {
    let mut wide = [0u64; SYMBOLS];
    for &byte in input {
      wide[byte as usize] += 1;
    }

    let mut counts = [0u32; SYMBOLS];
    for (symbol, (slot, &n)) in counts.iter_mut().zip(wide.iter()).enumerate() {
      *slot = u32::try_from(n).map_err(|_| Error::CountOverflow {
        symbol: symbol as u8,
      })?;
    }
    Ok(FrequencyTable { counts })
  }

  /// The count recorded for `symbol`.
  #[inline]
  pub fn get(&self, symbol: u8) -> u32 {
    self.counts[symbol as usize]
  }

  /// The raw counts, indexed by symbol.
  #[inline]
  pub fn counts(&self) -> &[u32; SYMBOLS] {
    &self.counts
  }

  /// Sum of all counts.
  pub fn total(&self) -> u64 {
    self.counts.iter().map(|&n| n as u64).sum()
  }

  /// Number of symbols with a non-zero count.
  pub fn distinct(&self) -> usize {
    self.counts.iter().filter(|&&n| n != 0).count()
  }

  /// True if no symbol is present.
  pub fn is_empty(&self) -> bool {
    self.counts.iter().all(|&n| n == 0)
  }

  /// Present symbols and their counts in ascending symbol order.
  pub fn present(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
    self
      .counts
      .iter()
      .enumerate()
      .filter(|&(_, &n)| n != 0)
      .map(|(symbol, &n)| (symbol as u8, n))
  }
}

impl Default for FrequencyTable {
  fn default() -> Self {
    Self::empty()
  }
}

// Only present symbols are listed; 256 zeros are just noise in logs.
impl fmt::Debug for FrequencyTable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.present()).finish()
  }
}
