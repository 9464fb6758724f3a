//! The fixed size header at the start of every compressed stream.
//!
//! ```text
//! offset 0     original size   u64, little endian
//! offset 8     counts[0..256]  u32 each, little endian
//! offset 1032  packed payload
//! ```

use crate::error::{FormatError, Result};
use crate::freq::{FrequencyTable, SYMBOLS};
use std::io::{ErrorKind, Read, Write};

/// Encoded size of a header in bytes.
pub const HEADER_LEN: usize = 8 + 4 * SYMBOLS;

/// Everything the decoder needs to rebuild the coding tree and know when to
/// stop decoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Header {
  /// Byte count of the uncompressed input.
  pub original_size: u64,
  /// Symbol counts of the uncompressed input.
  pub frequencies: FrequencyTable,
}

impl Header {
  pub fn new(original_size: u64, frequencies: FrequencyTable) -> Self {
    Header {
      original_size,
      frequencies,
    }
  }

  /// The header's byte representation.
  pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
    let mut bytes = [0u8; HEADER_LEN];
    bytes[..8].copy_from_slice(&self.original_size.to_le_bytes());
    for (chunk, count) in bytes[8..]
      .chunks_exact_mut(4)
      .zip(self.frequencies.counts().iter())
    {
      chunk.copy_from_slice(&count.to_le_bytes());
    }
    bytes
  }

  /// Parses a header from exactly `HEADER_LEN` bytes.
  pub fn from_bytes(bytes: &[u8; HEADER_LEN]) -> Self {
    let mut size = [0u8; 8];
    size.copy_from_slice(&bytes[..8]);

    let mut counts = [0u32; SYMBOLS];
    for (count, chunk) in counts.iter_mut().zip(bytes[8..].chunks_exact(4)) {
      let mut raw = [0u8; 4];
      raw.copy_from_slice(chunk);
      *count = u32::from_le_bytes(raw);
    }

    Header {
      original_size: u64::from_le_bytes(size),
      frequencies: FrequencyTable::from_counts(counts),
    }
  }

  pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
    writer.write_all(&self.to_bytes())?;
    Ok(())
  }

  /// Reads and validates a header, consuming exactly `HEADER_LEN` bytes
  /// from `reader` on success.
  ///
  /// Running out of input before a full header is a format error, not an
  /// I/O error.
  pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
    let mut bytes = [0u8; HEADER_LEN];
    let n = read_up_to(reader, &mut bytes)?;
    if n < HEADER_LEN {
      return Err(FormatError::TruncatedHeader { actual: n }.into());
    }

    let header = Header::from_bytes(&bytes);
    header.validate()?;
    Ok(header)
  }

  /// Checks that the counts are consistent with the original size.
  pub fn validate(&self) -> Result<()> {
    let total = self.frequencies.total();
    if total == self.original_size {
      return Ok(());
    }

    let err = if total == 0 {
      FormatError::EmptyFrequencies {
        original_size: self.original_size,
      }
    } else {
      FormatError::FrequencyMismatch {
        original_size: self.original_size,
        total,
      }
    };
    Err(err.into())
  }
}

/// Fills as much of `buf` as `reader` can provide, returning the number of
/// bytes read. Stops early only at end of input.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
  let mut filled = 0;
  while filled < buf.len() {
    match reader.read(&mut buf[filled..]) {
      Ok(0) => break,
      Ok(n) => filled += n,
      Err(e) if e.kind() == ErrorKind::Interrupted => continue,
      Err(e) => return Err(e),
    }
  }
  Ok(filled)
}
