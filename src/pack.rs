//! Bit level packing of the payload.
//!
//! Codes are written most significant bit first: the first bit of the first
//! code lands in bit 7 of the first payload byte. The final byte is padded
//! with zeros, which the decoder never reaches because it stops after the
//! original number of symbols.

use crate::bit::BitVec;
use crate::error::{Error, FormatError, Result};
use crate::table::CodeTable;
use crate::tree::CodeNode;
use std::io::{self, ErrorKind, Read, Write};

/// Decoded symbols are buffered up to this many bytes before being handed to
/// the writer.
const OUT_CHUNK: usize = 8 * 1024;

/// Packs single bits into bytes and writes each byte as soon as it fills.
pub struct BitWriter<W: Write> {
  inner: W,
  acc: u8,
  len: u8,
  bits_written: u64,
}

impl<W: Write> BitWriter<W> {
  pub fn new(inner: W) -> Self {
    BitWriter {
      inner,
      acc: 0,
      len: 0,
      bits_written: 0,
    }
  }

  /// Appends a single bit.
  pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
    self.acc = (self.acc << 1) | bit as u8;
    self.len += 1;
    self.bits_written += 1;
    if self.len == 8 {
      self.inner.write_all(&[self.acc])?;
      self.acc = 0;
      self.len = 0;
    }
    Ok(())
  }

  /// Appends every bit of `code` in order.
  pub fn write_code(&mut self, code: &BitVec) -> io::Result<()> {
    for bit in code.iter() {
      self.write_bit(bit)?;
    }
    Ok(())
  }

  /// Number of bits appended so far, padding excluded.
  pub fn bits_written(&self) -> u64 {
    self.bits_written
  }

  /// Flushes a partially filled final byte, left aligned and zero padded,
  /// and returns the underlying writer.
  pub fn finish(mut self) -> io::Result<W> {
    if self.len > 0 {
      let last = self.acc << (8 - self.len);
      self.inner.write_all(&[last])?;
    }
    self.inner.flush()?;
    Ok(self.inner)
  }
}

/// Reads bits one at a time, most significant bit of each byte first.
pub struct BitReader<R: Read> {
  inner: R,
  byte: u8,
  remaining: u8,
}

impl<R: Read> BitReader<R> {
  pub fn new(inner: R) -> Self {
    BitReader {
      inner,
      byte: 0,
      remaining: 0,
    }
  }

  /// The next bit, or `None` once the underlying reader is exhausted.
  pub fn read_bit(&mut self) -> io::Result<Option<bool>> {
    if self.remaining == 0 {
      let mut buf = [0u8; 1];
      loop {
        match self.inner.read(&mut buf) {
          Ok(0) => return Ok(None),
          Ok(_) => break,
          Err(e) if e.kind() == ErrorKind::Interrupted => continue,
          Err(e) => return Err(e),
        }
      }
      self.byte = buf[0];
      self.remaining = 8;
    }
    self.remaining -= 1;
    Ok(Some((self.byte >> self.remaining) & 1 == 1))
  }
}

/// Writes the code of every byte of `input` to `writer` and returns the
/// number of payload bits, not counting padding.
pub fn encode<W: Write>(
  input: &[u8],
  table: &CodeTable,
  writer: W,
) -> Result<u64> {
  let mut bits = BitWriter::new(writer);
  for &symbol in input {
    let code = table.get(symbol).ok_or(Error::MissingCode { symbol })?;
    bits.write_code(code)?;
  }
  let total = bits.bits_written();
  bits.finish()?;
  Ok(total)
}

/// Decodes exactly `count` symbols from `reader` by walking `root` and
/// writes them to `writer`.
///
/// Each bit selects a child, 0 for left and 1 for right; reaching a leaf
/// emits its symbol and restarts at the root. A root which is itself a leaf
/// consumes one bit per symbol, matching the one bit code it was given.
/// Bits left over once `count` symbols have been emitted are never read.
pub fn decode<R: Read, W: Write>(
  reader: R,
  root: &CodeNode,
  count: u64,
  mut writer: W,
) -> Result<()> {
  let mut bits = BitReader::new(reader);
  let mut out = Vec::with_capacity(OUT_CHUNK);
  let mut decoded = 0u64;
  let mut node = root;

  while decoded < count {
    if let CodeNode::Internal { left, right, .. } = node {
      node = match bits.read_bit()? {
        Some(false) => &**left,
        Some(true) => &**right,
        None => return Err(truncated(count, decoded, &mut writer, &out)),
      };
    } else if bits.read_bit()?.is_none() {
      // Lone leaf root: its code is a single 0 bit.
      return Err(truncated(count, decoded, &mut writer, &out));
    }

    if let CodeNode::Leaf { symbol, .. } = node {
      out.push(*symbol);
      decoded += 1;
      node = root;
      if out.len() == OUT_CHUNK {
        writer.write_all(&out)?;
        out.clear();
      }
    }
  }

  writer.write_all(&out)?;
  writer.flush()?;
  Ok(())
}

/// Builds the error for a payload which ended early. Symbols decoded so far
/// are still written out so the writer sees everything that was recovered.
fn truncated<W: Write>(
  expected: u64,
  decoded: u64,
  writer: &mut W,
  pending: &[u8],
) -> Error {
  if let Err(e) = writer.write_all(pending) {
    return e.into();
  }
  FormatError::TruncatedPayload { expected, decoded }.into()
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::freq::FrequencyTable;

  fn setup(input: &[u8]) -> (CodeNode, CodeTable) {
    let freq = FrequencyTable::count(input).unwrap();
    let root = CodeNode::build(&freq).unwrap();
    let table = CodeTable::generate(&root);
    (root, table)
  }

  #[test]
  fn writer_flushes_full_bytes_msb_first() {
    let mut out = Vec::new();
    let mut w = BitWriter::new(&mut out);
    for &bit in &[true, false, true, true, false, false, false, true, true] {
      w.write_bit(bit).unwrap();
    }
    assert_eq!(9, w.bits_written());
    w.finish().unwrap();
    assert_eq!(vec![0b1011_0001, 0b1000_0000], out);
  }

  #[test]
  fn writer_with_no_bits_writes_nothing() {
    let mut out = Vec::new();
    BitWriter::new(&mut out).finish().unwrap();
    assert!(out.is_empty());
  }

  #[test]
  fn reader_yields_bits_msb_first() {
    let data = [0b1000_0001u8];
    let mut r = BitReader::new(&data[..]);
    let mut bits = Vec::new();
    while let Some(bit) = r.read_bit().unwrap() {
      bits.push(bit);
    }
    assert_eq!(
      vec![true, false, false, false, false, false, false, true],
      bits
    );
  }

  #[test]
  fn encode_packs_known_codes() {
    // b = 0, \n = 10, a = 11
    let input = b"aabbb\n";
    let (_, table) = setup(input);
    let mut out = Vec::new();
    let bits = encode(input, &table, &mut out).unwrap();
    assert_eq!(9, bits);
    // 11 11 0 0 0 10 -> 1111_0001 0[000_0000]
    assert_eq!(vec![0b1111_0001, 0b0000_0000], out);
  }

  #[test]
  fn encode_rejects_symbol_without_code() {
    let (_, table) = setup(b"ab");
    let err = encode(b"abc", &table, Vec::new()).unwrap_err();
    assert!(matches!(err, Error::MissingCode { symbol: b'c' }));
  }

  #[test]
  fn decode_ignores_padding() {
    let input = b"aabbb\n";
    let (root, table) = setup(input);
    let mut payload = Vec::new();
    encode(input, &table, &mut payload).unwrap();

    // Padding bits decode as b, which must not appear in the output.
    let mut out = Vec::new();
    decode(&payload[..], &root, input.len() as u64, &mut out).unwrap();
    assert_eq!(input.to_vec(), out);
  }

  #[test]
  fn decode_single_leaf_reads_one_bit_per_symbol() {
    let input = vec![b'A'; 20];
    let (root, table) = setup(&input);
    let mut payload = Vec::new();
    assert_eq!(20, encode(&input, &table, &mut payload).unwrap());
    assert_eq!(vec![0u8; 3], payload);

    let mut out = Vec::new();
    decode(&payload[..], &root, 20, &mut out).unwrap();
    assert_eq!(input, out);
  }

  #[test]
  fn decode_reports_truncated_payload() {
    let input = b"abracadabra";
    let (root, table) = setup(input);
    let mut payload = Vec::new();
    encode(input, &table, &mut payload).unwrap();
    payload.pop();

    let mut out = Vec::new();
    let err = decode(&payload[..], &root, input.len() as u64, &mut out)
      .unwrap_err();
    match err {
      Error::Format(FormatError::TruncatedPayload { expected, decoded }) => {
        assert_eq!(11, expected);
        assert!(decoded < expected);
        assert_eq!(decoded as usize, out.len());
        assert_eq!(&input[..out.len()], &out[..]);
      }
      other => panic!("unexpected error: {:?}", other),
    }
  }

  #[test]
  fn decode_zero_symbols_reads_nothing() {
    let (root, _) = setup(b"xy");
    let empty: &[u8] = &[];
    let mut out = Vec::new();
    decode(empty, &root, 0, &mut out).unwrap();
    assert!(out.is_empty());
  }
}
