//! Whole-stream compression and decompression.
//!
//! A compressed stream is a [`Header`] followed by the packed payload. The
//! header carries the symbol counts rather than the tree: the decompressor
//! rebuilds the very same tree from them with [`CodeNode::build`].

use crate::error::Result;
use crate::freq::FrequencyTable;
use crate::header::{Header, HEADER_LEN};
use crate::math;
use crate::pack;
use crate::table::CodeTable;
use crate::tree::CodeNode;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;


/// What a single compress or decompress call did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Summary {
  /// Bytes consumed, header included when decompressing.
  pub input_bytes: u64,
  /// Bytes produced, header included when compressing.
  pub output_bytes: u64,
  /// Number of distinct symbols in the uncompressed data.
  pub distinct_symbols: usize,
}

impl Summary {
  /// Output size relative to input size, `None` for empty input.
  pub fn ratio(&self) -> Option<f64> {
    math::ratio(self.output_bytes, self.input_bytes)
  }
}

/// Compresses `input` into a new buffer.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
  let mut out = Vec::with_capacity(HEADER_LEN + input.len() / 2);
  compress_to(input, &mut out)?;
  Ok(out)
}

/// Decompresses a complete compressed stream held in memory.
pub fn decompress(encoded: &[u8]) -> Result<Vec<u8>> {
  let mut out = Vec::new();
  decompress_from(encoded, &mut out)?;
  Ok(out)
}

/// Compresses `input`, writing the header and payload to `writer`.
///
/// Empty input produces a header with a zero size and no payload.
pub fn compress_to<W: Write>(input: &[u8], mut writer: W) -> Result<Summary> {
  let frequencies = FrequencyTable::count(input)?;
  log::trace!("symbol counts: {:?}", frequencies);

  let header = Header::new(input.len() as u64, frequencies);
  let mut summary = Summary {
    input_bytes: input.len() as u64,
    output_bytes: HEADER_LEN as u64,
    distinct_symbols: header.frequencies.distinct(),
  };

  if input.is_empty() {
    header.write_to(&mut writer)?;
    writer.flush()?;
    return Ok(summary);
  }

  let root = CodeNode::build(&header.frequencies)?;
  let table = CodeTable::generate(&root);

  header.write_to(&mut writer)?;
  let bits = pack::encode(input, &table, &mut writer)?;
  summary.output_bytes += math::packed_len(bits);

  log::debug!(
    "encoded {} bytes, {} distinct symbols, into {} payload bits",
    input.len(),
    summary.distinct_symbols,
    bits
  );
  Ok(summary)
}

/// Decompresses a stream read from `reader`, writing the original bytes to
/// `writer`.
///
/// The header is validated before anything is written. An empty original
/// reads no payload; a single symbol original is reproduced from the header
/// alone.
pub fn decompress_from<R: Read, W: Write>(
  mut reader: R,
  writer: W,
) -> Result<Summary> {
  let header = Header::read_from(&mut reader)?;
  decode_body(&header, reader, writer)
}

fn decode_body<R: Read, W: Write>(
  header: &Header,
  reader: R,
  mut writer: W,
) -> Result<Summary> {
  let mut counter = CountingReader::new(reader);
  let mut summary = Summary {
    input_bytes: HEADER_LEN as u64,
    output_bytes: header.original_size,
    distinct_symbols: header.frequencies.distinct(),
  };

  if header.original_size == 0 {
    writer.flush()?;
    return Ok(summary);
  }

  let root = CodeNode::build(&header.frequencies)?;
  log::debug!(
    "decoding {} bytes with a tree of depth {}",
    header.original_size,
    root.depth()
  );

  if let CodeNode::Leaf { symbol, .. } = &root {
    write_run(&mut writer, *symbol, header.original_size)?;
    return Ok(summary);
  }

  pack::decode(&mut counter, &root, header.original_size, &mut writer)?;
  summary.input_bytes += counter.count;
  Ok(summary)
}

/// Writes `symbol` `count` times.
fn write_run<W: Write>(writer: &mut W, symbol: u8, count: u64) -> Result<()> {
  let chunk = [symbol; 4096];
  let mut left = count;
  while left > 0 {
    let n = left.min(chunk.len() as u64) as usize;
    writer.write_all(&chunk[..n])?;
    left -= n as u64;
  }
  writer.flush()?;
  Ok(())
}

/// Compresses the file at `src` into a new file at `dst`.
///
/// The source is read into memory once; the counts are taken from that copy
/// and the payload is streamed out of it.
pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(
  src: P,
  dst: Q,
) -> Result<Summary> {
  let input = fs::read(src)?;
  let mut writer = BufWriter::new(File::create(dst)?);
  let summary = compress_to(&input, &mut writer)?;
  writer.flush()?;
  Ok(summary)
}

/// Decompresses the file at `src` into a new file at `dst`.
///
/// `dst` is only created once a valid header has been read. If decoding the
/// payload then fails the file this call created is removed again, so a
/// failed call never leaves output behind that could pass for the original.
/// A `dst` that could not be created is left untouched.
pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(
  src: P,
  dst: Q,
) -> Result<Summary> {
  let dst = dst.as_ref();
  let mut reader = BufReader::new(File::open(src)?);
  let header = Header::read_from(&mut reader)?;

  let file = File::create(dst)?;
  let result = write_decoded(&header, &mut reader, BufWriter::new(file));

  if result.is_err() {
    if let Err(e) = fs::remove_file(dst) {
      if e.kind() != io::ErrorKind::NotFound {
        log::warn!("failed to remove partial output {}: {}", dst.display(), e);
      }
    }
  }
  result
}

fn write_decoded<R: Read, W: Write>(
  header: &Header,
  reader: R,
  mut writer: W,
) -> Result<Summary> {
  let summary = decode_body(header, reader, &mut writer)?;
  writer.flush()?;
  Ok(summary)
}

/// Passes reads through while counting the bytes they returned.
struct CountingReader<R> {
  inner: R,
  count: u64,
}

impl<R> CountingReader<R> {
  fn new(inner: R) -> Self {
    CountingReader { inner, count: 0 }
  }
}

impl<R: Read> Read for CountingReader<R> {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    let n = self.inner.read(buf)?;
    self.count += n as u64;
    Ok(n)
  }
}
