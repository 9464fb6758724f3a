//! Error types for the coding engine.
//!
//! Every failure is terminal for the call that produced it. Nothing in the
//! engine retries: all operations are local and single pass.

use thiserror::Error;

/// Engine result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error returned by every fallible operation in the crate.
#[derive(Debug, Error)]
pub enum Error {
  /// Reading the source or writing the destination failed.
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  /// The compressed data is malformed.
  #[error("format error: {0}")]
  Format(#[from] FormatError),

  /// `extract_min` was called on an empty priority queue.
  ///
  /// Never reachable through the codec, which handles the empty input before
  /// building a tree.
  #[error("extract from an empty priority queue")]
  EmptyQueue,

  /// The encoder was handed a byte the code table has no code for.
  #[error("no code assigned to symbol {symbol:#04x}")]
  MissingCode { symbol: u8 },

  /// A symbol occurs more often than a header count can record.
  #[error("symbol {symbol:#04x} occurs more than {} times", u32::MAX)]
  CountOverflow { symbol: u8 },
}

/// Ways in which a compressed stream can be malformed.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum FormatError {
  /// Fewer bytes than a complete header.
  #[error("truncated header: need {} bytes, got {actual}", crate::header::HEADER_LEN)]
  TruncatedHeader { actual: usize },

  /// The header promises data but records no symbol counts.
  #[error("header records {original_size} bytes but every symbol count is zero")]
  EmptyFrequencies { original_size: u64 },

  /// The symbol counts do not add up to the recorded size.
  #[error("header records {original_size} bytes but symbol counts sum to {total}")]
  FrequencyMismatch { original_size: u64, total: u64 },

  /// The payload ran out of bits before every symbol was decoded.
  #[error("truncated payload: expected {expected} symbols, decoded {decoded}")]
  TruncatedPayload { expected: u64, decoded: u64 },
}
