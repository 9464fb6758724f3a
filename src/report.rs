//! Human and machine readable descriptions of compressed files.

use crate::bit::BitVecExt;
use crate::error::Result;
use crate::header::{Header, HEADER_LEN};
use crate::math;
use crate::table::CodeTable;
use crate::tree::{symbol_label, CodeNode};
use serde::Serialize;
use std::io::Read;

/// Statistics and the code table of a compressed stream, derived from its
/// header alone.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
  pub original_size: u64,
  pub compressed_size: u64,
  pub payload_bytes: u64,
  /// Compressed size relative to the original, absent for empty originals.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ratio: Option<f64>,
  pub distinct_symbols: usize,
  pub tree_depth: usize,
  pub symbols: Vec<SymbolReport>,
  #[serde(skip)]
  tree: Option<CodeNode>,
}

/// One present symbol.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SymbolReport {
  pub symbol: u8,
  pub label: String,
  pub count: u32,
  pub code: String,
}

impl Report {
  /// Reads the header of a compressed stream and describes it.
  ///
  /// `compressed_size` is the full size of the stream, typically taken from
  /// file metadata; the payload itself is never read.
  pub fn from_reader<R: Read>(mut reader: R, compressed_size: u64) -> Result<Self> {
    let header = Header::read_from(&mut reader)?;
    Report::from_header(&header, compressed_size)
  }

  pub fn from_header(header: &Header, compressed_size: u64) -> Result<Self> {
    let freq = &header.frequencies;
    let tree = if freq.is_empty() {
      None
    } else {
      Some(CodeNode::build(freq)?)
    };

    let symbols = match &tree {
      Some(root) => CodeTable::generate(root)
        .iter()
        .map(|(symbol, code)| SymbolReport {
          symbol,
          label: symbol_label(symbol),
          count: freq.get(symbol),
          code: code.to_bit_string(),
        })
        .collect(),
      None => Vec::new(),
    };

    Ok(Report {
      original_size: header.original_size,
      compressed_size,
      payload_bytes: compressed_size.saturating_sub(HEADER_LEN as u64),
      ratio: math::ratio(compressed_size, header.original_size),
      distinct_symbols: freq.distinct(),
      tree_depth: tree.as_ref().map_or(0, CodeNode::depth),
      symbols,
      tree,
    })
  }

  /// The coding tree, absent for an empty original.
  pub fn tree(&self) -> Option<&CodeNode> {
    self.tree.as_ref()
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::codec::compress;

  fn report_for(input: &[u8]) -> Report {
    let encoded = compress(input).unwrap();
    Report::from_reader(&encoded[..], encoded.len() as u64).unwrap()
  }

  #[test]
  fn report_lists_codes() {
    let report = report_for(b"aabbb\n");
    assert_eq!(6, report.original_size);
    assert_eq!(HEADER_LEN as u64 + 2, report.compressed_size);
    assert_eq!(2, report.payload_bytes);
    assert_eq!(3, report.distinct_symbols);
    assert_eq!(2, report.tree_depth);

    let codes: Vec<(&str, &str)> = report
      .symbols
      .iter()
      .map(|s| (s.label.as_str(), s.code.as_str()))
      .collect();
    assert_eq!(vec![("0x0a", "10"), ("'a'", "11"), ("'b'", "0")], codes);
  }

  #[test]
  fn report_for_empty_original() {
    let report = report_for(&[]);
    assert_eq!(0, report.original_size);
    assert_eq!(None, report.ratio);
    assert!(report.symbols.is_empty());
    assert!(report.tree().is_none());
  }

  #[test]
  fn report_serializes_without_tree() {
    let report = report_for(b"xx");
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(2, json["original_size"]);
    assert_eq!("0", json["symbols"][0]["code"]);
    assert!(json.get("tree").is_none());

    let yaml = serde_yaml::to_string(&report).unwrap();
    assert!(yaml.contains("distinct_symbols: 1"));
  }
}
