//! Symbol to code mapping derived from a coding tree.

use crate::bit::BitVec;
use crate::freq::{FrequencyTable, SYMBOLS};
use crate::tree::CodeNode;

/// The code assigned to each symbol, indexed by symbol.
///
/// Only leaves receive codes so no code is a prefix of another.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CodeTable {
  codes: Vec<Option<BitVec>>,
}

impl CodeTable {
  /// Derives the code table from `root` by walking every root to leaf path,
  /// emitting 0 for a left edge and 1 for a right edge.
  ///
  /// A root that is itself a leaf has an empty path, which can't be decoded,
  /// so it gets the one bit code `0` instead.
  pub fn generate(root: &CodeNode) -> Self {
    let mut table = CodeTable {
      codes: vec![None; SYMBOLS],
    };

    if let CodeNode::Leaf { symbol, .. } = root {
      table.codes[*symbol as usize] = Some(BitVec::from_elem(1, false));
      return table;
    }

    let mut path = BitVec::new();
    table.assign(root, &mut path);
    table
  }

  fn assign(&mut self, node: &CodeNode, path: &mut BitVec) {
    match node {
      CodeNode::Leaf { symbol, .. } => {
        self.codes[*symbol as usize] = Some(path.clone());
      }
      CodeNode::Internal { left, right, .. } => {
        path.push(false);
        self.assign(left, path);
        path.pop();

        path.push(true);
        self.assign(right, path);
        path.pop();
      }
    }
  }

  /// The code for `symbol`, if it has one.
  #[inline]
  pub fn get(&self, symbol: u8) -> Option<&BitVec> {
    self.codes[symbol as usize].as_ref()
  }

  /// Symbols with a code and their codes in ascending symbol order.
  pub fn iter(&self) -> impl Iterator<Item = (u8, &BitVec)> + '_ {
    self
      .codes
      .iter()
      .enumerate()
      .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u8, c)))
  }

  /// Number of payload bits produced by encoding input with counts `table`.
  ///
  /// Symbols without a code contribute nothing.
  pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
    self
      .iter()
      .map(|(symbol, code)| table.get(symbol) as u64 * code.len() as u64)
      .sum()
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::bit::BitVecExt;
  use proptest::prelude::*;

  fn table_for(input: &[u8]) -> (FrequencyTable, CodeTable) {
    let freq = FrequencyTable::count(input).unwrap();
    let root = CodeNode::build(&freq).unwrap();
    (freq, CodeTable::generate(&root))
  }

  fn code(table: &CodeTable, symbol: u8) -> String {
    table.get(symbol).unwrap().to_bit_string()
  }

  #[test]
  fn single_leaf_gets_code_zero() {
    let (_, table) = table_for(b"AAAAAA");
    assert_eq!(1, table.iter().count());
    assert_eq!("0", code(&table, b'A'));
  }

  #[test]
  fn codes_follow_tree_paths() {
    // Tree: root(b, (\n, a)).
    let (_, table) = table_for(b"aabbb\n");
    assert_eq!("0", code(&table, b'b'));
    assert_eq!("10", code(&table, b'\n'));
    assert_eq!("11", code(&table, b'a'));
    assert_eq!(None, table.get(b'z'));
  }

  #[test]
  fn encoded_bits_counts_every_occurrence() {
    let (freq, table) = table_for(b"aabbb\n");
    // b: 3 x 1, \n: 1 x 2, a: 2 x 2
    assert_eq!(9, table.encoded_bits(&freq));
  }

  #[test]
  fn iter_is_in_symbol_order() {
    let (_, table) = table_for(b"cab");
    let symbols: Vec<u8> = table.iter().map(|(s, _)| s).collect();
    assert_eq!(b"abc".to_vec(), symbols);
  }

  proptest! {
    #[test]
    fn prop_codes_are_prefix_free(input: Vec<u8>) {
      prop_assume!(!input.is_empty());
      let (freq, table) = table_for(&input);
      assert_eq!(freq.distinct(), table.iter().count());

      for (a, code_a) in table.iter() {
        assert!(!code_a.is_empty());
        for (b, code_b) in table.iter() {
          if a != b {
            assert!(!code_b.starts_with(code_a));
          }
        }
      }
    }
  }
}
