//! Huffman coding tree construction.

use crate::error::Result;
use crate::freq::FrequencyTable;
use crate::heap::MinHeap;
use std::cmp::Ordering;

/// A node of the coding tree.
///
/// Internal nodes always own exactly two children. A tree built from a table
/// with a single present symbol is just one `Leaf`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CodeNode {
  Leaf {
    symbol: u8,
    weight: u64,
  },
  Internal {
    weight: u64,
    left: Box<CodeNode>,
    right: Box<CodeNode>,
  },
}

impl CodeNode {
  /// Builds the coding tree for `table`.
  ///
  /// Both the compressor and the decompressor call this with the same table,
  /// so the result must depend on nothing else. Nodes are ordered in the
  /// queue by weight and then by creation sequence: leaves are numbered in
  /// ascending symbol order, merged nodes continue the numbering. The first
  /// node extracted in a merge becomes the left child.
  ///
  /// Fails with [`Error::EmptyQueue`] if no symbol is present.
  ///
  /// [`Error::EmptyQueue`]: crate::error::Error::EmptyQueue
  pub fn build(table: &FrequencyTable) -> Result<CodeNode> {
    let leaves: Vec<Pending> = table
      .present()
      .enumerate()
      .map(|(seq, (symbol, count))| Pending {
        seq,
        node: CodeNode::Leaf {
          symbol,
          weight: count as u64,
        },
      })
      .collect();

    let mut next_seq = leaves.len();
    let mut queue = MinHeap::from_unordered(leaves);

    while queue.len() > 1 {
      let left = queue.extract_min()?;
      let right = queue.extract_min()?;
      queue.insert(Pending {
        seq: next_seq,
        node: CodeNode::merge(left.node, right.node),
      });
      next_seq += 1;
    }

    let root = queue.extract_min()?.node;
    log::trace!("coding tree:\n{}", root.render());
    Ok(root)
  }

  /// Joins two subtrees under a new internal node.
  pub fn merge(left: CodeNode, right: CodeNode) -> CodeNode {
    CodeNode::Internal {
      weight: left.weight() + right.weight(),
      left: Box::new(left),
      right: Box::new(right),
    }
  }

  /// Total count of all symbols below this node.
  pub fn weight(&self) -> u64 {
    match self {
      CodeNode::Leaf { weight, .. } | CodeNode::Internal { weight, .. } => {
        *weight
      }
    }
  }

  pub fn is_leaf(&self) -> bool {
    matches!(self, CodeNode::Leaf { .. })
  }

  /// Number of leaves, i.e., distinct symbols, in this subtree.
  pub fn leaf_count(&self) -> usize {
    match self {
      CodeNode::Leaf { .. } => 1,
      CodeNode::Internal { left, right, .. } => {
        left.leaf_count() + right.leaf_count()
      }
    }
  }

  /// Length of the longest root to leaf path. A lone leaf has depth 0.
  pub fn depth(&self) -> usize {
    match self {
      CodeNode::Leaf { .. } => 0,
      CodeNode::Internal { left, right, .. } => {
        1 + left.depth().max(right.depth())
      }
    }
  }

  /// Renders the tree as indented text, one node per line, children labeled
  /// with the bit that selects them.
  ///
  /// ```text
  /// * [6]
  ///   0: 'b' [3]
  ///   1: * [3]
  ///     0: 0x0a [1]
  ///     1: 'a' [2]
  /// ```
  pub fn render(&self) -> String {
    let mut out = String::new();
    self.render_into(&mut out, 0, None);
    out
  }

  fn render_into(&self, out: &mut String, depth: usize, bit: Option<u8>) {
    let indent = "  ".repeat(depth);
    let label = match bit {
      Some(b) => format!("{}: ", b),
      None => String::new(),
    };
    let node = match self {
      CodeNode::Leaf { symbol, weight } => {
        format!("{} [{}]", symbol_label(*symbol), weight)
      }
      CodeNode::Internal { weight, .. } => format!("* [{}]", weight),
    };
    out.push_str(&indent);
    out.push_str(&label);
    out.push_str(&node);
    out.push('\n');
    if let CodeNode::Internal { left, right, .. } = self {
      left.render_into(out, depth + 1, Some(0));
      right.render_into(out, depth + 1, Some(1));
    }
  }
}

/// Printable form of a symbol: the quoted character for graphic ASCII and
/// space, hex otherwise.
pub fn symbol_label(symbol: u8) -> String {
  if symbol.is_ascii_graphic() || symbol == b' ' {
    format!("'{}'", symbol as char)
  } else {
    format!("{:#04x}", symbol)
  }
}

/// Queue entry for a subtree that has not been merged yet.
struct Pending {
  seq: usize,
  node: CodeNode,
}

impl Pending {
  fn key(&self) -> (u64, usize) {
    (self.node.weight(), self.seq)
  }
}

impl PartialEq for Pending {
  fn eq(&self, other: &Self) -> bool {
    self.key() == other.key()
  }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Pending {
  fn cmp(&self, other: &Self) -> Ordering {
    self.key().cmp(&other.key())
  }
}
