//! An array backed binary min-heap.

use crate::error::{Error, Result};

/// Priority queue which always yields its smallest element first.
///
/// Ordering comes entirely from `T: Ord`. Items that compare equal come out
/// in an unspecified order, so callers needing reproducible output must make
/// their ordering total over distinct items.
#[derive(Clone, Debug)]
pub struct MinHeap<T> {
  elements: Vec<T>,
}

#[inline]
fn parent(i: usize) -> usize {
  (i - 1) / 2
}

#[inline]
fn left(i: usize) -> usize {
  2 * i + 1
}

#[inline]
fn right(i: usize) -> usize {
  2 * i + 2
}

impl<T> MinHeap<T> {
  /// Constructs an empty heap.
  pub fn new() -> Self {
    MinHeap {
      elements: Vec::new(),
    }
  }

  /// Number of elements in the heap.
  #[inline]
  pub fn len(&self) -> usize {
    self.elements.len()
  }

  /// True if the heap holds no elements.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.elements.is_empty()
  }
}

impl<T: Ord> MinHeap<T> {
  /// Builds a heap out of `items` in linear time by sifting down every
  /// internal position from the last one back to the root.
  pub fn from_unordered(items: Vec<T>) -> Self {
    let mut heap = MinHeap { elements: items };
    let n = heap.len();
    for i in (0..n / 2).rev() {
      heap.sift_down(i);
    }
    heap
  }

  /// Adds `item` to the heap.
  pub fn insert(&mut self, item: T) {
    self.elements.push(item);
    self.sift_up(self.len() - 1);
  }

  /// Removes and returns the smallest element.
  ///
  /// Fails with [`Error::EmptyQueue`] if the heap is empty.
  pub fn extract_min(&mut self) -> Result<T> {
    if self.is_empty() {
      return Err(Error::EmptyQueue);
    }
    let result = self.elements.swap_remove(0);
    if !self.is_empty() {
      self.sift_down(0);
    }
    Ok(result)
  }

  fn sift_up(&mut self, mut i: usize) {
    while i > 0 {
      let p = parent(i);
      if self.elements[i] >= self.elements[p] {
        break;
      }
      self.elements.swap(i, p);
      i = p;
    }
  }

  fn sift_down(&mut self, mut i: usize) {
    let n = self.len();
    loop {
      let l = left(i);
      let r = right(i);
      let mut smallest = i;

      if l < n && self.elements[l] < self.elements[smallest] {
        smallest = l;
      }
      if r < n && self.elements[r] < self.elements[smallest] {
        smallest = r;
      }
      if smallest == i {
        return;
      }

      self.elements.swap(i, smallest);
      i = smallest;
    }
  }

  #[cfg(test)]
  fn is_valid(&self) -> bool {
    (1..self.len()).all(|i| self.elements[parent(i)] <= self.elements[i])
  }
}

impl<T> Default for MinHeap<T> {
  fn default() -> Self {
    Self::new()
  }
}
