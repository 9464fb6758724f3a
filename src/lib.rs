//! Static Huffman compression over bytes.
//!
//! ```
//! let input = b"abracadabra";
//! let encoded = huffpack::compress(input)?;
//! assert_eq!(huffpack::decompress(&encoded)?, input.to_vec());
//! # Ok::<(), huffpack::Error>(())
//! ```

pub mod bit;
pub mod codec;
pub mod error;
pub mod freq;
pub mod header;
pub mod heap;
pub mod math;
pub mod pack;
pub mod report;
pub mod table;
pub mod tree;

pub use codec::{compress, decompress};
pub use error::{Error, FormatError, Result};
