//! Lossless text compression with Huffman coding.
//!
//! The pipeline runs in distinct stages, each usable on its own:
//! - frequency analysis ([`frequency`])
//! - optimal prefix-tree construction with deterministic tie-breaking
//!   ([`tree`])
//! - code assignment from root-to-leaf paths ([`code_table`])
//! - bit-level packing with padding management ([`bits`])
//!
//! The [`codec`] facade chains the stages and defines a self-describing
//! byte layout: the serialized tree travels with the payload, so the
//! bytes alone suffice to decompress. [`io`] wraps the codec in a small
//! file driver.
//!
//! # Examples
//!
//! ```rust
//! use huffman_text::{compress, decompress};
//!
//! let input = "so it goes, so it goes, so it goes";
//! let bytes = compress(input).unwrap();
//! assert_eq!(decompress(&bytes).unwrap(), input);
//! ```

pub mod bits;
pub mod code_table;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod io;
pub mod tree;

pub use code_table::CodeTable;
pub use codec::{compress, decompress};
pub use error::{Error, Result};
pub use frequency::build_frequency_table;
pub use tree::{build_huffman_tree, HuffmanNode};
