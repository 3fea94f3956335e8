//! Huffman coding over the 256 byte values.
//!
//! Code generation runs in three phases: [`frequency`] tallies the input,
//! [`tree`] merges the lightest subtrees into a Huffman tree and derives the
//! codewords, and [`coder`] holds the result and answers queries against it.

pub mod coder;
pub mod frequency;
pub mod tree;


pub use coder::PrefixCoder;
pub use frequency::{build_frequency_table, FrequencyTable};
pub use tree::{build_code_table, build_huffman_tree, CodeMap, HuffmanNode, HuffmanTree};
