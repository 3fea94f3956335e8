//! Compression algorithms implementation.
//!
//! This module provides prefix (Huffman) coding over the byte alphabet:
//! - Frequency collection from an in-memory buffer or any `Read` source
//! - Huffman tree construction with deterministic tie-breaking
//! - Codeword lookup in both directions
//! - Encoding to and decoding from '0'/'1' bit strings
//! - Original and compressed size accounting
//!
//! # Examples
//!
//! ```rust
//! use prefix_coder::cs::compression::{PrefixCode, PrefixCoder};
//!
//! let mut coder = PrefixCoder::new();
//! coder.generate_code(&b"abracadabra"[..]).unwrap();
//! let bits = coder.encode(b"cadabra").unwrap();
//! assert_eq!(coder.decode(&bits).unwrap(), b"cadabra");
//! ```

use std::io::Read;

use crate::cs::error::Error;

/// Result type for compression operations
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for codes that map each byte to a binary codeword.
///
/// Codewords and encoded texts are strings of '0' and '1'.
pub trait PrefixCode {
    /// Generate the code from the byte frequencies of `reader`.
    fn generate_code<R: Read>(&mut self, reader: R) -> Result<()>;

    /// Codeword for `byte`, or the empty string if it has none.
    fn get_codeword(&self, byte: u8) -> &str;

    /// Byte whose codeword is `codeword`, or `None` if there is no such byte.
    fn get_char(&self, codeword: &str) -> Result<Option<u8>>;

    /// Concatenation of the codewords of every byte of `data`.
    fn encode(&self, data: &[u8]) -> Result<String>;

    /// Replace each codeword in `bits` with its byte.
    fn decode(&self, bits: &str) -> Result<Vec<u8>>;

    /// Size of the text the code was generated from, in bytes.
    fn original_size(&self) -> Result<u64>;

    /// Size of that text once encoded, in whole bytes (bits / 8, rounded down).
    fn compressed_size(&self) -> Result<u64>;
}

pub mod huffman;
pub use huffman::{
    build_code_table, build_frequency_table, build_huffman_tree, CodeMap, FrequencyTable,
    HuffmanNode, HuffmanTree, PrefixCoder,
};
