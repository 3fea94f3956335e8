use super::frequency::FrequencyTable;
use super::tree::{build_code_table, HuffmanNode, HuffmanTree};
use crate::cs::compression::{PrefixCode, Result};
use crate::cs::error::Error;
use log::{debug, warn};
use std::io::Read;

/// Code state produced by a successful generation.
#[derive(Debug, Clone)]
struct GeneratedCode {
    frequencies: FrequencyTable,
    /// Absent when the input was empty.
    tree: Option<HuffmanTree>,
    codes: [Option<String>; 256],
}

impl GeneratedCode {
    fn from_frequencies(frequencies: FrequencyTable) -> Self {
        let tree = HuffmanTree::build(&frequencies);
        let mut codes: [Option<String>; 256] = std::array::from_fn(|_| None);
        if let Some(tree) = &tree {
            for (byte, code) in build_code_table(tree) {
                codes[byte as usize] = Some(code);
            }
        }
        GeneratedCode {
            frequencies,
            tree,
            codes,
        }
    }

    fn encoded_bits(&self) -> u64 {
        self.frequencies
            .iter()
            .filter_map(|(byte, count)| {
                self.codes[byte as usize]
                    .as_ref()
                    .map(|code| code.len() as u64 * count)
            })
            .sum()
    }
}

/// A Huffman prefix coder over the 256 byte values.
///
/// The coder starts out empty. [`PrefixCode::generate_code`] scans a byte
/// source once, builds the Huffman tree from the observed frequencies and
/// derives one codeword per distinct byte. The code is then fixed until the
/// next generation.
///
/// # Example
///
/// ```
/// use prefix_coder::{PrefixCode, PrefixCoder};
///
/// let coder = PrefixCoder::from_bytes(b"aaaaaaaaaaaaaaaabbbbbbbbccccdde");
/// assert_eq!(coder.get_codeword(b'a').len(), 1);
/// assert_eq!(coder.original_size().unwrap(), 31);
/// assert_eq!(coder.compressed_size().unwrap(), 7);
///
/// let bits = coder.encode(b"abcde").unwrap();
/// assert_eq!(coder.decode(&bits).unwrap(), b"abcde");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrefixCoder {
    code: Option<GeneratedCode>,
}

impl PrefixCoder {
    /// Creates a coder with no code generated yet.
    pub fn new() -> Self {
        PrefixCoder { code: None }
    }

    /// Creates a coder whose code is generated from `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut coder = PrefixCoder::new();
        coder.generate_code_from_bytes(bytes);
        coder
    }

    /// Creates a coder whose code is generated from everything `reader` yields.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut coder = PrefixCoder::new();
        coder.generate_code(reader)?;
        Ok(coder)
    }

    /// Generates the code from an in-memory byte slice.
    pub fn generate_code_from_bytes(&mut self, bytes: &[u8]) {
        self.install(FrequencyTable::from_bytes(bytes));
    }

    fn install(&mut self, frequencies: FrequencyTable) {
        let code = GeneratedCode::from_frequencies(frequencies);
        debug!(
            "generated prefix code: {} distinct bytes, {} bytes in, {} bits out",
            code.frequencies.distinct(),
            code.frequencies.total(),
            code.encoded_bits()
        );
        self.code = Some(code);
    }

    fn generated(&self) -> Result<&GeneratedCode> {
        self.code.as_ref().ok_or(Error::CodeNotGenerated)
    }

    pub fn is_generated(&self) -> bool {
        self.code.is_some()
    }

    /// The frequency table of the last generation.
    pub fn frequencies(&self) -> Option<&FrequencyTable> {
        self.code.as_ref().map(|code| &code.frequencies)
    }

    /// The Huffman tree of the last generation; `None` before generation
    /// and after generating from empty input.
    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.code.as_ref().and_then(|code| code.tree.as_ref())
    }

    /// Iterates over `(byte, codeword)` for every byte with a codeword, in
    /// ascending byte order.
    pub fn codewords(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.code.iter().flat_map(|code| {
            code.codes
                .iter()
                .enumerate()
                .filter_map(|(byte, code)| code.as_deref().map(|code| (byte as u8, code)))
        })
    }

    /// Total number of bits the training input occupies once encoded.
    pub fn encoded_bits(&self) -> Result<u64> {
        Ok(self.generated()?.encoded_bits())
    }

    /// Compressed size as a fraction of the original size, or `None` when
    /// the training input was empty.
    pub fn compression_ratio(&self) -> Result<Option<f64>> {
        let original = self.original_size()?;
        if original == 0 {
            return Ok(None);
        }
        Ok(Some(self.compressed_size()? as f64 / original as f64))
    }

    /// Encodes the UTF-8 bytes of `text`.
    pub fn encode_str(&self, text: &str) -> Result<String> {
        self.encode(text.as_bytes())
    }
}

impl PrefixCode for PrefixCoder {
    /// Scans `reader` to the end and replaces the current code with one
    /// built from the bytes read.
    ///
    /// On a read error the coder is left without a code; nothing from the
    /// failed scan is kept.
    fn generate_code<R: Read>(&mut self, reader: R) -> Result<()> {
        self.code = None;
        match FrequencyTable::from_reader(reader) {
            Ok(frequencies) => {
                self.install(frequencies);
                Ok(())
            }
            Err(e) => {
                warn!("code generation aborted: {}", e);
                Err(e)
            }
        }
    }

    fn get_codeword(&self, byte: u8) -> &str {
        self.code
            .as_ref()
            .and_then(|code| code.codes[byte as usize].as_deref())
            .unwrap_or("")
    }

    fn get_char(&self, codeword: &str) -> Result<Option<u8>> {
        let code = self.generated()?;
        Ok(code
            .tree
            .as_ref()
            .and_then(|tree| tree.symbol_for(codeword)))
    }

    /// Fails with [`Error::UnknownSymbol`] on the first byte that has no
    /// codeword instead of skipping it.
    fn encode(&self, data: &[u8]) -> Result<String> {
        let code = self.generated()?;
        let mut encoded = String::new();
        for (position, &byte) in data.iter().enumerate() {
            let codeword = code.codes[byte as usize]
                .as_deref()
                .ok_or(Error::UnknownSymbol { byte, position })?;
            encoded.push_str(codeword);
        }
        Ok(encoded)
    }

    /// Decodes codewords back to back, restarting at the root after each
    /// leaf. A trailing partial codeword is dropped.
    fn decode(&self, bits: &str) -> Result<Vec<u8>> {
        let code = self.generated()?;
        let mut decoded = Vec::new();
        for (position, bit) in bits.chars().enumerate() {
            if bit != '0' && bit != '1' {
                return Err(Error::InvalidBit {
                    found: bit,
                    position,
                });
            }
        }

        let Some(tree) = &code.tree else {
            return Ok(decoded);
        };

        // A lone leaf is reached by the single edge '0'.
        if let HuffmanNode::Leaf { byte, .. } = tree.root() {
            for (position, bit) in bits.chars().enumerate() {
                if bit != '0' {
                    return Err(Error::InvalidCodeword { position });
                }
                decoded.push(*byte);
            }
            return Ok(decoded);
        }

        let mut current = tree.root();
        for (position, bit) in bits.chars().enumerate() {
            current = current
                .child(bit)
                .ok_or(Error::InvalidCodeword { position })?;
            if let HuffmanNode::Leaf { byte, .. } = current {
                decoded.push(*byte);
                current = tree.root();
            }
        }
        Ok(decoded)
    }

    fn original_size(&self) -> Result<u64> {
        let code = self.generated()?;
        Ok(code.tree.as_ref().map_or(0, HuffmanTree::weight))
    }

    fn compressed_size(&self) -> Result<u64> {
        Ok(self.generated()?.encoded_bits() / 8)
    }
}
