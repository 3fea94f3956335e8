//! Byte frequency collection.
//!
//! A [`FrequencyTable`] tallies how often each of the 256 byte values occurs
//! in an input. Tables are built in one forward pass, either over an
//! in-memory slice or over any [`Read`] source.

use crate::cs::error::Result;
use std::io::{ErrorKind, Read};

const ALPHABET_SIZE: usize = 256;
const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Occurrence counts for every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
    total: u64,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    /// Creates a table in which every count is zero.
    pub fn new() -> Self {
        FrequencyTable {
            counts: [0; ALPHABET_SIZE],
            total: 0,
        }
    }

    /// Tallies every byte of `bytes`.
    ///
    /// With the `parallel` feature enabled, large inputs are counted in
    /// chunks on the rayon pool and summed; the result is identical to the
    /// sequential count.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            if bytes.len() >= READ_BUFFER_SIZE {
                return bytes
                    .par_chunks(READ_BUFFER_SIZE)
                    .fold(FrequencyTable::new, |mut table, chunk| {
                        table.add_bytes(chunk);
                        table
                    })
                    .reduce(FrequencyTable::new, |mut a, b| {
                        a.merge(&b);
                        a
                    });
            }
        }

        let mut table = FrequencyTable::new();
        table.add_bytes(bytes);
        table
    }

    /// Tallies every byte produced by `reader` until it is exhausted.
    ///
    /// The reader is consumed in a single forward scan. Any read error other
    /// than [`ErrorKind::Interrupted`] aborts the scan and is returned; no
    /// partial table escapes.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut table = FrequencyTable::new();
        let mut buffer = [0u8; READ_BUFFER_SIZE];
        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => table.add_bytes(&buffer[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(table)
    }

    fn add_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.counts[byte as usize] += 1;
        }
        self.total += bytes.len() as u64;
    }

    #[cfg(feature = "parallel")]
    fn merge(&mut self, other: &FrequencyTable) {
        for (count, extra) in self.counts.iter_mut().zip(other.counts.iter()) {
            *count += extra;
        }
        self.total += other.total;
    }

    /// Number of occurrences of `byte`.
    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Total number of bytes tallied.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct byte values that occurred at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterates over `(byte, count)` for the bytes that occurred, in
    /// ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }
}

/// Build a frequency table for the bytes of `input`.
pub fn build_frequency_table(input: &[u8]) -> FrequencyTable {
    FrequencyTable::from_bytes(input)
}
