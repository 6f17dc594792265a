//! Bit-level buffers used between segmentation and codeword assembly.

/// Append-only bit sequence, most significant bit first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` bits
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Number of bits written so far
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether no bits have been written
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append the low `count` bits of `value`, MSB first
    pub fn append_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32);
        debug_assert!(count == 32 || value >> count == 0);
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    /// Append every bit of another buffer
    pub fn extend_from(&mut self, other: &BitBuffer) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// Raw bits
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Pack into bytes; a trailing partial byte is zero-filled
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}

/// Sequential MSB-first reader over a bit slice
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bits: &'a [bool],
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Start reading at the first bit
    pub fn new(bits: &'a [bool]) -> Self {
        Self { bits, pos: 0 }
    }

    /// Bits not yet consumed
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }

    /// Read `count` bits as an unsigned value, or `None` when the stream
    /// is too short
    pub fn read(&mut self, count: usize) -> Option<u32> {
        if count > 32 || count > self.remaining() {
            return None;
        }
        let value = self.bits[self.pos..self.pos + count]
            .iter()
            .fold(0u32, |acc, &bit| (acc << 1) | bit as u32);
        self.pos += count;
        Some(value)
    }
}

/// Unpack bytes into bits, MSB first
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
        .collect()
}
