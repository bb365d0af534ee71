//! Bit streams.
//!
//! [`BitSequence`] is the encoder output and decoder input: an ordered,
//! append-only list of bits. It packs MSB-first into bytes, zero-padding the
//! final byte; unpacking cannot tell padding from data, which is fine because
//! the terminator symbol bounds how far the decoder reads.
//!
//! [`BitSource`] feeds the decoder. Past the end of the real bits it supplies
//! a single `1` and then `0` forever.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An ordered sequence of bits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitSequence {
    bits: Vec<bool>,
}

impl BitSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Append one bit.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append `count` copies of `bit`.
    #[inline]
    pub fn push_repeated(&mut self, bit: bool, count: u32) {
        self.bits.extend(std::iter::repeat(bit).take(count as usize));
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if no bits were written.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Iterate over the bits front to back.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Bits as a slice.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Pack MSB-first, 8 bits per byte, zero-padding the last byte.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, &bit)| byte | (u8::from(bit) << (7 - i)))
            })
            .collect()
    }

    /// Unpack every bit of `bytes`, MSB-first. Padding bits are kept.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let bits = bytes
            .iter()
            .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
            .collect();
        Self { bits }
    }
}

impl Extend<bool> for BitSequence {
    fn extend<T: IntoIterator<Item = bool>>(&mut self, iter: T) {
        self.bits.extend(iter);
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitSequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(Error::InvalidBitString(other)),
            })
            .collect()
    }
}

/// Decoder bit supply with the end-of-stream padding policy.
#[derive(Clone, Debug)]
pub struct BitSource<'a> {
    bits: &'a [bool],
    position: usize,
    padded: bool,
}

impl<'a> BitSource<'a> {
    /// Start reading `bits` from the front.
    pub fn new(bits: &'a BitSequence) -> Self {
        Self {
            bits: bits.as_slice(),
            position: 0,
            padded: false,
        }
    }

    /// Read up to `width` real bits MSB-first into a left-justified register.
    ///
    /// Missing bits are zero and do not trigger the end-of-stream `1`.
    pub fn register(&mut self, width: u32) -> u32 {
        let mut value = 0;
        for _ in 0..width {
            let bit = match self.bits.get(self.position) {
                Some(&bit) => {
                    self.position += 1;
                    bit
                }
                None => false,
            };
            value = (value << 1) | u32::from(bit);
        }
        value
    }

    /// Next bit: real bits first, then `1` once, then `0`.
    #[inline]
    pub fn next_bit(&mut self) -> bool {
        if let Some(&bit) = self.bits.get(self.position) {
            self.position += 1;
            bit
        } else if !self.padded {
            self.padded = true;
            true
        } else {
            false
        }
    }

    /// Number of real bits consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// True once every real bit has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.bits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitSequence {
        s.parse().unwrap()
    }

    #[test]
    fn test_pack_partial_byte() {
        let seq = bits("0110011101");
        assert_eq!(seq.to_bytes(), vec![0b0110_0111, 0b0100_0000]);
    }

    #[test]
    fn test_unpack_keeps_padding() {
        let seq = bits("10111");
        let unpacked = BitSequence::from_bytes(&seq.to_bytes());
        assert_eq!(unpacked, bits("10111000"));
        assert_eq!(unpacked.len(), 8);
    }

    #[test]
    fn test_pack_exact_bytes() {
        let seq = bits("1010101111110000");
        assert_eq!(seq.to_bytes(), vec![0b1010_1011, 0b1111_0000]);
        assert_eq!(BitSequence::from_bytes(&seq.to_bytes()), seq);
    }

    #[test]
    fn test_empty() {
        let seq = BitSequence::new();
        assert!(seq.to_bytes().is_empty());
        assert!(BitSequence::from_bytes(&[]).is_empty());
        assert_eq!(seq.to_string(), "");
    }

    #[test]
    fn test_display_and_parse() {
        let seq = bits("0011");
        assert_eq!(seq.to_string(), "0011");
        assert!(matches!(
            "01x1".parse::<BitSequence>(),
            Err(Error::InvalidBitString('x'))
        ));
    }

    #[test]
    fn test_push_repeated() {
        let mut seq = BitSequence::new();
        seq.push(false);
        seq.push_repeated(true, 3);
        seq.push_repeated(false, 0);
        assert_eq!(seq, bits("0111"));
    }

    #[test]
    fn test_source_register_left_justified() {
        let seq = bits("1011");
        let mut source = BitSource::new(&seq);
        assert_eq!(source.register(16), 0b1011_0000_0000_0000);
        assert_eq!(source.position(), 4);
        assert!(source.is_exhausted());
    }

    #[test]
    fn test_source_register_full_width() {
        let seq = bits("10000000000000011");
        let mut source = BitSource::new(&seq);
        assert_eq!(source.register(16), 0x8001);
        assert!(!source.is_exhausted());
        assert!(source.next_bit());
        assert!(source.is_exhausted());
    }

    #[test]
    fn test_source_padding_policy() {
        let seq = bits("00");
        let mut source = BitSource::new(&seq);
        assert!(!source.next_bit());
        assert!(!source.next_bit());
        // One implicit 1, then zeros forever.
        assert!(source.next_bit());
        for _ in 0..32 {
            assert!(!source.next_bit());
        }
        assert_eq!(source.position(), 2);
    }

    #[test]
    fn test_source_short_register_then_padding() {
        let seq = bits("1");
        let mut source = BitSource::new(&seq);
        assert_eq!(source.register(16), 0x8000);
        assert!(source.next_bit());
        assert!(!source.next_bit());
    }
}
