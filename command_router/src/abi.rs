// Copyright 2026 the Command Router Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Word-level encoding/decoding primitives for operand buffers.
//!
//! Operand buffers use the standard ABI word layout: 32-byte big-endian head
//! slots at byte offsets 0, 32, 64, …, with dynamic tails located by an offset
//! word in the head. Byte strings and element sequences are length-prefixed.
//!
//! Every read is bounds-checked. A buffer shorter than the layout a command
//! declares is a typed [`DecodeError`], never an out-of-bounds read.

use alloc::vec::Vec;
use core::fmt;

/// Size of one operand word in bytes.
pub const WORD: usize = 32;

/// A decode error for operand buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended before a declared field.
    UnexpectedEof,
    /// A tail offset or length was out of bounds.
    OutOfBounds,
    /// A boolean word was not canonical `0` or `1`.
    InvalidBool,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::OutOfBounds => write!(f, "offset or length out of bounds"),
            Self::InvalidBool => write!(f, "non-canonical boolean word"),
        }
    }
}

impl core::error::Error for DecodeError {}

/// One 32-byte big-endian operand word.
///
/// Comparison is lexicographic over the big-endian bytes, which coincides with
/// numeric order for unsigned 256-bit values.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(pub [u8; 32]);

impl Word {
    /// The all-zero word.
    pub const ZERO: Self = Self([0; 32]);

    /// Builds a word from a `u64` value.
    #[must_use]
    pub const fn from_u64(v: u64) -> Self {
        let mut b = [0u8; 32];
        let be = v.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            b[24 + i] = be[i];
            i += 1;
        }
        Self(b)
    }

    /// Returns the value as `u64`, or `None` if it does not fit.
    #[must_use]
    pub fn to_u64(self) -> Option<u64> {
        let (high, low) = self.0.split_at(24);
        if high.iter().any(|&b| b != 0) {
            return None;
        }
        let mut le = [0u8; 8];
        le.copy_from_slice(low);
        Some(u64::from_be_bytes(le))
    }

    /// Returns the value as `usize`, or `None` if it does not fit.
    #[must_use]
    pub fn to_usize(self) -> Option<usize> {
        self.to_u64().and_then(|v| usize::try_from(v).ok())
    }

    /// Builds a word holding an address in its low 20 bytes.
    #[must_use]
    pub const fn from_address(a: Address) -> Self {
        let mut b = [0u8; 32];
        let mut i = 0;
        while i < 20 {
            b[12 + i] = a.0[i];
            i += 1;
        }
        Self(b)
    }

    /// Returns the address held in the low 20 bytes.
    ///
    /// Upper bytes are ignored: any bit pattern is a valid address operand.
    #[must_use]
    pub fn to_address(self) -> Address {
        let mut a = [0u8; 20];
        a.copy_from_slice(&self.0[12..]);
        Address(a)
    }

    /// Builds a canonical boolean word.
    #[must_use]
    pub const fn from_bool(v: bool) -> Self {
        Self::from_u64(v as u64)
    }

    /// Interprets the word as a canonical boolean.
    ///
    /// Returns `None` for any word other than `0` or `1`.
    #[must_use]
    pub fn to_bool(self) -> Option<bool> {
        match self.to_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        }
    }

    /// Returns the big-endian bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({self})")
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Minimal hex, no leading zero digits.
        let first = self.0.iter().position(|&b| b != 0);
        match first {
            None => write!(f, "0x0"),
            Some(i) => {
                write!(f, "0x{:x}", self.0[i])?;
                for &b in &self.0[i + 1..] {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<u64> for Word {
    fn from(v: u64) -> Self {
        Self::from_u64(v)
    }
}

impl From<Address> for Word {
    fn from(a: Address) -> Self {
        Self::from_address(a)
    }
}

/// A 20-byte account address.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0; 20]);

    /// Builds an address from a `u64` in its low bytes.
    #[must_use]
    pub const fn from_low_u64(v: u64) -> Self {
        let mut b = [0u8; 20];
        let be = v.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            b[12 + i] = be[i];
            i += 1;
        }
        Self(b)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for &b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// A bounds-checked reader over an operand buffer, addressed by word slot.
#[derive(Clone, Copy, Debug)]
pub struct WordReader<'a> {
    bytes: &'a [u8],
}

impl<'a> WordReader<'a> {
    /// Creates a reader over `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Returns the underlying buffer length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reads the head word at `slot`.
    pub fn word(&self, slot: usize) -> Result<Word, DecodeError> {
        let start = slot.checked_mul(WORD).ok_or(DecodeError::OutOfBounds)?;
        let end = start.checked_add(WORD).ok_or(DecodeError::OutOfBounds)?;
        let b = self
            .bytes
            .get(start..end)
            .ok_or(DecodeError::UnexpectedEof)?;
        let mut w = [0u8; 32];
        w.copy_from_slice(b);
        Ok(Word(w))
    }

    /// Reads the head word at `slot` as an address.
    pub fn address(&self, slot: usize) -> Result<Address, DecodeError> {
        Ok(self.word(slot)?.to_address())
    }

    /// Reads the head word at `slot` as a canonical boolean.
    pub fn bool_flag(&self, slot: usize) -> Result<bool, DecodeError> {
        self.word(slot)?.to_bool().ok_or(DecodeError::InvalidBool)
    }

    /// Follows the tail-offset word at `slot` and returns a reader rooted at
    /// the referenced byte offset.
    ///
    /// Offsets inside a dynamic struct are relative to the struct's own start,
    /// so nesting is expressed by taking sub-readers of sub-readers.
    pub fn subreader(&self, slot: usize) -> Result<WordReader<'a>, DecodeError> {
        let off = self
            .word(slot)?
            .to_usize()
            .ok_or(DecodeError::OutOfBounds)?;
        let rest = self.bytes.get(off..).ok_or(DecodeError::OutOfBounds)?;
        Ok(WordReader::new(rest))
    }

    /// Reads a length-prefixed byte string starting at slot 0 of this reader.
    pub fn length_prefixed_bytes(&self) -> Result<&'a [u8], DecodeError> {
        let len = self
            .word(0)?
            .to_usize()
            .ok_or(DecodeError::OutOfBounds)?;
        let end = WORD.checked_add(len).ok_or(DecodeError::OutOfBounds)?;
        self.bytes.get(WORD..end).ok_or(DecodeError::UnexpectedEof)
    }

    /// Reads a length-prefixed address sequence starting at slot 0.
    pub fn length_prefixed_addresses(&self) -> Result<Vec<Address>, DecodeError> {
        let n = self
            .word(0)?
            .to_usize()
            .ok_or(DecodeError::OutOfBounds)?;
        let mut out = Vec::with_capacity(n.min(self.len() / WORD));
        for i in 0..n {
            let slot = i.checked_add(1).ok_or(DecodeError::OutOfBounds)?;
            out.push(self.address(slot)?);
        }
        Ok(out)
    }

    /// Reads the byte-string tail referenced by the offset word at `slot`.
    pub fn bytes_tail(&self, slot: usize) -> Result<&'a [u8], DecodeError> {
        self.subreader(slot)?.length_prefixed_bytes()
    }

    /// Reads the address-sequence tail referenced by the offset word at `slot`.
    pub fn address_tail(&self, slot: usize) -> Result<Vec<Address>, DecodeError> {
        self.subreader(slot)?.length_prefixed_addresses()
    }
}

/// A canonical operand-buffer writer.
///
/// The writer appends whole words; dynamic tails are written with explicit
/// length prefixes and zero padding to the word boundary.
#[derive(Clone, Debug, Default)]
pub struct WordWriter {
    bytes: Vec<u8>,
}

impl WordWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Returns a reference to the written bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the writer and returns the buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Appends a word.
    pub fn write_word(&mut self, w: Word) {
        self.bytes.extend_from_slice(&w.0);
    }

    /// Appends an address, zero-extended to a word.
    pub fn write_address(&mut self, a: Address) {
        self.write_word(Word::from_address(a));
    }

    /// Appends a canonical boolean word.
    pub fn write_bool(&mut self, v: bool) {
        self.write_word(Word::from_bool(v));
    }

    /// Appends a tail-offset word (a byte offset into the buffer).
    pub fn write_offset(&mut self, byte_offset: usize) {
        self.write_word(Word::from_u64(byte_offset as u64));
    }

    /// Appends a length-prefixed byte string, zero-padded to the word boundary.
    pub fn write_length_prefixed_bytes(&mut self, b: &[u8]) {
        self.write_word(Word::from_u64(b.len() as u64));
        self.bytes.extend_from_slice(b);
        let rem = b.len() % WORD;
        if rem != 0 {
            for _ in rem..WORD {
                self.bytes.push(0);
            }
        }
    }

    /// Appends a length-prefixed address sequence.
    pub fn write_length_prefixed_addresses(&mut self, addrs: &[Address]) {
        self.write_word(Word::from_u64(addrs.len() as u64));
        for &a in addrs {
            self.write_address(a);
        }
    }
}

/// Returns the encoded size of a length-prefixed byte string tail.
#[must_use]
pub fn padded_bytes_len(len: usize) -> usize {
    WORD + len.div_ceil(WORD) * WORD
}
