// 512-bit ChaCha state as seen on the engine ports.
//
// Word `i` occupies bits [(15-i)*32, (15-i)*32+32) of the packed value,
// so word 0 is the most significant one and comes first in byte form.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::chacha_error::ChaChaError;
use crate::chacha_params::{STATE_BYTES, STATE_WORDS};

/// Sixteen 32-bit words; the all-zero value doubles as the register reset value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChaChaState(pub [u32; STATE_WORDS]);

impl ChaChaState {
    pub const ZERO: ChaChaState = ChaChaState([0; STATE_WORDS]);

    #[inline(always)]
    pub const fn from_words(words: [u32; STATE_WORDS]) -> Self {
        Self(words)
    }

    #[inline(always)]
    pub const fn words(&self) -> [u32; STATE_WORDS] {
        self.0
    }

    /// `[0, 1, ..., 15]`
    pub fn counting() -> Self {
        let mut words = [0u32; STATE_WORDS];
        for (i, w) in words.iter_mut().enumerate() {
            *w = i as u32;
        }
        Self(words)
    }

    /// Packed 512-bit big-endian form.
    pub fn to_bytes(&self) -> [u8; STATE_BYTES] {
        let mut out = [0u8; STATE_BYTES];
        for (chunk, w) in out.chunks_exact_mut(4).zip(self.0.iter()) {
            chunk.copy_from_slice(&w.to_be_bytes());
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ChaChaError> {
        if bytes.len() != STATE_BYTES {
            return Err(ChaChaError::StateLength(bytes.len()));
        }
        let mut words = [0u32; STATE_WORDS];
        for (w, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *w = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(Self(words))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(s: &str) -> Result<Self, ChaChaError> {
        let bytes = hex::decode(s.trim())?;
        Self::from_bytes(&bytes)
    }
}

impl From<[u32; STATE_WORDS]> for ChaChaState {
    fn from(words: [u32; STATE_WORDS]) -> Self {
        Self(words)
    }
}

impl From<ChaChaState> for [u32; STATE_WORDS] {
    fn from(s: ChaChaState) -> Self {
        s.0
    }
}

impl Index<usize> for ChaChaState {
    type Output = u32;

    #[inline(always)]
    fn index(&self, idx: usize) -> &u32 {
        &self.0[idx]
    }
}

impl IndexMut<usize> for ChaChaState {
    #[inline(always)]
    fn index_mut(&mut self, idx: usize) -> &mut u32 {
        &mut self.0[idx]
    }
}

impl fmt::Display for ChaChaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_zero_is_most_significant() {
        let mut s = ChaChaState::ZERO;
        s[0] = 0xDEAD_BEEF;
        s[15] = 0x0000_0001;

        let bytes = s.to_bytes();
        assert_eq!(&bytes[..4], &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(&bytes[60..], &[0, 0, 0, 1]);

        let hex = s.to_hex();
        assert!(hex.starts_with("deadbeef"));
        assert!(hex.ends_with("00000001"));
        assert_eq!(hex.len(), 128);
    }

    #[test]
    fn hex_parsing_accepts_packed_form() {
        let s = ChaChaState::counting();
        assert_eq!(ChaChaState::from_hex(&s.to_string()), Ok(s));
        assert_eq!(
            ChaChaState::from_hex(&format!("  {}\n", s.to_hex().to_uppercase())),
            Ok(s)
        );
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert_eq!(ChaChaState::from_bytes(&[0u8; 63]), Err(ChaChaError::StateLength(63)));
        assert_eq!(ChaChaState::from_hex("00ff"), Err(ChaChaError::StateLength(2)));
        assert!(matches!(ChaChaState::from_hex("zz"), Err(ChaChaError::Hex(_))));
    }
}
