// Combinational ChaCha blocks: quarter-round, double-round, rounds finish.
// All of them are pure state -> state functions (one "cycle" of logic).

use crate::chacha_params::STATE_WORDS;
use crate::chacha_state::ChaChaState;

/// Left bit-rotation of a 32-bit word, `0 < k < 32`.
#[inline(always)]
pub fn rotl32(x: u32, k: u32) -> u32 {
    debug_assert!(k > 0 && k < 32);
    x.rotate_left(k)
}

// ------------------------------
// Quarter-round
// ------------------------------

/// Quarter-round wired to four word indices of the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuarterRound {
    a: usize,
    b: usize,
    c: usize,
    d: usize,
}

impl QuarterRound {
    /// Panics on out-of-range or repeated indices; used in consts this fails the build.
    pub const fn new(a: usize, b: usize, c: usize, d: usize) -> Self {
        assert!(
            a < STATE_WORDS && b < STATE_WORDS && c < STATE_WORDS && d < STATE_WORDS,
            "invalid quarter-round parameters"
        );
        assert!(
            a != b && a != c && a != d && b != c && b != d && c != d,
            "quarter-round indices must be distinct"
        );
        Self { a, b, c, d }
    }

    pub const fn indices(&self) -> (usize, usize, usize, usize) {
        (self.a, self.b, self.c, self.d)
    }

    #[inline(always)]
    pub fn apply(&self, st: ChaChaState) -> ChaChaState {
        let (a, b, c, d) = (self.a, self.b, self.c, self.d);

        let a1 = st[a].wrapping_add(st[b]);
        let d1 = rotl32(st[d] ^ a1, 16);

        let c1 = st[c].wrapping_add(d1);
        let b1 = rotl32(st[b] ^ c1, 12);

        let a2 = a1.wrapping_add(b1);
        let d2 = rotl32(d1 ^ a2, 8);

        let c2 = c1.wrapping_add(d2);
        let b2 = rotl32(b1 ^ c2, 7);

        let mut out = st;
        out[a] = a2;
        out[b] = b2;
        out[c] = c2;
        out[d] = d2;
        out
    }
}

#[inline(always)]
pub fn quarter_round(st: ChaChaState, a: usize, b: usize, c: usize, d: usize) -> ChaChaState {
    QuarterRound::new(a, b, c, d).apply(st)
}

// ------------------------------
// Double-round
// ------------------------------

pub const COLUMN_ROUND: [QuarterRound; 4] = [
    QuarterRound::new(0, 4, 8, 12),
    QuarterRound::new(1, 5, 9, 13),
    QuarterRound::new(2, 6, 10, 14),
    QuarterRound::new(3, 7, 11, 15),
];

pub const DIAGONAL_ROUND: [QuarterRound; 4] = [
    QuarterRound::new(0, 5, 10, 15),
    QuarterRound::new(1, 6, 11, 12),
    QuarterRound::new(2, 7, 8, 13),
    QuarterRound::new(3, 4, 9, 14),
];

/// Columns then diagonals; order matters.
pub const DOUBLE_ROUND: [QuarterRound; 8] = [
    COLUMN_ROUND[0],
    COLUMN_ROUND[1],
    COLUMN_ROUND[2],
    COLUMN_ROUND[3],
    DIAGONAL_ROUND[0],
    DIAGONAL_ROUND[1],
    DIAGONAL_ROUND[2],
    DIAGONAL_ROUND[3],
];

#[inline(always)]
pub fn double_round(st: ChaChaState) -> ChaChaState {
    DOUBLE_ROUND.iter().fold(st, |s, qr| qr.apply(s))
}

// ------------------------------
// Rounds finish
// ------------------------------

/// Word-wise `mixed + original mod 2^32`, no carry between words.
#[inline(always)]
pub fn rounds_finish(mixed: ChaChaState, original: ChaChaState) -> ChaChaState {
    let mut out = ChaChaState::ZERO;
    for i in 0..STATE_WORDS {
        out[i] = mixed[i].wrapping_add(original[i]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeated_1234() -> ChaChaState {
        let mut s = ChaChaState::ZERO;
        for i in 0..STATE_WORDS {
            s[i] = (i % 4) as u32 + 1;
        }
        s
    }

    #[test]
    fn rotl32_wraps_high_bits() {
        assert_eq!(rotl32(0x8000_0001, 1), 0x0000_0003);
        assert_eq!(rotl32(0x1234_5678, 16), 0x5678_1234);
        assert_eq!(rotl32(0xF000_0000, 4), 0x0000_000F);
    }

    #[test]
    fn quarter_round_of_zero_is_zero() {
        for qr in DOUBLE_ROUND {
            assert_eq!(qr.apply(ChaChaState::ZERO), ChaChaState::ZERO);
        }
    }

    #[test]
    fn quarter_round_known_vector() {
        let out = quarter_round(repeated_1234(), 0, 4, 8, 12);

        let mut expected = repeated_1234();
        expected[0] = 0x3000_0002;
        expected[4] = 0x8181_1899;
        expected[8] = 0x0303_0231;
        expected[12] = 0x0300_0230;
        assert_eq!(out, expected);
    }

    #[test]
    fn quarter_round_leaves_other_words_alone() {
        let input = ChaChaState::counting();
        let out = quarter_round(input, 2, 7, 8, 13);
        for i in (0..STATE_WORDS).filter(|i| ![2, 7, 8, 13].contains(i)) {
            assert_eq!(out[i], input[i], "word {i} changed");
        }
        assert_ne!(out, input);
    }

    #[test]
    #[should_panic(expected = "invalid quarter-round parameters")]
    fn quarter_round_rejects_out_of_range_index() {
        let _ = QuarterRound::new(0, 4, 8, 16);
    }

    #[test]
    #[should_panic(expected = "quarter-round indices must be distinct")]
    fn quarter_round_rejects_repeated_index() {
        let _ = QuarterRound::new(0, 4, 4, 12);
    }

    #[test]
    fn double_round_known_vector() {
        let expected = ChaChaState::from_words([
            0xA9295C6A, 0xB471BE7A, 0x38E65EC4, 0x74348B87,
            0xF1AD76C6, 0x7B44627B, 0x946682B0, 0xF12F4910,
            0xD7E22F80, 0x3232DDD4, 0xB5B3B74D, 0xC0240444,
            0xC8A5DE45, 0xE417E1D3, 0x1A392478, 0x983C4EBF,
        ]);
        assert_eq!(double_round(ChaChaState::counting()), expected);
    }

    #[test]
    fn rounds_finish_has_no_cross_word_carry() {
        // a packed 512-bit add would carry word 1 into word 0
        let mut mixed = ChaChaState::ZERO;
        let mut original = ChaChaState::ZERO;
        mixed[1] = 0xFFFF_FFFF;
        original[1] = 0x0000_0001;
        mixed[15] = 0x8000_0000;
        original[15] = 0x8000_0000;

        let out = rounds_finish(mixed, original);
        assert_eq!(out, ChaChaState::ZERO);
    }

    #[test]
    fn rounds_finish_adds_each_word() {
        let out = rounds_finish(ChaChaState::counting(), ChaChaState::counting());
        for i in 0..STATE_WORDS {
            assert_eq!(out[i], 2 * i as u32);
        }
    }
}
