//! Errors raised while configuring the staged engine or decoding states.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ChaChaError {
    /// Round count outside {8, 12, 20}.
    InvalidRounds(u32),
    /// Textual round count that does not name a ChaCha variant.
    UnknownRounds(String),
    /// Rounds per cycle not in `1..=n_rounds`.
    RoundsPerCycleOutOfRange { n_rounds: u32, rounds_per_cycle: u32 },
    RoundsPerCycleNotDivisor { n_rounds: u32, rounds_per_cycle: u32 },
    RoundsPerCycleOdd(u32),
    /// Packed state that is not exactly 64 bytes long.
    StateLength(usize),
    Hex(hex::FromHexError),
}

impl fmt::Display for ChaChaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChaChaError::InvalidRounds(n) => {
                write!(f, "invalid round count {n}, expected 8, 12 or 20")
            }
            ChaChaError::UnknownRounds(s) => {
                write!(f, "invalid round count {s:?}, expected \"8\", \"12\" or \"20\"")
            }
            ChaChaError::RoundsPerCycleOutOfRange { n_rounds, rounds_per_cycle } => write!(
                f,
                "rounds per cycle {rounds_per_cycle} is not in range 1..={n_rounds}"
            ),
            ChaChaError::RoundsPerCycleNotDivisor { n_rounds, rounds_per_cycle } => write!(
                f,
                "round count {n_rounds} is not a multiple of rounds per cycle {rounds_per_cycle}"
            ),
            ChaChaError::RoundsPerCycleOdd(r) => {
                write!(f, "rounds per cycle {r} must be a multiple of 2")
            }
            ChaChaError::StateLength(len) => {
                write!(f, "ChaCha state must be 64 bytes, got {len}")
            }
            ChaChaError::Hex(e) => write!(f, "malformed hex state: {e}"),
        }
    }
}

impl std::error::Error for ChaChaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChaChaError::Hex(e) => Some(e),
            _ => None,
        }
    }
}

impl From<hex::FromHexError> for ChaChaError {
    fn from(e: hex::FromHexError) -> Self {
        ChaChaError::Hex(e)
    }
}
