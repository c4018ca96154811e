// ChaCha permutation parameters + validated engine configuration.

use std::fmt;
use std::str::FromStr;

use crate::chacha_error::ChaChaError;

/// Amount of 32-bit words in the ChaCha state.
pub const STATE_WORDS: usize = 16;
/// Bit size of a state word.
pub const WORD_SIZE: usize = 32;
/// Packed state size (512 bits).
pub const STATE_BYTES: usize = STATE_WORDS * WORD_SIZE / 8;

/// Round counts of the standard ChaCha variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rounds {
    Reduced8,
    Reduced12,
    #[default]
    Full20,
}

impl Rounds {
    pub const ALL: [Rounds; 3] = [Rounds::Reduced8, Rounds::Reduced12, Rounds::Full20];

    #[inline(always)]
    pub const fn n_rounds(self) -> u32 {
        match self {
            Rounds::Reduced8 => 8,
            Rounds::Reduced12 => 12,
            Rounds::Full20 => 20,
        }
    }
}

impl fmt::Display for Rounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.n_rounds())
    }
}

impl TryFrom<u32> for Rounds {
    type Error = ChaChaError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        match n {
            8 => Ok(Rounds::Reduced8),
            12 => Ok(Rounds::Reduced12),
            20 => Ok(Rounds::Full20),
            _ => Err(ChaChaError::InvalidRounds(n)),
        }
    }
}

impl FromStr for Rounds {
    type Err = ChaChaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "8" => Ok(Rounds::Reduced8),
            "12" => Ok(Rounds::Reduced12),
            "20" => Ok(Rounds::Full20),
            _ => Err(ChaChaError::UnknownRounds(s.to_owned())),
        }
    }
}

// ------------------------------
// Engine configuration
// ------------------------------

/// Construction-time configuration of the staged engine.
///
/// Only obtainable through [`ChaChaConfig::new`], so every value in
/// circulation satisfies `0 < rounds_per_cycle <= n_rounds`,
/// `n_rounds % rounds_per_cycle == 0` and `rounds_per_cycle % 2 == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChaChaConfig {
    rounds: Rounds,
    rounds_per_cycle: u32,
    total_stages: u32,
}

impl ChaChaConfig {
    pub fn new(rounds: Rounds, rounds_per_cycle: u32) -> Result<Self, ChaChaError> {
        let n_rounds = rounds.n_rounds();

        if rounds_per_cycle == 0 || rounds_per_cycle > n_rounds {
            return Err(ChaChaError::RoundsPerCycleOutOfRange { n_rounds, rounds_per_cycle });
        }
        if n_rounds % rounds_per_cycle != 0 {
            return Err(ChaChaError::RoundsPerCycleNotDivisor { n_rounds, rounds_per_cycle });
        }
        if rounds_per_cycle % 2 != 0 {
            return Err(ChaChaError::RoundsPerCycleOdd(rounds_per_cycle));
        }

        Ok(Self {
            rounds,
            rounds_per_cycle,
            total_stages: n_rounds / rounds_per_cycle,
        })
    }

    /// Every valid `(rounds, rounds_per_cycle)` pair, smallest pipeline first.
    pub fn all() -> Vec<ChaChaConfig> {
        Rounds::ALL
            .iter()
            .flat_map(|&rounds| {
                (2..=rounds.n_rounds())
                    .step_by(2)
                    .filter_map(move |rpc| ChaChaConfig::new(rounds, rpc).ok())
            })
            .collect()
    }

    pub fn rounds(&self) -> Rounds {
        self.rounds
    }

    pub fn n_rounds(&self) -> u32 {
        self.rounds.n_rounds()
    }

    pub fn rounds_per_cycle(&self) -> u32 {
        self.rounds_per_cycle
    }

    /// Double-round units chained inside one stage.
    pub fn double_rounds_per_cycle(&self) -> u32 {
        self.rounds_per_cycle / 2
    }

    /// Clock cycles needed for one permutation.
    pub fn total_stages(&self) -> u32 {
        self.total_stages
    }
}

impl Default for ChaChaConfig {
    fn default() -> Self {
        Self {
            rounds: Rounds::Full20,
            rounds_per_cycle: 2,
            total_stages: 10,
        }
    }
}

impl fmt::Display for ChaChaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChaCha{}/{} rpc", self.rounds, self.rounds_per_cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_parse_and_print_as_numbers() {
        for r in Rounds::ALL {
            assert_eq!(r.to_string().parse::<Rounds>(), Ok(r));
            assert_eq!(Rounds::try_from(r.n_rounds()), Ok(r));
        }
        assert_eq!(
            "16".parse::<Rounds>(),
            Err(ChaChaError::UnknownRounds("16".into()))
        );
        assert_eq!(Rounds::try_from(10), Err(ChaChaError::InvalidRounds(10)));
    }

    #[test]
    fn config_derives_stage_count() {
        let cfg = ChaChaConfig::new(Rounds::Full20, 4).unwrap();
        assert_eq!(cfg.total_stages(), 5);
        assert_eq!(cfg.double_rounds_per_cycle(), 2);
        assert_eq!(cfg.n_rounds(), 20);
        assert_eq!(ChaChaConfig::default(), ChaChaConfig::new(Rounds::Full20, 2).unwrap());
    }

    #[test]
    fn config_rejects_invalid_rounds_per_cycle() {
        assert_eq!(
            ChaChaConfig::new(Rounds::Reduced8, 0),
            Err(ChaChaError::RoundsPerCycleOutOfRange { n_rounds: 8, rounds_per_cycle: 0 })
        );
        assert_eq!(
            ChaChaConfig::new(Rounds::Reduced12, 24),
            Err(ChaChaError::RoundsPerCycleOutOfRange { n_rounds: 12, rounds_per_cycle: 24 })
        );
        assert_eq!(
            ChaChaConfig::new(Rounds::Full20, 6),
            Err(ChaChaError::RoundsPerCycleNotDivisor { n_rounds: 20, rounds_per_cycle: 6 })
        );
        // divides 20 but leaves a half double round
        assert_eq!(
            ChaChaConfig::new(Rounds::Full20, 5),
            Err(ChaChaError::RoundsPerCycleOdd(5))
        );
        assert_eq!(
            ChaChaConfig::new(Rounds::Reduced12, 3),
            Err(ChaChaError::RoundsPerCycleOdd(3))
        );
    }

    #[test]
    fn all_lists_every_even_divisor() {
        let pairs: Vec<(u32, u32)> = ChaChaConfig::all()
            .iter()
            .map(|c| (c.n_rounds(), c.rounds_per_cycle()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (8, 2), (8, 4), (8, 8),
                (12, 2), (12, 4), (12, 6), (12, 12),
                (20, 2), (20, 4), (20, 10), (20, 20),
            ]
        );
    }
}
