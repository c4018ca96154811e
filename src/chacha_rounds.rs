// Multi-cycle staged ChaCha rounds.
//
// Each clock cycle runs `rounds_per_cycle / 2` chained double-round units;
// after `n_rounds / rounds_per_cycle` cycles the finish adder folds the
// original state back in and `done` is raised.

use log::{debug, trace};
use rhdl::prelude::*;

use crate::chacha_arith::{double_round, rounds_finish};
use crate::chacha_error::ChaChaError;
use crate::chacha_params::{ChaChaConfig, Rounds};
use crate::chacha_state::ChaChaState;

/// Stage counter register (0..total_stages, at most 10).
pub type Stage = Bits<U8>;

#[inline(always)]
fn stage(x: u32) -> Stage {
    bits(x as u128)
}

// ------------------------------
// Ports + registers
// ------------------------------

/// Inputs sampled every cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundsIn {
    pub enabled: bool,
    pub state: ChaChaState,
}

/// Combinational outputs, valid during the cycle they are returned for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundsOut {
    pub done: bool,
    /// Finished state while `done`, zero otherwise.
    pub state: ChaChaState,
}

/// Register file of the engine; `Default` is the reset value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoundsState {
    pub stage: Stage,
    /// Output of the last completed stage (post double-rounds, pre finish).
    pub intermediate: ChaChaState,
    /// Pre-rounds state latched at stage 0.
    pub previous: ChaChaState,
}

// ------------------------------
// Per-cycle logic
// ------------------------------

/// Double-round units wired output-to-input for one stage.
#[inline(always)]
pub fn rounds_pipeline(cfg: &ChaChaConfig, st: ChaChaState) -> ChaChaState {
    (0..cfg.double_rounds_per_cycle()).fold(st, |s, _| double_round(s))
}

/// One-cycle step of the staged rounds.
///
/// Returns the register contents after the clock edge together with the
/// outputs seen during this cycle. With `enabled` low every register holds.
pub fn rounds_step(cfg: &ChaChaConfig, st: RoundsState, inp: RoundsIn) -> (RoundsState, RoundsOut) {
    let mut ns = st;
    let mut out = RoundsOut::default();

    let cur = st.stage.raw() as u32;
    let is_first_stage = cur == 0;
    let is_last_stage = cur == cfg.total_stages() - 1;

    let pipe_in = if is_first_stage { inp.state } else { st.intermediate };
    let pipe_out = rounds_pipeline(cfg, pipe_in);

    // At stage 0 `previous` is only being written on this edge, so the
    // finish adder takes the input directly (single-stage configurations).
    let original = if is_first_stage { inp.state } else { st.previous };

    out.done = is_last_stage;
    if is_last_stage {
        out.state = rounds_finish(pipe_out, original);
    }

    if inp.enabled {
        if is_first_stage {
            ns.previous = inp.state;
        }
        if !is_last_stage {
            ns.intermediate = pipe_out;
            ns.stage = stage(cur + 1);
        }
    }

    (ns, out)
}

// ------------------------------
// Engine
// ------------------------------

/// Result of driving one permutation to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Permutation {
    pub state: ChaChaState,
    /// Active cycles until `done`, including the cycle it was raised in.
    pub cycles: u64,
}

/// Staged ChaCha rounds engine: a fixed configuration plus its registers.
///
/// There is no busy guard: while the counter sits at stage 0 every enabled
/// cycle (re)starts a run with the presented input, and inputs presented
/// mid-run are ignored. The terminal stage holds until [`reset`](Self::reset).
#[derive(Clone, Debug)]
pub struct StagedChaChaRounds {
    config: ChaChaConfig,
    regs: RoundsState,
    cycles: u64,
}

impl StagedChaChaRounds {
    pub fn new(rounds: Rounds, rounds_per_cycle: u32) -> Result<Self, ChaChaError> {
        let config = ChaChaConfig::new(rounds, rounds_per_cycle)?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: ChaChaConfig) -> Self {
        debug!(
            "staged rounds: {} rounds, {} per cycle, {} stages",
            config.n_rounds(),
            config.rounds_per_cycle(),
            config.total_stages()
        );
        Self {
            config,
            regs: RoundsState::default(),
            cycles: 0,
        }
    }

    pub fn config(&self) -> &ChaChaConfig {
        &self.config
    }

    pub fn registers(&self) -> &RoundsState {
        &self.regs
    }

    pub fn stage(&self) -> u32 {
        self.regs.stage.raw() as u32
    }

    pub fn done(&self) -> bool {
        self.stage() == self.config.total_stages() - 1
    }

    /// Enabled cycles since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Synchronous reset: all registers back to zero.
    pub fn reset(&mut self) {
        debug!("staged rounds reset at stage {}", self.stage());
        self.regs = RoundsState::default();
        self.cycles = 0;
    }

    /// One clock tick.
    pub fn advance(&mut self, inp: RoundsIn) -> RoundsOut {
        let (ns, out) = rounds_step(&self.config, self.regs, inp);

        trace!(
            "cycle {}: stage {} -> {}, enabled={}, done={}",
            self.cycles,
            self.stage(),
            ns.stage.raw(),
            inp.enabled,
            out.done
        );

        if inp.enabled {
            self.cycles += 1;
        }
        self.regs = ns;
        out
    }

    /// Reset, then hold `enabled` with `state` on the input until `done`.
    pub fn permute(&mut self, state: ChaChaState) -> Permutation {
        self.reset();
        let inp = RoundsIn { enabled: true, state };

        loop {
            let out = self.advance(inp);
            debug_assert!(self.cycles <= self.config.total_stages() as u64);

            if out.done {
                debug!("permutation done after {} cycles", self.cycles);
                return Permutation {
                    state: out.state,
                    cycles: self.cycles,
                };
            }
        }
    }
}
