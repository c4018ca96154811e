pub mod chacha_params;
pub mod chacha_error;
pub mod chacha_state;

pub mod chacha_arith;
pub mod chacha_rounds;

pub mod chacha_reference;

pub use chacha_error::ChaChaError;
pub use chacha_params::{ChaChaConfig, Rounds};
pub use chacha_rounds::{Permutation, RoundsIn, RoundsOut, StagedChaChaRounds};
pub use chacha_state::ChaChaState;
