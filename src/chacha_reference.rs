// Software reference model of the ChaCha rounds function.
// Straight-line, in-place, no staging; kept separate from chacha_arith so
// the staged engine is checked against an independent implementation.

use crate::chacha_params::Rounds;

fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]); state[d] = (state[d] ^ state[a]).rotate_left(16);
    state[c] = state[c].wrapping_add(state[d]); state[b] = (state[b] ^ state[c]).rotate_left(12);
    state[a] = state[a].wrapping_add(state[b]); state[d] = (state[d] ^ state[a]).rotate_left(8);
    state[c] = state[c].wrapping_add(state[d]); state[b] = (state[b] ^ state[c]).rotate_left(7);
}

/// One single round: columns when `is_odd == false`, diagonals otherwise.
pub fn single_round(state: &mut [u32; 16], is_odd: bool) {
    if is_odd {
        quarter_round(state, 0, 5, 10, 15);
        quarter_round(state, 1, 6, 11, 12);
        quarter_round(state, 2, 7, 8, 13);
        quarter_round(state, 3, 4, 9, 14);
    } else {
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 1, 5, 9, 13);
        quarter_round(state, 2, 6, 10, 14);
        quarter_round(state, 3, 7, 11, 15);
    }
}

pub fn double_round(state: &mut [u32; 16]) {
    single_round(state, false);
    single_round(state, true);
}

pub fn rounds_finish(mixed: &mut [u32; 16], old: &[u32; 16]) {
    for (m, o) in mixed.iter_mut().zip(old.iter()) {
        *m = m.wrapping_add(*o);
    }
}

/// Full ChaCha rounds function: `n_rounds` rounds, then add the input back in.
pub fn chacha(state: [u32; 16], rounds: Rounds) -> [u32; 16] {
    let mut working_state = state;

    for round in 0..rounds.n_rounds() {
        single_round(&mut working_state, round % 2 == 1);
    }

    rounds_finish(&mut working_state, &state);
    working_state
}
