// Runs the staged engine for every configuration, counts cycles and checks
// the result against the software reference.
//  - counting vector [0..15] (the known-answer input)
//  - one random state from OS entropy

use std::process::ExitCode;

use chacha_staged::chacha_reference;
use chacha_staged::{ChaChaConfig, ChaChaState, StagedChaChaRounds};

fn random_state() -> Result<ChaChaState, getrandom::Error> {
    let mut buf = [0u8; 64];
    getrandom::getrandom(&mut buf)?;
    // 64 bytes in, cannot fail on length
    Ok(ChaChaState::from_bytes(&buf).unwrap_or_default())
}

fn check(cfg: ChaChaConfig, label: &str, input: ChaChaState) -> bool {
    let mut engine = StagedChaChaRounds::from_config(cfg);
    let p = engine.permute(input);
    let expected = ChaChaState::from_words(chacha_reference::chacha(input.words(), cfg.rounds()));

    let name = cfg.to_string();
    let ok = p.state == expected && p.cycles == cfg.total_stages() as u64;
    if ok {
        println!("OK:   {name:<16} {label:<8} cycles = {}", p.cycles);
    } else {
        println!("FAIL: {name:<16} {label:<8} cycles = {} (expected {})", p.cycles, cfg.total_stages());
        println!("  in  = {}", hex::encode(input.to_bytes()));
        println!("  hw  = {}", hex::encode(p.state.to_bytes()));
        println!("  ref = {}", hex::encode(expected.to_bytes()));
    }
    ok
}

fn main() -> ExitCode {
    let rnd = match random_state() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("getrandom failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Cicluri numarate (staged ChaCha vs reference)");
    let mut failures = 0usize;

    for cfg in ChaChaConfig::all() {
        if !check(cfg, "counting", ChaChaState::counting()) {
            failures += 1;
        }
        if !check(cfg, "random", rnd) {
            failures += 1;
        }
    }

    if failures == 0 {
        println!("\nDONE.");
        ExitCode::SUCCESS
    } else {
        println!("\n{failures} mismatches");
        ExitCode::FAILURE
    }
}
