// Prints a Markdown table with latency/throughput for every staged configuration.
// Cycle counts are measured by running the engine (include done-cycle).

use chacha_staged::chacha_params::STATE_BYTES;
use chacha_staged::{ChaChaConfig, ChaChaState, StagedChaChaRounds};

fn main() {
    let freqs_mhz = [100.0, 200.0, 250.0];

    let measured: Vec<(ChaChaConfig, f64)> = ChaChaConfig::all()
        .into_iter()
        .map(|cfg| {
            let p = StagedChaChaRounds::from_config(cfg).permute(ChaChaState::counting());
            (cfg, p.cycles as f64)
        })
        .collect();

    println!("Latency formula: T_us = cycles / F_MHz");
    println!("Throughput formula: MB/s = 64 * F_MHz / cycles");
    println!();
    println!("| Rounds | Rounds/cycle | Cycles | F (MHz) | Latency (us) | Throughput (MB/s) |");
    println!("|---|---|---|---|---|---|");

    for &f in &freqs_mhz {
        for (cfg, c) in &measured {
            let lat_us = c / f;
            let thr = STATE_BYTES as f64 * f / c;
            println!(
                "| {} | {} | {} | {} | {:.3} | {:.1} |",
                cfg.rounds(),
                cfg.rounds_per_cycle(),
                *c as u64,
                f as u64,
                lat_us,
                thr
            );
        }
    }
}
