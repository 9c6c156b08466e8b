#![allow(unused_imports, dead_code)]

use std::{ fs, io::Write };
use qinfo_rand::{
    circuit::unitarity_error,
    rng::rng_from_seed,
    RandomClifford,
};
use rustc_hash::FxHashMap;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn card_cn(n: usize) -> u128 {
    (1..=n).map(|k| 2_u128 * 4_u128.pow(k as u32) * (4_u128.pow(k as u32) - 1))
        .product()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    const N: usize = 2;
    const MC: usize = 1_000_000;
    let seed: Option<u64> = std::env::args().nth(1).and_then(|s| s.parse().ok());
    println!("|C{}| = {}", N, card_cn(N));
    let mut rng = rng_from_seed(seed);

    let mut counts: FxHashMap<u64, usize> = FxHashMap::default();
    let mut elems: Vec<RandomClifford> = Vec::new();
    let mut max_err: f64 = 0.0;
    eprint!("\r 0 / {} ", MC);
    for k in 0..MC {
        eprint!("\r {} / {} ", k + 1, MC);
        let cliff = RandomClifford::sample(N, &mut rng).unwrap();
        let count = counts.entry(cliff.fingerprint()).or_insert(0);
        if *count == 0 {
            max_err = max_err.max(unitarity_error(&cliff.unitary().unwrap()));
            elems.push(cliff);
        }
        *count += 1;
    }
    eprintln!();
    eprintln!("{} unique elements found from {} draws", counts.len(), MC);
    info!(max_unitarity_error = max_err, "checked unique elements");

    // chi-square against the uniform distribution over the unique elements
    let expected = MC as f64 / card_cn(N) as f64;
    let unseen = card_cn(N).saturating_sub(counts.len() as u128) as f64;
    let chi2: f64
        = counts.values()
        .map(|c| (*c as f64 - expected).powi(2) / expected)
        .sum::<f64>()
        + unseen * expected;
    eprintln!("chi^2 = {:.3} with {} degrees of freedom", chi2, card_cn(N) - 1);

    {
        let mut out
            = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open("cliffords.txt")
            .unwrap();
        for elem in elems.into_iter() {
            let layers: Vec<String>
                = elem.layers().iter().map(|l| l.to_string()).collect();
            writeln!(out, "{}", layers.join(" ; ")).unwrap();
        }
    }
}
