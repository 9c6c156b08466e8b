//! Sampling from the quantum Mallows distribution.
//!
//! A draw is a pair (*h*, *σ*) of a Hadamard layer *h* ∈ {0, 1}<sup>*n*</sup>
//! and a permutation *σ* of *n* qubits. Together with the free parameters of
//! the two Hadamard-free layers (see [`crate::tableau`]), sampling (*h*, *σ*)
//! from this distribution yields a uniformly random element of the *n*-qubit
//! Clifford group. See [arXiv:2003.09412][bravyi-maslov] for details.
//!
//! [bravyi-maslov]: https://arxiv.org/abs/2003.09412

use crate::{
    error::{ SampleError, SampleResult },
    rng::RandomSource,
};

/// A single draw from the quantum Mallows distribution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MallowsSample {
    /// `hadamard[k]` is `true` if qubit `k` is conjugated by a Hadamard.
    pub hadamard: Vec<bool>,
    /// Permutation of qubit indices; `permutation[k]` is the image of `k`.
    pub permutation: Vec<usize>,
}

impl MallowsSample {
    /// Number of qubits.
    pub fn n(&self) -> usize { self.hadamard.len() }
}

/// Draw a Hadamard layer and qubit permutation for `n` qubits.
///
/// Fails if the random source produces a real number outside [0, 1).
pub fn sample<S>(n: usize, rng: &mut S) -> SampleResult<MallowsSample>
where S: RandomSource + ?Sized
{
    let mut hadamard: Vec<bool> = vec![false; n];
    let mut permutation: Vec<usize> = vec![0; n];
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut r: f64;
    let mut idx: usize;
    let mut k: usize;
    for (i, (hi, pi)) in hadamard.iter_mut().zip(permutation.iter_mut()).enumerate() {
        let m = n - i;
        r = rng.uniform_real()?;
        if !(0.0..1.0).contains(&r) {
            return Err(SampleError::RandomSource(
                format!("uniform draw {} outside [0, 1)", r)));
        }
        idx = mallows_index(r, m);
        *hi = idx < m;
        k = if idx < m { idx } else { 2 * m - idx - 1 };
        *pi = remaining.remove(k);
    }
    Ok(MallowsSample { hadamard, permutation })
}

// idx = -ceil(log2(r + (1 - r) 4^-m)), confined to 0..2m
//
// r = 0 lands exactly on the lower boundary (or on log2(0) once 4^-m
// underflows), which would push idx to 2m; the top value is clamped to 2m - 1
fn mallows_index(r: f64, m: usize) -> usize {
    let eps = 0.25_f64.powi(m.min(i32::MAX as usize) as i32);
    let x = r + (1.0 - r) * eps;
    let top = 2 * m - 1;
    if x <= 0.0 { return top; }
    let e = -x.log2().ceil();
    if e <= 0.0 { 0 } else { (e as usize).min(top) }
}
