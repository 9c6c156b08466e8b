//! Conversion of canonical-form parameters into an ordered list of gate
//! layers.
//!
//! The layers come out in the fixed order
//! ```text
//! CX(δ2) CZ(γ2) S(γ2)   X Y Z   SWAP   H   CX(δ1) CZ(γ1) S(γ1)
//! ```
//! (first applied on the left). Any layer with nothing to do is left out.

use itertools::Itertools;
use crate::{
    error::{ SampleError, SampleResult },
    gate::{ GateLayer, Pauli },
    gf2::BMat,
    mallows::MallowsSample,
    tableau::CanonicalForm,
};

/// CNOT pairs of a Hadamard-free layer.
///
/// Every `δ[t, c] = 1` below the diagonal (a 1 above the diagonal of `δᵀ`)
/// becomes a CNOT with control `c` and target `t`, ordered by control and then
/// target.
pub fn cnot_pairs(delta: &BMat) -> Vec<(usize, usize)> {
    let n = delta.nrows();
    (0..n).tuple_combinations::<(usize, usize)>()
        .filter(|&(c, t)| delta[(t, c)])
        .collect()
}

/// CZ pairs of a Hadamard-free layer, from the strict upper triangle of `γ`.
pub fn cz_pairs(gamma: &BMat) -> Vec<(usize, usize)> {
    let n = gamma.nrows();
    (0..n).tuple_combinations::<(usize, usize)>()
        .filter(|&(a, b)| gamma[(a, b)])
        .collect()
}

/// Phase gates of a Hadamard-free layer, from the diagonal of `γ`.
pub fn s_qubits(gamma: &BMat) -> Vec<usize> {
    gamma.diagonal().iter().positions(|b| *b).collect()
}

/// Swaps that move the qubit on wire `permutation[i]` onto wire `i` for every
/// `i`.
///
/// Each cycle of length *k* costs *k* − 1 swaps, so fixed points produce
/// nothing and every 2-cycle produces exactly one swap. Swaps are listed in
/// the order they must be applied.
pub fn swap_pairs(permutation: &[usize]) -> Vec<(usize, usize)> {
    let n = permutation.len();
    // wire_of[q] = wire currently holding original qubit q
    let mut wire_of: Vec<usize> = (0..n).collect();
    // on_wire[w] = original qubit currently on wire w
    let mut on_wire: Vec<usize> = (0..n).collect();
    let mut swaps: Vec<(usize, usize)> = Vec::new();
    for (i, &p) in permutation.iter().enumerate() {
        let w = wire_of[p];
        if w != i {
            swaps.push((i.min(w), i.max(w)));
            let q = on_wire[i];
            on_wire.swap(i, w);
            wire_of[p] = i;
            wire_of[q] = w;
        }
    }
    swaps
}

fn push_nonempty<T>(layers: &mut Vec<GateLayer>, items: Vec<T>, f: fn(Vec<T>) -> GateLayer) {
    if !items.is_empty() { layers.push(f(items)); }
}

fn hadamard_free_layers(layers: &mut Vec<GateLayer>, gamma: &BMat, delta: &BMat) {
    push_nonempty(layers, cnot_pairs(delta), GateLayer::CX);
    push_nonempty(layers, cz_pairs(gamma), GateLayer::CZ);
    push_nonempty(layers, s_qubits(gamma), GateLayer::S);
}

/// Decompose a sampled Clifford element into its ordered gate layers.
///
/// `phase` holds 2*n* bits; qubit `i` receives the Pauli correction decoded
/// from `(phase[i], phase[i + n])` by [`Pauli::from_phase_bits`].
///
/// Fails if the sizes of `mallows`, `form`, and `phase` disagree.
pub fn decompose(mallows: &MallowsSample, form: &CanonicalForm, phase: &[bool])
    -> SampleResult<Vec<GateLayer>>
{
    let n = mallows.n();
    if mallows.permutation.len() != n || form.n() != n || phase.len() != 2 * n {
        return Err(SampleError::InvalidArgument(format!(
            "decompose: expected a {n}-qubit form and {} phase bits, got a \
            {}-qubit form and {} phase bits",
            2 * n, form.n(), phase.len(),
        )));
    }
    let mut layers: Vec<GateLayer> = Vec::new();

    hadamard_free_layers(&mut layers, &form.gamma2, &form.delta2);

    let paulis: Vec<Pauli>
        = (0..n).map(|i| Pauli::from_phase_bits(phase[i], phase[i + n]))
        .collect();
    let pauli_qubits
        = |p: Pauli| paulis.iter().positions(|q| *q == p).collect::<Vec<usize>>();
    push_nonempty(&mut layers, pauli_qubits(Pauli::X), GateLayer::X);
    push_nonempty(&mut layers, pauli_qubits(Pauli::Y), GateLayer::Y);
    push_nonempty(&mut layers, pauli_qubits(Pauli::Z), GateLayer::Z);

    push_nonempty(&mut layers, swap_pairs(&mallows.permutation), GateLayer::Swap);
    push_nonempty(
        &mut layers,
        mallows.hadamard.iter().positions(|h| *h).collect(),
        GateLayer::H,
    );

    hadamard_free_layers(&mut layers, &form.gamma1, &form.delta1);
    Ok(layers)
}
