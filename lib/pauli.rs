//! Random Pauli strings and the Hamiltonians built from them.

use std::fmt;
use nalgebra as na;
use num_complex::Complex64 as C64;
use rand::Rng;
use crate::{
    circuit::MAX_DENSE_QUBITS,
    error::{ SampleError, SampleResult },
    gate::Pauli,
    rng::RandomSource,
};

/// A real-weighted product of single-qubit Pauli operators.
///
/// Qubits not named in `ops` carry the identity.
#[derive(Clone, Debug, PartialEq)]
pub struct PauliTerm {
    pub coeff: f64,
    /// `(operator, qubit)` pairs, sorted by qubit.
    pub ops: Vec<(Pauli, usize)>,
}

impl fmt::Display for PauliTerm {
    // e.g. "y0,z2"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, (p, q)) in self.ops.iter().enumerate() {
            if k > 0 { write!(f, ",")?; }
            write!(f, "{}{}", p.label(), q)?;
        }
        Ok(())
    }
}

impl PauliTerm {
    /// Dense 2<sup>`n`</sup> × 2<sup>`n`</sup> matrix of the term, with qubit 0
    /// as the most significant bit.
    pub fn matrix(&self, n: usize) -> SampleResult<na::DMatrix<C64>> {
        if n == 0 || n > MAX_DENSE_QUBITS {
            return Err(SampleError::InvalidArgument(format!(
                "number of qubits must be between 1 and {}, got {}",
                MAX_DENSE_QUBITS, n,
            )));
        }
        if let Some((_, q)) = self.ops.iter().find(|(_, q)| *q >= n) {
            return Err(SampleError::InvalidArgument(format!(
                "Pauli term acts on qubit {} of a {}-qubit register", q, n)));
        }
        let mut ops: Vec<Pauli> = vec![Pauli::I; n];
        self.ops.iter().for_each(|(p, q)| { ops[*q] = *p; });
        let prod
            = ops.iter()
            .fold(na::DMatrix::<C64>::identity(1, 1), |acc, p| acc.kronecker(p.matrix()));
        Ok(prod * C64::from(self.coeff))
    }
}

/// Draw `terms` random Pauli terms on `num_qubits` qubits.
///
/// Each term has a length drawn uniformly from 1 to `num_qubits`, a coefficient
/// drawn uniformly from [−1, 1), and a uniformly random non-identity Pauli on
/// each of that many distinct qubits.
pub fn random_pauli_str<R>(num_qubits: usize, terms: usize, rng: &mut R)
    -> SampleResult<Vec<PauliTerm>>
where R: Rng + ?Sized
{
    if num_qubits == 0 {
        return Err(SampleError::InvalidArgument(
            "number of qubits must be positive".into()));
    }
    (0..terms).map(|_| {
        let len = rng.gen_range(1..=num_qubits);
        let coeff = 2.0 * rng.uniform_real()? - 1.0;
        let mut ops: Vec<(Pauli, usize)>
            = rng.sample_indices(num_qubits, len)?
            .into_iter()
            .map(|q| (Pauli::from_int(rng.gen_range(1..4)), q))
            .collect();
        ops.sort_by_key(|(_, q)| *q);
        Ok(PauliTerm { coeff, ops })
    })
    .collect()
}

/// A sum of [`PauliTerm`]s on a fixed number of qubits.
#[derive(Clone, Debug, PartialEq)]
pub struct Hamiltonian {
    num_qubits: usize,
    terms: Vec<PauliTerm>,
}

impl fmt::Display for Hamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, term) in self.terms.iter().enumerate() {
            if k > 0 { writeln!(f)?; }
            write!(f, "{:+.5} {}", term.coeff, term)?;
        }
        Ok(())
    }
}

impl Hamiltonian {
    /// Collect terms into a Hamiltonian on `num_qubits` qubits.
    ///
    /// Fails if any term acts outside the register.
    pub fn new(num_qubits: usize, terms: Vec<PauliTerm>) -> SampleResult<Self> {
        let oob
            = terms.iter()
            .flat_map(|t| t.ops.iter())
            .find(|(_, q)| *q >= num_qubits);
        if let Some((_, q)) = oob {
            return Err(SampleError::InvalidArgument(format!(
                "Pauli term acts on qubit {} of a {}-qubit register",
                q, num_qubits,
            )));
        }
        Ok(Self { num_qubits, terms })
    }

    pub fn num_qubits(&self) -> usize { self.num_qubits }

    pub fn terms(&self) -> &[PauliTerm] { &self.terms }

    /// Dense matrix of the sum, with qubit 0 as the most significant bit.
    pub fn matrix(&self) -> SampleResult<na::DMatrix<C64>> {
        if self.num_qubits == 0 || self.num_qubits > MAX_DENSE_QUBITS {
            return Err(SampleError::InvalidArgument(format!(
                "number of qubits must be between 1 and {}, got {}",
                MAX_DENSE_QUBITS, self.num_qubits,
            )));
        }
        let dim = 1_usize << self.num_qubits;
        self.terms.iter()
            .try_fold(na::DMatrix::zeros(dim, dim), |acc, term| {
                Ok(acc + term.matrix(self.num_qubits)?)
            })
    }
}

/// Draw a random [`Hamiltonian`] of `terms` terms on `num_qubits` qubits; see
/// [`random_pauli_str`].
pub fn random_hamiltonian<R>(num_qubits: usize, terms: usize, rng: &mut R)
    -> SampleResult<Hamiltonian>
where R: Rng + ?Sized
{
    Hamiltonian::new(num_qubits, random_pauli_str(num_qubits, terms, rng)?)
}
