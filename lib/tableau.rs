//! Canonical-form parameters and the symplectic tableau of a random Clifford.
//!
//! Every *n*-qubit Clifford operation can be written uniquely (up to Paulis and
//! a global phase) as *F*<sub>1</sub> *H* *S* *F*<sub>2</sub>, where *H* is a
//! layer of Hadamards, *S* a qubit permutation, and each *F*<sub>*k*</sub> a
//! Hadamard-free operation built from CNOT, CZ, and phase gates. A
//! Hadamard-free operation is parameterized by a symmetric boolean matrix
//! *γ* (CZ/phase pattern) and a unit-diagonal lower-triangular boolean matrix
//! *δ* (CNOT pattern), and acts on Pauli generators as the 2*n* × 2*n*
//! symplectic matrix
//! ```text
//! F = [ δ      0      ]
//!     [ γ δ    (δᵀ)⁻¹ ]
//! ```
//! with all arithmetic mod 2. Which entries of *γ*<sub>1</sub> and
//! *δ*<sub>1</sub> are free depends on (*H*, *S*); the rules below are the ones
//! from [arXiv:2003.09412][bravyi-maslov] that make the map from free
//! parameters to group elements a bijection.
//!
//! [bravyi-maslov]: https://arxiv.org/abs/2003.09412

use crate::{
    error::{ SampleError, SampleResult },
    gf2::{ self, BMat },
    mallows::MallowsSample,
    rng::RandomSource,
};

/// The γ and δ matrices of the two Hadamard-free layers.
///
/// `gamma1` and `delta1` belong to the layer applied last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalForm {
    pub gamma1: BMat,
    pub gamma2: BMat,
    pub delta1: BMat,
    pub delta2: BMat,
}

impl CanonicalForm {
    /// The trivial form on `n` qubits: all γ zero and all δ identity.
    pub fn identity(n: usize) -> Self {
        Self {
            gamma1: gf2::zeros(n),
            gamma2: gf2::zeros(n),
            delta1: gf2::identity(n),
            delta2: gf2::identity(n),
        }
    }

    /// Number of qubits.
    pub fn n(&self) -> usize { self.gamma1.nrows() }

    fn check_dims(&self) -> SampleResult<()> {
        let n = self.n();
        let ok = [&self.gamma1, &self.gamma2, &self.delta1, &self.delta2]
            .into_iter()
            .all(|m| m.nrows() == n && m.ncols() == n);
        if ok {
            Ok(())
        } else {
            Err(SampleError::InvalidArgument(
                "gamma and delta matrices must all be n x n".into()))
        }
    }
}

fn check_mallows(mallows: &MallowsSample) -> SampleResult<()> {
    if mallows.hadamard.len() != mallows.permutation.len() {
        return Err(SampleError::InvalidArgument(format!(
            "hadamard layer has length {} but permutation has length {}",
            mallows.hadamard.len(),
            mallows.permutation.len(),
        )));
    }
    let n = mallows.n();
    let mut seen = vec![false; n];
    for &p in mallows.permutation.iter() {
        if p >= n || std::mem::replace(&mut seen[p], true) {
            return Err(SampleError::InvalidArgument(format!(
                "{:?} is not a permutation of 0..{}", mallows.permutation, n)));
        }
    }
    Ok(())
}

/// Draw the free entries of γ<sub>1</sub>, γ<sub>2</sub>, δ<sub>1</sub>, and
/// δ<sub>2</sub> for a given Hadamard layer and permutation.
pub fn sample_form<S>(mallows: &MallowsSample, rng: &mut S)
    -> SampleResult<CanonicalForm>
where S: RandomSource + ?Sized
{
    check_mallows(mallows)?;
    let had = &mallows.hadamard;
    let perm = &mallows.permutation;
    let n = mallows.n();
    let CanonicalForm { mut gamma1, mut gamma2, mut delta1, mut delta2 }
        = CanonicalForm::identity(n);

    for (i, hi) in had.iter().enumerate() {
        gamma2[(i, i)] = rng.uniform_bit()?;
        if *hi { gamma1[(i, i)] = rng.uniform_bit()?; }
    }

    let mut b: bool;
    for j in 0..n {
        for i in j + 1..n {
            b = rng.uniform_bit()?;
            gamma2[(i, j)] = b;
            gamma2[(j, i)] = b;
            delta2[(i, j)] = rng.uniform_bit()?;

            let (hi, hj) = (had[i], had[j]);
            let (pi, pj) = (perm[i], perm[j]);
            if hi && hj {
                b = rng.uniform_bit()?;
                gamma1[(i, j)] = b;
                gamma1[(j, i)] = b;
            }
            if hi && !hj && pi < pj {
                b = rng.uniform_bit()?;
                gamma1[(i, j)] = b;
                gamma1[(j, i)] = b;
            }
            if !hi && hj && pi > pj {
                b = rng.uniform_bit()?;
                gamma1[(i, j)] = b;
                gamma1[(j, i)] = b;
            }
            if !hi && hj {
                delta1[(i, j)] = rng.uniform_bit()?;
            }
            if hi && hj && pi > pj {
                delta1[(i, j)] = rng.uniform_bit()?;
            }
            if !hi && !hj && pi < pj {
                delta1[(i, j)] = rng.uniform_bit()?;
            }
        }
    }
    Ok(CanonicalForm { gamma1, gamma2, delta1, delta2 })
}

/// Symplectic matrix of a Hadamard-free layer, `[[δ, 0], [γ δ, (δᵀ)⁻¹]]`.
pub fn hadamard_free(gamma: &BMat, delta: &BMat) -> SampleResult<BMat> {
    let n = delta.nrows();
    let inv_t
        = gf2::inverse(&delta.transpose())
        .ok_or_else(|| {
            SampleError::InternalInvariantViolation(format!(
                "delta matrix is not invertible mod 2:\n{}", gf2::Bits(delta)))
        })?;
    Ok(gf2::block(delta, &gf2::zeros(n), &gf2::matmul(gamma, delta), &inv_t))
}

/// Assemble the full 2*n* × 2*n* stabilizer tableau `F1 · (H S F2)`.
pub fn tableau(mallows: &MallowsSample, form: &CanonicalForm)
    -> SampleResult<BMat>
{
    check_mallows(mallows)?;
    form.check_dims()?;
    let n = mallows.n();
    if form.n() != n {
        return Err(SampleError::InvalidArgument(format!(
            "canonical form is for {} qubits, but the permutation is for {}",
            form.n(), n,
        )));
    }
    let f1 = hadamard_free(&form.gamma1, &form.delta1)?;
    let f2 = hadamard_free(&form.gamma2, &form.delta2)?;

    let perm = &mallows.permutation;
    let mut t = BMat::from_fn(2 * n, 2 * n, |i, j| {
        if i < n { f2[(perm[i], j)] } else { f2[(perm[i - n] + n, j)] }
    });
    mallows.hadamard.iter().enumerate()
        .filter(|(_, h)| **h)
        .for_each(|(i, _)| { t.swap_rows(i, i + n); });

    Ok(gf2::matmul(&f1, &t))
}
