//! Uniformly random elements of the *n*-qubit Clifford group.
//!
//! Sampling follows Bravyi and Maslov, *Hadamard-free circuits expose the
//! structure of the Clifford group*, IEEE Trans. Inf. Theory **67**(7),
//! 4546-4563 (2021) ([arXiv:2003.09412][bravyi-maslov]):
//! 1. draw a Hadamard layer and qubit permutation from the quantum Mallows
//!    distribution ([`crate::mallows`]);
//! 1. draw the free parameters of the two Hadamard-free layers around them and
//!    assemble the symplectic tableau ([`crate::tableau`]);
//! 1. draw a uniform Pauli correction;
//! 1. lay the result out as a fixed sequence of gate layers
//!    ([`crate::decompose`]).
//!
//! # Example
//! ```
//! use qinfo_rand::{ clifford::{ random_clifford, RandomClifford }, rng::rng_from_seed };
//!
//! let mut rng = rng_from_seed(Some(10546));
//!
//! // just the unitary
//! let u = random_clifford(3, &mut rng).unwrap();
//! assert_eq!(u.shape(), (8, 8));
//!
//! // or the full record
//! let cliff = RandomClifford::sample(3, &mut rng).unwrap();
//! for layer in cliff.layers() {
//!     println!("{}", layer);
//! }
//! ```
//!
//! [bravyi-maslov]: https://arxiv.org/abs/2003.09412

use std::hash::{ Hash, Hasher };
use nalgebra as na;
use num_complex::Complex64 as C64;
use rustc_hash::FxHasher;
use tracing::{ debug, trace };
use crate::{
    circuit::{ CircuitBuilder, UnitaryCircuit },
    decompose::decompose,
    error::{ SampleError, SampleResult },
    gate::{ GateLayer, Pauli },
    gf2::BMat,
    mallows::{ self, MallowsSample },
    rng::RandomSource,
    tableau::{ self, CanonicalForm },
};

/// Everything drawn for a single random Clifford element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomClifford {
    mallows: MallowsSample,
    form: CanonicalForm,
    tableau: BMat,
    phase: Vec<bool>,
    layers: Vec<GateLayer>,
}

impl RandomClifford {
    /// Draw a uniformly random `n`-qubit Clifford element.
    ///
    /// Fails if `n` is zero or if the random source fails.
    pub fn sample<S>(n: usize, rng: &mut S) -> SampleResult<Self>
    where S: RandomSource + ?Sized
    {
        if n == 0 {
            return Err(SampleError::InvalidArgument(
                "number of qubits must be positive".into()));
        }
        let mallows = mallows::sample(n, rng)?;
        trace!(permutation = ?mallows.permutation, "sampled quantum Mallows");
        let form = tableau::sample_form(&mallows, rng)?;
        let tableau = tableau::tableau(&mallows, &form)?;
        trace!(rows = tableau.nrows(), cols = tableau.ncols(), "assembled tableau");
        let phase: Vec<bool>
            = (0..2 * n).map(|_| rng.uniform_bit())
            .collect::<SampleResult<_>>()?;
        Self::from_parts(mallows, form, tableau, phase)
    }

    /// Assemble a record from fixed parameters, recomputing the tableau.
    pub fn from_params(
        mallows: MallowsSample,
        form: CanonicalForm,
        phase: Vec<bool>,
    ) -> SampleResult<Self>
    {
        let tableau = tableau::tableau(&mallows, &form)?;
        Self::from_parts(mallows, form, tableau, phase)
    }

    fn from_parts(
        mallows: MallowsSample,
        form: CanonicalForm,
        tableau: BMat,
        phase: Vec<bool>,
    ) -> SampleResult<Self>
    {
        let layers = decompose(&mallows, &form, &phase)?;
        debug!(
            n = mallows.n(),
            hadamards = mallows.hadamard.iter().filter(|h| **h).count(),
            layers = layers.len(),
            "decomposed random Clifford"
        );
        Ok(Self { mallows, form, tableau, phase, layers })
    }

    /// Number of qubits.
    pub fn n(&self) -> usize { self.mallows.n() }

    /// The Hadamard layer.
    pub fn hadamard(&self) -> &[bool] { &self.mallows.hadamard }

    /// The qubit permutation.
    pub fn permutation(&self) -> &[usize] { &self.mallows.permutation }

    /// The γ/δ matrices of both Hadamard-free layers.
    pub fn form(&self) -> &CanonicalForm { &self.form }

    /// The 2*n* × 2*n* symplectic tableau.
    pub fn tableau(&self) -> &BMat { &self.tableau }

    /// The 2*n* phase bits.
    pub fn phase(&self) -> &[bool] { &self.phase }

    /// Per-qubit Pauli corrections decoded from the phase bits.
    pub fn pauli_correction(&self) -> Vec<Pauli> {
        let n = self.n();
        (0..n).map(|i| Pauli::from_phase_bits(self.phase[i], self.phase[i + n]))
            .collect()
    }

    /// The ordered gate layers, first applied first.
    pub fn layers(&self) -> &[GateLayer] { &self.layers }

    /// Hash of the tableau and phase bits, which identify the element up to a
    /// global phase.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.tableau.as_slice().hash(&mut hasher);
        self.phase.hash(&mut hasher);
        hasher.finish()
    }

    /// Hand the layers, in order, to `builder` and return what it produces.
    pub fn realize<B>(&self, builder: &mut B) -> SampleResult<B::Output>
    where B: CircuitBuilder + ?Sized
    {
        builder.apply_layers(&self.layers)?;
        Ok(builder.unitary_matrix())
    }

    /// The 2<sup>*n*</sup> × 2<sup>*n*</sup> unitary matrix of the element.
    ///
    /// Fails for registers larger than
    /// [`MAX_DENSE_QUBITS`][crate::circuit::MAX_DENSE_QUBITS].
    pub fn unitary(&self) -> SampleResult<na::DMatrix<C64>> {
        let mut circuit = UnitaryCircuit::new(self.n())?;
        self.realize(&mut circuit)
    }
}

/// Generate the matrix of a uniformly random `num_qubits`-qubit Clifford
/// unitary.
pub fn random_clifford<S>(num_qubits: usize, rng: &mut S)
    -> SampleResult<na::DMatrix<C64>>
where S: RandomSource + ?Sized
{
    RandomClifford::sample(num_qubits, rng)?.unitary()
}

#[cfg(test)]
mod test {
    use rustc_hash::FxHashMap;
    use super::*;
    use crate::{ circuit::unitarity_error, gf2, rng::rng_from_seed };

    #[test]
    fn unitary_for_small_registers() {
        let mut rng = rng_from_seed(Some(10546));
        for n in 1..=5 {
            for _ in 0..10 {
                let u = random_clifford(n, &mut rng).unwrap();
                assert_eq!(u.shape(), (1 << n, 1 << n));
                assert!(unitarity_error(&u) < 1e-10);
            }
        }
    }

    #[test]
    fn zero_qubits() {
        let mut rng = rng_from_seed(Some(0));
        assert!(matches!(
            random_clifford(0, &mut rng),
            Err(SampleError::InvalidArgument(_)),
        ));
    }

    #[test]
    fn large_registers_sample_without_matrix() {
        let mut rng = rng_from_seed(Some(1));
        let cliff = RandomClifford::sample(64, &mut rng).unwrap();
        assert!(gf2::is_symplectic(cliff.tableau()));
        assert_eq!(cliff.phase().len(), 128);
        assert!(matches!(cliff.unitary(), Err(SampleError::InvalidArgument(_))));
    }

    #[test]
    fn seeded_samples_repeat() {
        let draw = |seed: u64| {
            let mut rng = rng_from_seed(Some(seed));
            let cliff = RandomClifford::sample(4, &mut rng).unwrap();
            let u = cliff.unitary().unwrap();
            (cliff, u)
        };
        let (a, ua) = draw(12345);
        let (b, ub) = draw(12345);
        assert_eq!(a.hadamard(), b.hadamard());
        assert_eq!(a.permutation(), b.permutation());
        assert_eq!(a.form(), b.form());
        assert_eq!(a.tableau(), b.tableau());
        assert_eq!(a, b);
        assert_eq!(ua, ub);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn identity_scenario() {
        let mallows = MallowsSample {
            hadamard: vec![false, false],
            permutation: vec![0, 1],
        };
        let cliff
            = RandomClifford::from_params(
                mallows, CanonicalForm::identity(2), vec![false; 4])
            .unwrap();
        assert!(cliff.layers().is_empty());
        assert_eq!(cliff.tableau(), &gf2::identity(4));
        let u = cliff.unitary().unwrap();
        assert_eq!(u, na::DMatrix::<C64>::identity(4, 4));
    }

    #[test]
    fn pauli_correction_decoding() {
        let mallows = MallowsSample {
            hadamard: vec![false; 3],
            permutation: vec![0, 1, 2],
        };
        let cliff
            = RandomClifford::from_params(
                mallows,
                CanonicalForm::identity(3),
                vec![true, false, true, false, true, true],
            )
            .unwrap();
        assert_eq!(cliff.pauli_correction(), vec![Pauli::X, Pauli::Y, Pauli::Z]);
        assert_eq!(
            cliff.layers(),
            &[GateLayer::X(vec![0]), GateLayer::Y(vec![1]), GateLayer::Z(vec![2])],
        );
    }

    // identify the Pauli a 2 × 2 matrix is proportional to, if any
    fn which_pauli(m: &na::DMatrix<C64>) -> Option<Pauli> {
        [Pauli::X, Pauli::Y, Pauli::Z].into_iter()
            .find(|p| (p.matrix() * m).trace().norm() > 2.0 - 1e-8)
    }

    // label of the coset of a single-qubit Clifford modulo Paulis and global
    // phase: the (unsigned) images of X and Z under conjugation
    fn coset(u: &na::DMatrix<C64>) -> (Pauli, Pauli) {
        let conj = |p: Pauli| u * p.matrix() * u.adjoint();
        let x = which_pauli(&conj(Pauli::X)).expect("X not mapped to a Pauli");
        let z = which_pauli(&conj(Pauli::Z)).expect("Z not mapped to a Pauli");
        (x, z)
    }

    #[test]
    fn single_qubit_cosets_uniform() {
        const SAMPLES: usize = 6000;
        let mut rng = rng_from_seed(Some(10546));
        let mut counts: FxHashMap<(Pauli, Pauli), usize> = FxHashMap::default();
        for _ in 0..SAMPLES {
            let u = random_clifford(1, &mut rng).unwrap();
            *counts.entry(coset(&u)).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 6, "{:?}", counts);
        let expected = SAMPLES as f64 / 6.0;
        let chi2: f64
            = counts.values()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        // 5 degrees of freedom, p = 0.001
        assert!(chi2 < 20.515, "chi^2 = {}; counts = {:?}", chi2, counts);
    }

    /// Records the layer kinds it receives instead of building a matrix.
    #[derive(Default)]
    struct Recorder(Vec<&'static str>);

    impl CircuitBuilder for Recorder {
        type Output = Vec<&'static str>;

        fn apply_cnot(&mut self, _: &[(usize, usize)]) -> SampleResult<()> {
            self.0.push("cx"); Ok(())
        }

        fn apply_cz(&mut self, _: &[(usize, usize)]) -> SampleResult<()> {
            self.0.push("cz"); Ok(())
        }

        fn apply_s(&mut self, _: &[usize]) -> SampleResult<()> {
            self.0.push("s"); Ok(())
        }

        fn apply_pauli_x(&mut self, _: &[usize]) -> SampleResult<()> {
            self.0.push("x"); Ok(())
        }

        fn apply_pauli_y(&mut self, _: &[usize]) -> SampleResult<()> {
            self.0.push("y"); Ok(())
        }

        fn apply_pauli_z(&mut self, _: &[usize]) -> SampleResult<()> {
            self.0.push("z"); Ok(())
        }

        fn apply_swap(&mut self, _: &[(usize, usize)]) -> SampleResult<()> {
            self.0.push("swap"); Ok(())
        }

        fn apply_hadamard(&mut self, _: &[usize]) -> SampleResult<()> {
            self.0.push("h"); Ok(())
        }

        fn unitary_matrix(&self) -> Self::Output { self.0.clone() }
    }

    #[test]
    fn layers_reach_builder_in_order() {
        let mut rng = rng_from_seed(Some(7));
        let cliff = RandomClifford::sample(6, &mut rng).unwrap();
        let mut rec = Recorder::default();
        let seen = cliff.realize(&mut rec).unwrap();
        assert_eq!(seen.len(), cliff.layers().len());
        // the Hadamard layer, if present, comes after every swap and Pauli
        if let Some(h) = seen.iter().position(|s| *s == "h") {
            assert!(seen[h..].iter().all(|s| !matches!(*s, "swap" | "x" | "y" | "z")));
        }
    }
}
