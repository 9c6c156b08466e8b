//! Realization of gate layers as a dense unitary matrix.
//!
//! [`CircuitBuilder`] is the narrow interface through which a sampled sequence
//! of gate layers is handed off; [`UnitaryCircuit`] implements it by
//! accumulating the full 2<sup>*n*</sup> × 2<sup>*n*</sup> matrix, which is
//! only practical for small registers.
//!
//! Qubit 0 is the most significant bit of a computational basis index, so that
//! the matrix of a gate on qubit 0 of two qubits is `G ⊗ I`.

use std::f64::consts::FRAC_1_SQRT_2;
use nalgebra as na;
use num_complex::Complex64 as C64;
use crate::{
    error::{ SampleError, SampleResult },
    gate::{ Gate, GateLayer },
};

/// Largest register [`UnitaryCircuit`] will allocate a matrix for.
pub const MAX_DENSE_QUBITS: usize = 12;

/// Receiver for gate layers, applied in the order they are issued.
pub trait CircuitBuilder {
    type Output;

    /// Apply CNOTs to `(control, target)` pairs.
    fn apply_cnot(&mut self, pairs: &[(usize, usize)]) -> SampleResult<()>;

    /// Apply CZs to pairs of qubits.
    fn apply_cz(&mut self, pairs: &[(usize, usize)]) -> SampleResult<()>;

    /// Apply π/2 phase gates.
    fn apply_s(&mut self, qubits: &[usize]) -> SampleResult<()>;

    /// Apply Pauli *X*s.
    fn apply_pauli_x(&mut self, qubits: &[usize]) -> SampleResult<()>;

    /// Apply Pauli *Y*s.
    fn apply_pauli_y(&mut self, qubits: &[usize]) -> SampleResult<()>;

    /// Apply Pauli *Z*s.
    fn apply_pauli_z(&mut self, qubits: &[usize]) -> SampleResult<()>;

    /// Apply swaps.
    fn apply_swap(&mut self, pairs: &[(usize, usize)]) -> SampleResult<()>;

    /// Apply Hadamards.
    fn apply_hadamard(&mut self, qubits: &[usize]) -> SampleResult<()>;

    /// Return the operator accumulated so far.
    fn unitary_matrix(&self) -> Self::Output;

    /// Dispatch a whole layer to the matching `apply_*` method.
    fn apply_layer(&mut self, layer: &GateLayer) -> SampleResult<()> {
        match layer {
            GateLayer::CX(p) => self.apply_cnot(p),
            GateLayer::CZ(p) => self.apply_cz(p),
            GateLayer::S(k) => self.apply_s(k),
            GateLayer::X(k) => self.apply_pauli_x(k),
            GateLayer::Y(k) => self.apply_pauli_y(k),
            GateLayer::Z(k) => self.apply_pauli_z(k),
            GateLayer::Swap(p) => self.apply_swap(p),
            GateLayer::H(k) => self.apply_hadamard(k),
        }
    }

    /// Apply a sequence of layers in order.
    fn apply_layers(&mut self, layers: &[GateLayer]) -> SampleResult<()> {
        layers.iter().try_for_each(|layer| self.apply_layer(layer))
    }
}

/// Dense matrix of a gate sequence on `n` qubits.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitaryCircuit {
    n: usize,
    mat: na::DMatrix<C64>,
    gates: Vec<Gate>,
}

impl UnitaryCircuit {
    /// Start from the identity on `n` qubits.
    ///
    /// Fails if `n` is zero or greater than [`MAX_DENSE_QUBITS`].
    pub fn new(n: usize) -> SampleResult<Self> {
        if n == 0 || n > MAX_DENSE_QUBITS {
            return Err(SampleError::InvalidArgument(format!(
                "dense circuits must have 1 to {} qubits, got {}",
                MAX_DENSE_QUBITS, n,
            )));
        }
        let dim = 1_usize << n;
        Ok(Self { n, mat: na::DMatrix::identity(dim, dim), gates: Vec::new() })
    }

    /// Number of qubits.
    pub fn n(&self) -> usize { self.n }

    /// Every gate applied so far, in order.
    pub fn gates(&self) -> &[Gate] { &self.gates }

    /// The accumulated matrix.
    pub fn matrix(&self) -> &na::DMatrix<C64> { &self.mat }

    pub fn into_matrix(self) -> na::DMatrix<C64> { self.mat }

    // bit mask of qubit `k` in a basis index
    fn mask(&self, k: usize) -> usize { 1 << (self.n - 1 - k) }

    /// Left-multiply the accumulated matrix by a single gate.
    pub fn apply_gate(&mut self, gate: Gate) -> SampleResult<&mut Self> {
        if gate.max_qubit() >= self.n || gate.is_degenerate() {
            return Err(SampleError::InvalidArgument(format!(
                "invalid gate `{}` for a {}-qubit register", gate, self.n)));
        }
        let zero = C64::from(0.0);
        let one = C64::from(1.0);
        let ort2 = C64::from(FRAC_1_SQRT_2);
        match gate {
            Gate::H(k) => { self.single(k, [[ort2, ort2], [ort2, -ort2]]); },
            Gate::X(k) => { self.single(k, [[zero, one], [one, zero]]); },
            Gate::Y(k) => {
                self.single(k, [[zero, -C64::i()], [C64::i(), zero]]);
            },
            Gate::Z(k) => { self.phase_rows(self.mask(k), -one); },
            Gate::S(k) => { self.phase_rows(self.mask(k), C64::i()); },
            Gate::CX(c, t) => {
                let (mc, mt) = (self.mask(c), self.mask(t));
                self.swap_rows_where(|r| r & mc != 0 && r & mt == 0, mt);
            },
            Gate::CZ(a, b) => {
                let m = self.mask(a) | self.mask(b);
                self.phase_rows(m, -one);
            },
            Gate::Swap(a, b) => {
                let (ma, mb) = (self.mask(a), self.mask(b));
                self.swap_rows_where(|r| r & ma != 0 && r & mb == 0, ma | mb);
            },
        }
        self.gates.push(gate);
        Ok(self)
    }

    /// Apply a sequence of gates in order.
    pub fn apply_circuit<'a, I>(&mut self, gates: I) -> SampleResult<&mut Self>
    where I: IntoIterator<Item = &'a Gate>
    {
        for gate in gates.into_iter() { self.apply_gate(*gate)?; }
        Ok(self)
    }

    // rows r and r | mask mix under a 2 × 2 matrix
    fn single(&mut self, k: usize, g: [[C64; 2]; 2]) {
        let m = self.mask(k);
        let dim = self.mat.nrows();
        let mut r0: na::RowDVector<C64>;
        let mut r1: na::RowDVector<C64>;
        for r in (0..dim).filter(|r| r & m == 0) {
            r0 = self.mat.row(r).clone_owned();
            r1 = self.mat.row(r | m).clone_owned();
            self.mat.set_row(r, &(&r0 * g[0][0] + &r1 * g[0][1]));
            self.mat.set_row(r | m, &(&r0 * g[1][0] + &r1 * g[1][1]));
        }
    }

    // multiply by `ph` every row whose index has all bits of `mask` set
    fn phase_rows(&mut self, mask: usize, ph: C64) {
        let dim = self.mat.nrows();
        for r in (0..dim).filter(|r| r & mask == mask) {
            self.mat.row_mut(r).iter_mut().for_each(|z| { *z *= ph; });
        }
    }

    // exchange row r with row r ^ flip for every r selected by `pred`
    fn swap_rows_where<F>(&mut self, pred: F, flip: usize)
    where F: Fn(usize) -> bool
    {
        let dim = self.mat.nrows();
        for r in (0..dim).filter(|r| pred(*r)) {
            self.mat.swap_rows(r, r ^ flip);
        }
    }

    fn apply_each<I>(&mut self, gates: I) -> SampleResult<()>
    where I: IntoIterator<Item = Gate>
    {
        for gate in gates.into_iter() { self.apply_gate(gate)?; }
        Ok(())
    }
}

impl CircuitBuilder for UnitaryCircuit {
    type Output = na::DMatrix<C64>;

    fn apply_cnot(&mut self, pairs: &[(usize, usize)]) -> SampleResult<()> {
        self.apply_each(pairs.iter().map(|&(c, t)| Gate::CX(c, t)))
    }

    fn apply_cz(&mut self, pairs: &[(usize, usize)]) -> SampleResult<()> {
        self.apply_each(pairs.iter().map(|&(a, b)| Gate::CZ(a, b)))
    }

    fn apply_s(&mut self, qubits: &[usize]) -> SampleResult<()> {
        self.apply_each(qubits.iter().copied().map(Gate::S))
    }

    fn apply_pauli_x(&mut self, qubits: &[usize]) -> SampleResult<()> {
        self.apply_each(qubits.iter().copied().map(Gate::X))
    }

    fn apply_pauli_y(&mut self, qubits: &[usize]) -> SampleResult<()> {
        self.apply_each(qubits.iter().copied().map(Gate::Y))
    }

    fn apply_pauli_z(&mut self, qubits: &[usize]) -> SampleResult<()> {
        self.apply_each(qubits.iter().copied().map(Gate::Z))
    }

    fn apply_swap(&mut self, pairs: &[(usize, usize)]) -> SampleResult<()> {
        self.apply_each(pairs.iter().map(|&(a, b)| Gate::Swap(a, b)))
    }

    fn apply_hadamard(&mut self, qubits: &[usize]) -> SampleResult<()> {
        self.apply_each(qubits.iter().copied().map(Gate::H))
    }

    fn unitary_matrix(&self) -> Self::Output { self.mat.clone() }
}

/// Largest entry-wise deviation of `u u†` from the identity.
pub fn unitarity_error(u: &na::DMatrix<C64>) -> f64 {
    let prod = u * u.adjoint();
    let id: na::DMatrix<C64> = na::DMatrix::identity(u.nrows(), u.ncols());
    (prod - id).iter().map(|z| z.norm()).fold(0.0, f64::max)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gate::Pauli;

    fn matrix_approx_eq(a: &na::DMatrix<C64>, b: &na::DMatrix<C64>) -> bool {
        a.shape() == b.shape()
            && a.iter().zip(b.iter()).all(|(ak, bk)| (ak - bk).norm() < 1e-12)
    }

    fn gate_matrix(gate: Gate) -> na::DMatrix<C64> {
        let mut circ = UnitaryCircuit::new(2).unwrap();
        circ.apply_gate(gate).unwrap();
        circ.into_matrix()
    }

    fn c(re: f64) -> C64 { C64::from(re) }

    #[test]
    fn single_qubit_ordering() {
        // qubit 0 is the left tensor factor
        let x0 = gate_matrix(Gate::X(0));
        assert!(matrix_approx_eq(&x0, &Pauli::X.matrix().kronecker(Pauli::I.matrix())));
        let z1 = gate_matrix(Gate::Z(1));
        assert!(matrix_approx_eq(&z1, &Pauli::I.matrix().kronecker(Pauli::Z.matrix())));
        let y1 = gate_matrix(Gate::Y(1));
        assert!(matrix_approx_eq(&y1, &Pauli::I.matrix().kronecker(Pauli::Y.matrix())));
    }

    #[test]
    fn two_qubit_gates() {
        let cx = gate_matrix(Gate::CX(0, 1));
        let expected = na::DMatrix::from_row_slice(4, 4, &[
            c(1.0), c(0.0), c(0.0), c(0.0),
            c(0.0), c(1.0), c(0.0), c(0.0),
            c(0.0), c(0.0), c(0.0), c(1.0),
            c(0.0), c(0.0), c(1.0), c(0.0),
        ]);
        assert!(matrix_approx_eq(&cx, &expected));

        let xc = gate_matrix(Gate::CX(1, 0));
        let expected = na::DMatrix::from_row_slice(4, 4, &[
            c(1.0), c(0.0), c(0.0), c(0.0),
            c(0.0), c(0.0), c(0.0), c(1.0),
            c(0.0), c(0.0), c(1.0), c(0.0),
            c(0.0), c(1.0), c(0.0), c(0.0),
        ]);
        assert!(matrix_approx_eq(&xc, &expected));

        let cz = gate_matrix(Gate::CZ(1, 0));
        let expected = na::DMatrix::from_diagonal(
            &na::DVector::from_vec(vec![c(1.0), c(1.0), c(1.0), c(-1.0)]));
        assert!(matrix_approx_eq(&cz, &expected));

        let swap = gate_matrix(Gate::Swap(0, 1));
        let expected = na::DMatrix::from_row_slice(4, 4, &[
            c(1.0), c(0.0), c(0.0), c(0.0),
            c(0.0), c(0.0), c(1.0), c(0.0),
            c(0.0), c(1.0), c(0.0), c(0.0),
            c(0.0), c(0.0), c(0.0), c(1.0),
        ]);
        assert!(matrix_approx_eq(&swap, &expected));
    }

    #[test]
    fn gates_compose_left() {
        // S H applied in that order is H·S as a matrix
        let mut circ = UnitaryCircuit::new(1).unwrap();
        circ.apply_gate(Gate::S(0)).unwrap()
            .apply_gate(Gate::H(0)).unwrap();
        let h = C64::from(FRAC_1_SQRT_2);
        let expected = na::DMatrix::from_row_slice(2, 2, &[
            h,  h * C64::i(),
            h, -h * C64::i(),
        ]);
        assert!(matrix_approx_eq(circ.matrix(), &expected));
        assert_eq!(circ.gates(), &[Gate::S(0), Gate::H(0)]);
    }

    #[test]
    fn s_squared_is_z() {
        let mut a = UnitaryCircuit::new(3).unwrap();
        a.apply_s(&[2, 2]).unwrap();
        let mut b = UnitaryCircuit::new(3).unwrap();
        b.apply_pauli_z(&[2]).unwrap();
        assert!(matrix_approx_eq(&a.unitary_matrix(), &b.unitary_matrix()));
    }

    #[test]
    fn layers_stay_unitary() {
        let mut circ = UnitaryCircuit::new(4).unwrap();
        let layers = vec![
            GateLayer::H(vec![0, 1, 2, 3]),
            GateLayer::CX(vec![(0, 1), (2, 3), (1, 2)]),
            GateLayer::CZ(vec![(0, 3)]),
            GateLayer::S(vec![1]),
            GateLayer::Y(vec![2]),
            GateLayer::Swap(vec![(0, 2), (2, 3)]),
        ];
        circ.apply_layers(&layers).unwrap();
        assert_eq!(circ.gates().len(), 12);
        assert!(unitarity_error(&circ.unitary_matrix()) < 1e-12);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(UnitaryCircuit::new(0), Err(SampleError::InvalidArgument(_))));
        assert!(matches!(
            UnitaryCircuit::new(MAX_DENSE_QUBITS + 1),
            Err(SampleError::InvalidArgument(_)),
        ));
        let mut circ = UnitaryCircuit::new(2).unwrap();
        assert!(circ.apply_hadamard(&[2]).is_err());
        assert!(circ.apply_cnot(&[(1, 1)]).is_err());
        assert!(circ.gates().is_empty());
    }
}
