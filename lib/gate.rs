//! Gates whose operations belong to the *n*-qubit Clifford group, and layers
//! of them.
//!
//! See also: <https://en.wikipedia.org/wiki/Clifford_gates>

use std::fmt;
use nalgebra as na;
use num_complex::Complex64 as C64;
use once_cell::sync::Lazy;

/// Description of a single gate for a register of qubits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Hadamard
    H(usize),
    /// π rotation about X
    X(usize),
    /// π rotation about Y
    Y(usize),
    /// π rotation about Z
    Z(usize),
    /// π/2 rotation about Z
    S(usize),
    /// Z-controlled π rotation about X.
    ///
    /// The first qubit index is the control.
    CX(usize, usize),
    /// Z-controlled π rotation about Z.
    ///
    /// The first qubit index is the control.
    CZ(usize, usize),
    /// Swap
    Swap(usize, usize),
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::H(k) => write!(f, "H {}", k),
            Self::X(k) => write!(f, "X {}", k),
            Self::Y(k) => write!(f, "Y {}", k),
            Self::Z(k) => write!(f, "Z {}", k),
            Self::S(k) => write!(f, "S {}", k),
            Self::CX(a, b) => write!(f, "CX {} {}", a, b),
            Self::CZ(a, b) => write!(f, "CZ {} {}", a, b),
            Self::Swap(a, b) => write!(f, "SWAP {} {}", a, b),
        }
    }
}

impl Gate {
    /// Return `true` if `self` is `H`.
    pub fn is_h(&self) -> bool { matches!(self, Self::H(..)) }

    /// Return `true` if `self` is `X`, `Y`, or `Z`.
    pub fn is_pauli(&self) -> bool {
        matches!(self, Self::X(..) | Self::Y(..) | Self::Z(..))
    }

    /// Return `true` if `self` is `S`.
    pub fn is_s(&self) -> bool { matches!(self, Self::S(..)) }

    /// Return `true` if `self` is `CX`.
    pub fn is_cx(&self) -> bool { matches!(self, Self::CX(..)) }

    /// Return `true` if `self` is `CZ`.
    pub fn is_cz(&self) -> bool { matches!(self, Self::CZ(..)) }

    /// Return `true` if `self` is `Swap`.
    pub fn is_swap(&self) -> bool { matches!(self, Self::Swap(..)) }

    /// Return the largest qubit index the gate acts on.
    pub fn max_qubit(&self) -> usize {
        match *self {
            Self::H(k) | Self::X(k) | Self::Y(k) | Self::Z(k) | Self::S(k)
                => k,
            Self::CX(a, b) | Self::CZ(a, b) | Self::Swap(a, b)
                => a.max(b),
        }
    }

    /// Return `true` if `self` is a two-qubit gate acting twice on the same
    /// qubit.
    pub fn is_degenerate(&self) -> bool {
        match *self {
            Self::CX(a, b) | Self::CZ(a, b) | Self::Swap(a, b) => a == b,
            _ => false,
        }
    }
}

/// A single-qubit Pauli operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// Identity
    I,
    /// σ<sub>*x*</sub>
    X,
    /// σ<sub>*y*</sub>
    Y,
    /// σ<sub>*z*</sub>
    Z,
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::I => write!(f, "{}", if f.alternate() { "." } else { "I" }),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl Pauli {
    pub(crate) fn from_int(u: usize) -> Self {
        match u % 4 {
            0 => Self::I,
            1 => Self::X,
            2 => Self::Y,
            3 => Self::Z,
            _ => unreachable!(),
        }
    }

    /// Decode a Pauli correction from its pair of phase bits: `(1, 0)` is
    /// *X*, `(0, 1)` is *Y*, and `(1, 1)` is *Z*.
    pub fn from_phase_bits(a: bool, b: bool) -> Self {
        match (a, b) {
            (false, false) => Self::I,
            (true,  false) => Self::X,
            (false, true ) => Self::Y,
            (true,  true ) => Self::Z,
        }
    }

    /// Return the 2 × 2 matrix of the operator.
    pub fn matrix(self) -> &'static na::DMatrix<C64> {
        match self {
            Self::I => Lazy::force(&PAULI_I),
            Self::X => Lazy::force(&PAULI_X),
            Self::Y => Lazy::force(&PAULI_Y),
            Self::Z => Lazy::force(&PAULI_Z),
        }
    }

    /// Lowercase label, as used in Pauli strings.
    pub fn label(self) -> char {
        match self {
            Self::I => 'i',
            Self::X => 'x',
            Self::Y => 'y',
            Self::Z => 'z',
        }
    }
}

/// A single-qubit identity matrix.
pub static PAULI_I: Lazy<na::DMatrix<C64>> =
    Lazy::new(|| na::DMatrix::identity(2, 2));

/// A single-qubit Pauli *X* matrix.
pub static PAULI_X: Lazy<na::DMatrix<C64>> =
    Lazy::new(|| {
        let mut x = na::DMatrix::zeros(2, 2);
        x[(0, 1)] = C64::from(1.0);
        x[(1, 0)] = C64::from(1.0);
        x
    });

/// A single-qubit Pauli *Y* matrix.
pub static PAULI_Y: Lazy<na::DMatrix<C64>> =
    Lazy::new(|| {
        let mut y = na::DMatrix::zeros(2, 2);
        y[(0, 1)] = -C64::i();
        y[(1, 0)] =  C64::i();
        y
    });

/// A single-qubit Pauli *Z* matrix.
pub static PAULI_Z: Lazy<na::DMatrix<C64>> =
    Lazy::new(|| {
        let mut z = na::DMatrix::zeros(2, 2);
        z[(0, 0)] = C64::from( 1.0);
        z[(1, 1)] = C64::from(-1.0);
        z
    });

/// A group of gates of the same kind, applied in the order listed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GateLayer {
    /// CNOTs, as `(control, target)` pairs.
    CX(Vec<(usize, usize)>),
    /// CZs.
    CZ(Vec<(usize, usize)>),
    /// π/2 phase gates.
    S(Vec<usize>),
    /// Pauli *X*s.
    X(Vec<usize>),
    /// Pauli *Y*s.
    Y(Vec<usize>),
    /// Pauli *Z*s.
    Z(Vec<usize>),
    /// Swaps.
    Swap(Vec<(usize, usize)>),
    /// Hadamards.
    H(Vec<usize>),
}

impl GateLayer {
    /// Number of gates in the layer.
    pub fn len(&self) -> usize {
        match self {
            Self::CX(p) | Self::CZ(p) | Self::Swap(p) => p.len(),
            Self::S(k) | Self::X(k) | Self::Y(k) | Self::Z(k) | Self::H(k)
                => k.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Expand into individual gates.
    pub fn gates(&self) -> Vec<Gate> {
        match self {
            Self::CX(p) => p.iter().map(|&(a, b)| Gate::CX(a, b)).collect(),
            Self::CZ(p) => p.iter().map(|&(a, b)| Gate::CZ(a, b)).collect(),
            Self::Swap(p) => p.iter().map(|&(a, b)| Gate::Swap(a, b)).collect(),
            Self::S(k) => k.iter().copied().map(Gate::S).collect(),
            Self::X(k) => k.iter().copied().map(Gate::X).collect(),
            Self::Y(k) => k.iter().copied().map(Gate::Y).collect(),
            Self::Z(k) => k.iter().copied().map(Gate::Z).collect(),
            Self::H(k) => k.iter().copied().map(Gate::H).collect(),
        }
    }
}

impl fmt::Display for GateLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CX(_) => "CX",
            Self::CZ(_) => "CZ",
            Self::S(_) => "S",
            Self::X(_) => "X",
            Self::Y(_) => "Y",
            Self::Z(_) => "Z",
            Self::Swap(_) => "SWAP",
            Self::H(_) => "H",
        };
        write!(f, "{}", name)?;
        match self {
            Self::CX(p) | Self::CZ(p) | Self::Swap(p) => {
                p.iter().try_for_each(|(a, b)| write!(f, " ({}, {})", a, b))
            },
            Self::S(k) | Self::X(k) | Self::Y(k) | Self::Z(k) | Self::H(k) => {
                k.iter().try_for_each(|a| write!(f, " {}", a))
            },
        }
    }
}
