//! Haar-random unitaries, states, and channels, plus a few other random
//! operators built directly on top of them.
//!
//! Haar-random matrices are drawn with the Ginibre/QR method of
//! [arXiv:math-ph/0609050][mezzadri]: sample a matrix of i.i.d. Gaussian
//! entries, take its QR decomposition, and absorb the phases of the diagonal of
//! *R* into *Q*.
//!
//! [mezzadri]: https://arxiv.org/abs/math-ph/0609050

use std::{ f64::consts::FRAC_1_SQRT_2, str::FromStr };
use nalgebra as na;
use num_complex::Complex64 as C64;
use rand::Rng;
use rand_distr::StandardNormal;
use crate::{
    circuit::MAX_DENSE_QUBITS,
    error::{ SampleError, SampleResult },
};

fn check_dim(dim: usize) -> SampleResult<()> {
    if dim == 0 {
        Err(SampleError::InvalidArgument("dimension must be positive".into()))
    } else {
        Ok(())
    }
}

fn qubit_dim(num_qubits: usize) -> SampleResult<usize> {
    if num_qubits == 0 || num_qubits > MAX_DENSE_QUBITS {
        return Err(SampleError::InvalidArgument(format!(
            "number of qubits must be between 1 and {}, got {}",
            MAX_DENSE_QUBITS, num_qubits,
        )));
    }
    Ok(1 << num_qubits)
}

fn check_rank(rank: usize, dim: usize) -> SampleResult<()> {
    if rank == 0 || rank > dim {
        Err(SampleError::InvalidArgument(format!(
            "rank must be between 1 and the dimension {}, got {}", dim, rank)))
    } else {
        Ok(())
    }
}

fn normal<R>(rng: &mut R) -> f64
where R: Rng + ?Sized
{
    rng.sample::<f64, _>(StandardNormal)
}

// real and imaginary parts each standard normal
fn complex_normal<R>(rng: &mut R) -> C64
where R: Rng + ?Sized
{
    C64::new(normal(rng), normal(rng))
}

fn unit_phase(z: C64) -> C64 {
    let r = z.norm();
    if r > 0.0 { z / r } else { C64::from(1.0) }
}

fn unit_sign(x: f64) -> f64 { if x < 0.0 { -1.0 } else { 1.0 } }

/// Draw a Haar-random `dim` × `dim` unitary matrix.
pub fn haar_unitary<R>(dim: usize, rng: &mut R)
    -> SampleResult<na::DMatrix<C64>>
where R: Rng + ?Sized
{
    check_dim(dim)?;
    let ginibre: na::DMatrix<C64>
        = na::DMatrix::from_fn(dim, dim, |_, _| complex_normal(rng) * FRAC_1_SQRT_2);
    let qr = ginibre.qr();
    let lambda = qr.r().diagonal().map(unit_phase);
    Ok(qr.q() * na::DMatrix::from_diagonal(&lambda))
}

/// Draw a Haar-random `dim` × `dim` real orthogonal matrix.
pub fn haar_orthogonal<R>(dim: usize, rng: &mut R)
    -> SampleResult<na::DMatrix<f64>>
where R: Rng + ?Sized
{
    check_dim(dim)?;
    let ginibre: na::DMatrix<f64> = na::DMatrix::from_fn(dim, dim, |_, _| normal(rng));
    let qr = ginibre.qr();
    let lambda = qr.r().diagonal().map(unit_sign);
    Ok(qr.q() * na::DMatrix::from_diagonal(&lambda))
}

/// Draw a Haar-random unit vector of dimension `dim`, optionally with only real
/// entries.
pub fn haar_state_vector<R>(dim: usize, is_real: bool, rng: &mut R)
    -> SampleResult<na::DVector<C64>>
where R: Rng + ?Sized
{
    if is_real {
        Ok(haar_orthogonal(dim, rng)?.column(0).map(C64::from))
    } else {
        Ok(haar_unitary(dim, rng)?.column(0).into_owned())
    }
}

/// Draw a random density matrix of dimension `dim` and rank `rank` from the
/// induced (Hilbert-Schmidt-like) measure `G G† / tr(G G†)`, where `G` is a
/// `dim` × `rank` Ginibre matrix.
pub fn haar_density_operator<R>(dim: usize, rank: usize, is_real: bool, rng: &mut R)
    -> SampleResult<na::DMatrix<C64>>
where R: Rng + ?Sized
{
    check_dim(dim)?;
    check_rank(rank, dim)?;
    let ginibre: na::DMatrix<C64>
        = if is_real {
            na::DMatrix::from_fn(dim, rank, |_, _| C64::from(normal(rng)))
        } else {
            na::DMatrix::from_fn(dim, rank, |_, _| complex_normal(rng))
        };
    let rho = &ginibre * ginibre.adjoint();
    let tr = rho.trace();
    Ok(rho / tr)
}

/// Draw a Haar-random unitary on `num_qubits` qubits.
pub fn random_unitary<R>(num_qubits: usize, rng: &mut R)
    -> SampleResult<na::DMatrix<C64>>
where R: Rng + ?Sized
{
    haar_unitary(qubit_dim(num_qubits)?, rng)
}

/// A random quantum state.
#[derive(Clone, Debug, PartialEq)]
pub enum State {
    /// A pure state as a normalized ket.
    Pure(na::DVector<C64>),
    /// A mixed state as a density matrix.
    Mixed(na::DMatrix<C64>),
}

impl State {
    /// Return `true` if `self` is `Pure`.
    pub fn is_pure(&self) -> bool { matches!(self, Self::Pure(..)) }

    /// Convert to a density matrix.
    pub fn density_matrix(&self) -> na::DMatrix<C64> {
        match self {
            Self::Pure(psi) => psi * psi.adjoint(),
            Self::Mixed(rho) => rho.clone(),
        }
    }
}

/// Draw a random state on `num_qubits` qubits.
///
/// `rank` defaults to a uniform value between 1 and 2<sup>`num_qubits`</sup>;
/// rank 1 gives a Haar-random [`State::Pure`], any other rank a
/// [`State::Mixed`] drawn by [`haar_density_operator`].
pub fn random_state<R>(
    num_qubits: usize,
    rank: Option<usize>,
    is_real: bool,
    rng: &mut R,
) -> SampleResult<State>
where R: Rng + ?Sized
{
    let dim = qubit_dim(num_qubits)?;
    let rank = rank.unwrap_or_else(|| rng.gen_range(1..=dim));
    check_rank(rank, dim)?;
    if rank == 1 {
        haar_state_vector(dim, is_real, rng).map(State::Pure)
    } else {
        haar_density_operator(dim, rank, is_real, rng).map(State::Mixed)
    }
}

/// Draw a random `num_qubits`-qubit density matrix of uniformly random rank.
pub fn random_density_matrix<R>(num_qubits: usize, rng: &mut R)
    -> SampleResult<na::DMatrix<C64>>
where R: Rng + ?Sized
{
    let dim = qubit_dim(num_qubits)?;
    let rank = rng.gen_range(1..=dim);
    haar_density_operator(dim, rank, false, rng)
}

/// Draw a random Hermitian matrix on `num_qubits` qubits, scaled so that its
/// largest eigenvalue magnitude is 1.
pub fn random_hermitian<R>(num_qubits: usize, rng: &mut R)
    -> SampleResult<na::DMatrix<C64>>
where R: Rng + ?Sized
{
    let dim = qubit_dim(num_qubits)?;
    let mut mat: na::DMatrix<C64>
        = na::DMatrix::from_fn(dim, dim, |_, _| complex_normal(rng));
    for i in 0..dim {
        mat[(i, i)] = C64::from(mat[(i, i)].norm());
        for j in 0..i {
            mat[(i, j)] = mat[(j, i)].conj();
        }
    }
    let max_eig
        = mat.symmetric_eigenvalues().iter()
        .map(|l| l.abs())
        .fold(0.0, f64::max);
    Ok(mat / C64::from(max_eig))
}

/// Draw a random rank-1 orthogonal projector on `num_qubits` qubits.
pub fn random_orthogonal_projection<R>(num_qubits: usize, rng: &mut R)
    -> SampleResult<na::DMatrix<C64>>
where R: Rng + ?Sized
{
    let dim = qubit_dim(num_qubits)?;
    let v: na::DVector<C64> = na::DVector::from_fn(dim, |_, _| complex_normal(rng));
    let mat = &v * v.adjoint();
    let tr = mat.trace();
    Ok(mat / tr)
}

/// Draw a random matrix on `num_qubits` qubits that is both Hermitian and
/// unitary, as `2P − I` for a random projector `P`.
pub fn random_unitary_hermitian<R>(num_qubits: usize, rng: &mut R)
    -> SampleResult<na::DMatrix<C64>>
where R: Rng + ?Sized
{
    let proj = random_orthogonal_projection(num_qubits, rng)?;
    let id: na::DMatrix<C64> = na::DMatrix::identity(proj.nrows(), proj.ncols());
    Ok(proj * C64::from(2.0) - id)
}

// principal square root of a positive semidefinite Hermitian matrix
fn sqrtm_psd(mat: na::DMatrix<C64>) -> na::DMatrix<C64> {
    let mut eig = mat.symmetric_eigen();
    eig.eigenvalues.iter_mut().for_each(|l| { *l = l.max(0.0).sqrt(); });
    eig.recompose()
}

/// Draw a random unitary on `num_qubits` qubits whose upper-left block is a
/// Hermitian matrix on `num_qubits − 1` qubits.
///
/// The result is `[[A, B], [B, A]]` with `B = i sqrt(I − A²)`, where `A` is
/// drawn by [`random_hermitian`] or, if `is_unitary`, is half of a draw from
/// [`random_unitary_hermitian`].
pub fn random_unitary_with_hermitian_block<R>(
    num_qubits: usize,
    is_unitary: bool,
    rng: &mut R,
) -> SampleResult<na::DMatrix<C64>>
where R: Rng + ?Sized
{
    if num_qubits < 2 {
        return Err(SampleError::InvalidArgument(
            "a Hermitian block needs at least 2 qubits".into()));
    }
    let a
        = if is_unitary {
            random_unitary_hermitian(num_qubits - 1, rng)? * C64::from(0.5)
        } else {
            random_hermitian(num_qubits - 1, rng)?
        };
    let d = a.nrows();
    let id: na::DMatrix<C64> = na::DMatrix::identity(d, d);
    let b = sqrtm_psd(id - &a * &a) * C64::i();
    Ok(na::DMatrix::from_fn(2 * d, 2 * d, |i, j| {
        if (i < d) == (j < d) { a[(i % d, j % d)] } else { b[(i % d, j % d)] }
    }))
}

/// Output representation for [`random_channel`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChannelRepr {
    Kraus,
    Choi,
    Stinespring,
}

impl FromStr for ChannelRepr {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kraus" => Ok(Self::Kraus),
            "choi" => Ok(Self::Choi),
            "stinespring" => Ok(Self::Stinespring),
            _ => Err(SampleError::InvalidArgument(format!(
                "unknown channel representation '{}'", s))),
        }
    }
}

/// A quantum channel in one of the representations of [`ChannelRepr`].
#[derive(Clone, Debug, PartialEq)]
pub enum Channel {
    /// Kraus operators `K_k`, with `Σ_k K_k† K_k = I`.
    Kraus(Vec<na::DMatrix<C64>>),
    /// Choi matrix `J = Σ_ij |i⟩⟨j| ⊗ N(|i⟩⟨j|)`, input system first.
    Choi(na::DMatrix<C64>),
    /// Stinespring isometry `V` with `N(ρ) = tr_env(V ρ V†)`, environment
    /// first.
    Stinespring(na::DMatrix<C64>),
}

/// Choi matrix of the channel with the given Kraus operators.
pub fn kraus_to_choi(kraus: &[na::DMatrix<C64>]) -> na::DMatrix<C64> {
    let (d_out, d_in) = kraus.first().map(|k| k.shape()).unwrap_or((0, 0));
    na::DMatrix::from_fn(d_in * d_out, d_in * d_out, |r, c| {
        let (i, a) = (r / d_out, r % d_out);
        let (j, b) = (c / d_out, c % d_out);
        kraus.iter().map(|k| k[(a, i)] * k[(b, j)].conj()).sum()
    })
}

/// Draw a random channel on `num_qubits` qubits from a Haar-random
/// Stinespring dilation.
///
/// `rank` (the number of Kraus operators) defaults to a uniform value between
/// 1 and 2<sup>`num_qubits`</sup>.
pub fn random_channel<R>(
    num_qubits: usize,
    rank: Option<usize>,
    repr: ChannelRepr,
    rng: &mut R,
) -> SampleResult<Channel>
where R: Rng + ?Sized
{
    let dim = qubit_dim(num_qubits)?;
    let rank = rank.unwrap_or_else(|| rng.gen_range(1..=dim));
    check_rank(rank, dim)?;
    let unitary = haar_unitary(rank * dim, rng)?;
    let isometry = unitary.columns(0, dim).into_owned();
    let kraus: Vec<na::DMatrix<C64>>
        = (0..rank).map(|k| isometry.rows(k * dim, dim).into_owned()).collect();
    Ok(match repr {
        ChannelRepr::Kraus => Channel::Kraus(kraus),
        ChannelRepr::Choi => Channel::Choi(kraus_to_choi(&kraus)),
        ChannelRepr::Stinespring => Channel::Stinespring(isometry),
    })
}
