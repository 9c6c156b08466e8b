//! Dense boolean matrices with arithmetic over GF(2).
//!
//! Matrices are plain `nalgebra` matrices of `bool`; addition is XOR and
//! multiplication is AND.

use std::fmt;
use nalgebra as na;

/// A dense boolean matrix.
pub type BMat = na::DMatrix<bool>;

/// The `n` × `n` all-false matrix.
pub fn zeros(n: usize) -> BMat { BMat::from_element(n, n, false) }

/// The `n` × `n` identity matrix.
pub fn identity(n: usize) -> BMat { BMat::from_fn(n, n, |i, j| i == j) }

/// Matrix product mod 2.
///
/// *Panics if the inner dimensions do not agree.*
pub fn matmul(a: &BMat, b: &BMat) -> BMat {
    assert_eq!(a.ncols(), b.nrows(), "gf2::matmul: dimension mismatch");
    BMat::from_fn(a.nrows(), b.ncols(), |i, j| {
        (0..a.ncols()).fold(false, |acc, k| acc ^ (a[(i, k)] & b[(k, j)]))
    })
}

/// Invert a square matrix mod 2 by Gauss-Jordan elimination, returning `None`
/// if it is singular.
pub fn inverse(a: &BMat) -> Option<BMat> {
    if !a.is_square() { return None; }
    let n = a.nrows();
    let mut lhs = a.clone();
    let mut rhs = identity(n);
    for col in 0..n {
        let pivot = (col..n).find(|&r| lhs[(r, col)])?;
        if pivot != col {
            lhs.swap_rows(pivot, col);
            rhs.swap_rows(pivot, col);
        }
        for r in 0..n {
            if r != col && lhs[(r, col)] {
                for c in 0..n {
                    let (l, h) = (lhs[(col, c)], rhs[(col, c)]);
                    lhs[(r, c)] ^= l;
                    rhs[(r, c)] ^= h;
                }
            }
        }
    }
    Some(rhs)
}

/// Assemble the 2*n* × 2*n* block matrix `[[a, b], [c, d]]` from four *n* × *n*
/// blocks.
pub fn block(a: &BMat, b: &BMat, c: &BMat, d: &BMat) -> BMat {
    let n = a.nrows();
    BMat::from_fn(2 * n, 2 * n, |i, j| {
        match (i < n, j < n) {
            (true,  true ) => a[(i,     j    )],
            (true,  false) => b[(i,     j - n)],
            (false, true ) => c[(i - n, j    )],
            (false, false) => d[(i - n, j - n)],
        }
    })
}

/// Return `true` if `m` is symmetric.
pub fn is_symmetric(m: &BMat) -> bool {
    m.is_square() && m == &m.transpose()
}

/// Return `true` if the 2*n* × 2*n* matrix `m` preserves the symplectic form
/// `Ω = [[0, I], [I, 0]]`, i.e. `m Ω mᵀ = Ω` mod 2.
pub fn is_symplectic(m: &BMat) -> bool {
    if !m.is_square() || m.nrows() % 2 != 0 { return false; }
    let n = m.nrows() / 2;
    let omega = block(&zeros(n), &identity(n), &identity(n), &zeros(n));
    matmul(&matmul(m, &omega), &m.transpose()) == omega
}

/// Wrapper to print a boolean matrix as rows of `0`s and `1`s.
pub struct Bits<'a>(pub &'a BMat);

impl<'a> fmt::Display for Bits<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.row_iter().enumerate() {
            if i > 0 { writeln!(f)?; }
            for b in row.iter() {
                write!(f, "{}", if *b { '1' } else { '0' })?;
            }
        }
        Ok(())
    }
}
