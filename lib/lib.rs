#![allow(non_snake_case)]

//! Random sampling of quantum-information objects.
//!
//! The main piece is uniform sampling from the *n*-qubit Clifford group
//! following Bravyi and Maslov, [arXiv:2003.09412][bm]: a Hadamard layer and
//! qubit permutation are drawn from the quantum Mallows distribution, a pair of
//! Hadamard-free Clifford operators is built around them in a canonical form
//! over GF(2), and the result is emitted as a fixed-order sequence of gate
//! layers that can be realized by any [`CircuitBuilder`][circuit::CircuitBuilder].
//!
//! Alongside this are generators for Haar-random unitaries, states, and
//! channels, random Hermitian operators, and random Pauli Hamiltonians.
//!
//! [bm]: https://arxiv.org/abs/2003.09412

pub mod error;
pub mod rng;
pub mod gf2;
pub mod gate;
pub mod mallows;
pub mod tableau;
pub mod decompose;
pub mod circuit;
pub mod clifford;
pub mod haar;
pub mod pauli;

pub use error::{ SampleError, SampleResult };
pub use clifford::{ random_clifford, RandomClifford };
