use nalgebra as na;
use num_complex::Complex64 as C64;
use qinfo_rand::{
    circuit::unitarity_error,
    haar::{ self, Channel, ChannelRepr },
    pauli,
    rng::rng_from_seed,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn max_dev(a: &na::DMatrix<C64>, b: &na::DMatrix<C64>) -> f64 {
    (a - b).iter().map(|z| z.norm()).fold(0.0, f64::max)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    const N: usize = 3;
    const MC: usize = 1000;
    let seed: Option<u64> = std::env::args().nth(1).and_then(|s| s.parse().ok());
    let mut rng = rng_from_seed(seed);
    let dim = 1 << N;

    // E|U_00|^2 = 1/d over the Haar measure
    let mut mean_sq: f64 = 0.0;
    let mut max_err: f64 = 0.0;
    for _ in 0..MC {
        let u = haar::random_unitary(N, &mut rng).unwrap();
        max_err = max_err.max(unitarity_error(&u));
        mean_sq += u[(0, 0)].norm_sqr() / MC as f64;
    }
    println!("unitaries: E|U_00|^2 = {:.5} (expected {:.5})", mean_sq, 1.0 / dim as f64);
    info!(max_unitarity_error = max_err, "random_unitary");

    let id: na::DMatrix<C64> = na::DMatrix::identity(dim, dim);
    let mut max_err: f64 = 0.0;
    for _ in 0..MC {
        let Channel::Kraus(kraus)
            = haar::random_channel(N, None, ChannelRepr::Kraus, &mut rng).unwrap()
            else { unreachable!() };
        let completeness
            = kraus.iter()
            .fold(na::DMatrix::<C64>::zeros(dim, dim), |acc, k| acc + k.adjoint() * k);
        max_err = max_err.max(max_dev(&completeness, &id));
    }
    println!("channels: max |sum K^dag K - I| = {:.3e}", max_err);

    let mut min_eig: f64 = f64::INFINITY;
    for _ in 0..MC {
        let rho = haar::random_density_matrix(N, &mut rng).unwrap();
        let eig = rho.symmetric_eigenvalues().min();
        min_eig = min_eig.min(eig);
    }
    println!("density matrices: min eigenvalue = {:.3e}", min_eig);

    let ham = pauli::random_hamiltonian(N, 3, &mut rng).unwrap();
    println!("random Hamiltonian:\n{}", ham);
    let eigs = ham.matrix().unwrap().symmetric_eigenvalues();
    println!("spectrum: {:.5}", eigs.transpose());
}
