use crate::constants::{ALPHA_BARRIER_Z, ELECTRON_CAPTURE_FACTOR, FISSION_ENERGY_MEV};
use crate::physics::decay_mode::DecayMode;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Geiger-Nuttall flavoured alpha energy: heavier parents release more.
pub fn alpha_energy<R: Rng + ?Sized>(z: u32, rng: &mut R) -> f64 {
    let base = if z > ALPHA_BARRIER_Z {
        f64::from(z - ALPHA_BARRIER_Z) * 0.15 + 4.0
    } else {
        2.0
    };
    let jitter = Uniform::new(0.0, 2.0).sample(rng);
    (base + jitter).max(1.0)
}

/// Flat stand-in for the continuous beta spectrum.
pub fn beta_energy<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    Uniform::new(0.5, 3.0).sample(rng)
}

pub fn gamma_energy<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    Uniform::new(0.5, 2.5).sample(rng)
}

/// Energy released (MeV) by `mode` from a parent with charge `z`, before rounding.
pub fn release_energy<R: Rng + ?Sized>(mode: DecayMode, z: u32, rng: &mut R) -> f64 {
    match mode {
        DecayMode::Alpha => alpha_energy(z, rng),
        DecayMode::BetaMinus | DecayMode::BetaPlus => beta_energy(rng),
        DecayMode::ElectronCapture => beta_energy(rng) * ELECTRON_CAPTURE_FACTOR,
        DecayMode::Gamma => gamma_energy(rng),
        DecayMode::SpontaneousFission => FISSION_ENERGY_MEV,
    }
}

pub fn round_mev(energy: f64) -> f64 {
    (energy * 100.0).round() / 100.0
}
