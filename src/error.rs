use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecayError {
    #[error("invalid nuclide Z={z}, A={a}: {reason}")]
    InvalidNuclide { z: u32, a: u32, reason: &'static str },
    #[error("unknown decay mode {0:?} (expected alpha, beta-, beta+, ec, gamma or sf)")]
    UnknownDecayMode(String),
    #[error("invalid isotope data for Z={z}, A={a}: {reason}")]
    InvalidIsotopeData { z: u32, a: u32, reason: String },
    #[error("unknown preset {0:?}")]
    UnknownPreset(String),
}
