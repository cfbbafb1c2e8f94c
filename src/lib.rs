pub mod constants;
pub mod error;
pub mod physics;
pub mod platform;
pub mod simulation;

#[cfg(target_arch = "wasm32")]
mod bindings;

pub use error::DecayError;
pub use physics::decay_mode::DecayMode;
pub use physics::isotopes::{Isotope, IsotopeOrigin, IsotopeRecord, IsotopeTable, ModeBranch};
pub use physics::nucleus::{Nuclide, NuclideInfo};
pub use simulation::chain::{ChainConfig, ChainStep, DecayChain};
pub use simulation::engine::{DecayEngine, DecayOutcome, DecayResult};
pub use simulation::half_life::format_half_life;
pub use simulation::session::{DecaySession, Hud};
