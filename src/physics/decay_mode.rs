use crate::error::DecayError;
use crate::physics::particle::EmittedParticle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nuclear decay modes understood by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecayMode {
    #[serde(rename = "alpha")]
    Alpha,
    #[serde(rename = "beta-")]
    BetaMinus,
    #[serde(rename = "beta+")]
    BetaPlus,
    #[serde(rename = "ec")]
    ElectronCapture,
    #[serde(rename = "gamma")]
    Gamma,
    #[serde(rename = "sf")]
    SpontaneousFission,
}

impl DecayMode {
    pub const ALL: [DecayMode; 6] = [
        DecayMode::Alpha,
        DecayMode::BetaMinus,
        DecayMode::BetaPlus,
        DecayMode::ElectronCapture,
        DecayMode::Gamma,
        DecayMode::SpontaneousFission,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            DecayMode::Alpha => "alpha",
            DecayMode::BetaMinus => "beta-",
            DecayMode::BetaPlus => "beta+",
            DecayMode::ElectronCapture => "ec",
            DecayMode::Gamma => "gamma",
            DecayMode::SpontaneousFission => "sf",
        }
    }

    /// Daughter `(Z, A)` for a parent `(z, a)`.
    ///
    /// Charge and mass deltas are exact except for fission, which keeps a
    /// single symmetric fragment at `(round(Z/2), round(A/2))`. Returns `None`
    /// when the transition would leave the physical range (e.g. alpha from a
    /// nucleus lighter than helium).
    pub fn daughter_of(&self, z: u32, a: u32) -> Option<(u32, u32)> {
        match self {
            DecayMode::Alpha => Some((z.checked_sub(2)?, a.checked_sub(4)?)),
            DecayMode::BetaMinus => Some((z + 1, a)),
            DecayMode::BetaPlus | DecayMode::ElectronCapture => Some((z.checked_sub(1)?, a)),
            DecayMode::Gamma => Some((z, a)),
            DecayMode::SpontaneousFission => Some((z.div_ceil(2), a.div_ceil(2))),
        }
    }

    pub fn particle(&self) -> EmittedParticle {
        EmittedParticle::for_mode(*self)
    }
}

impl fmt::Display for DecayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

impl FromStr for DecayMode {
    type Err = DecayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        DecayMode::ALL
            .into_iter()
            .find(|mode| mode.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| DecayError::UnknownDecayMode(s.to_owned()))
    }
}
