use crate::physics::decay_mode::DecayMode;
use serde::Serialize;

/// What leaves the nucleus during a decay step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EmittedParticle {
    /// Short symbolic label for animations (`α`, `β⁻`, ...).
    pub symbol: &'static str,
    pub name: &'static str,
    /// Right-hand side of the nuclear equation.
    pub notation: &'static str,
    #[serde(rename = "type")]
    pub kind: DecayMode,
}

impl EmittedParticle {
    pub const fn for_mode(mode: DecayMode) -> Self {
        match mode {
            DecayMode::Alpha => Self {
                symbol: "α",
                name: "Alpha particle (He-4 nucleus)",
                notation: "4/2 He",
                kind: mode,
            },
            DecayMode::BetaMinus => Self {
                symbol: "β⁻",
                name: "Electron + antineutrino",
                notation: "0/-1 e + ν̄",
                kind: mode,
            },
            DecayMode::BetaPlus => Self {
                symbol: "β⁺",
                name: "Positron + neutrino",
                notation: "0/+1 e + ν",
                kind: mode,
            },
            DecayMode::ElectronCapture => Self {
                symbol: "ν",
                name: "Neutrino",
                notation: "ν",
                kind: mode,
            },
            DecayMode::Gamma => Self {
                symbol: "γ",
                name: "Gamma photon",
                notation: "γ",
                kind: mode,
            },
            DecayMode::SpontaneousFission => Self {
                symbol: "SF",
                name: "Fission fragment + neutrons",
                notation: "fission fragments + n",
                kind: mode,
            },
        }
    }
}
