use crate::constants::DEFAULT_MAX_STEPS;
use crate::physics::decay_mode::DecayMode;
use crate::physics::nucleus::Nuclide;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainConfig {
    pub max_steps: usize,
}

impl ChainConfig {
    pub const fn new(max_steps: usize) -> Self {
        Self { max_steps }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STEPS)
    }
}

/// One nuclide in a decay chain.
///
/// `mode`, `energy_mev` and `half_life` describe the transition out of this
/// nuclide and stay `None` on the last element.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStep {
    #[serde(rename = "Z")]
    pub z: u32,
    #[serde(rename = "A")]
    pub a: u32,
    pub symbol: &'static str,
    pub name: &'static str,
    pub stable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<DecayMode>,
    #[serde(rename = "energyMeV", skip_serializing_if = "Option::is_none")]
    pub energy_mev: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_life: Option<f64>,
}

impl ChainStep {
    pub fn new(nuclide: Nuclide, stable: bool) -> Self {
        let element = nuclide.element();
        Self {
            z: nuclide.z(),
            a: nuclide.a(),
            symbol: element.symbol(),
            name: element.name(),
            stable,
            mode: None,
            energy_mev: None,
            half_life: None,
        }
    }

    pub fn annotate(&mut self, mode: DecayMode, energy_mev: f64, half_life: f64) {
        self.mode = Some(mode);
        self.energy_mev = Some(energy_mev);
        self.half_life = Some(half_life);
    }

    pub fn is_annotated(&self) -> bool {
        self.mode.is_some()
    }
}

/// Linear decay path from a starting nuclide.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DecayChain {
    steps: Vec<ChainStep>,
}

impl DecayChain {
    pub(crate) fn from_steps(steps: Vec<ChainStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn terminal(&self) -> Option<&ChainStep> {
        self.steps.last()
    }

    /// False when the step budget ran out on an unstable nuclide.
    pub fn converged(&self) -> bool {
        self.terminal().is_some_and(|step| step.stable)
    }

    pub fn transitions(&self) -> usize {
        self.steps.iter().filter(|step| step.is_annotated()).count()
    }

    pub fn total_energy_mev(&self) -> f64 {
        self.steps.iter().filter_map(|step| step.energy_mev).sum()
    }
}
