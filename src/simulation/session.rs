use crate::error::DecayError;
use crate::physics::decay_mode::DecayMode;
use crate::physics::isotopes::{Isotope, IsotopeRecord};
use crate::physics::nucleus::Nuclide;
use crate::simulation::chain::{ChainConfig, DecayChain};
use crate::simulation::engine::{DecayEngine, DecayOutcome, DecayResult};
use crate::simulation::half_life::format_half_life;
use crate::simulation::presets::find_preset;
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

const DEFAULT_SEED: u64 = 42;
const URANIUM_238: Nuclide = Nuclide::new_unchecked(92, 238);

/// Read-outs for the heads-up display.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hud {
    #[serde(rename = "Z")]
    pub z: u32,
    #[serde(rename = "N")]
    pub n: u32,
    #[serde(rename = "A")]
    pub a: u32,
    pub symbol: &'static str,
    pub name: &'static str,
    pub half_life: String,
    pub stable: bool,
}

/// Controller state behind the decay page: the loaded nuclide, where the
/// user has stepped to, and the RNG that drives the steps.
pub struct DecaySession {
    engine: DecayEngine,
    rng: ChaCha8Rng,
    start: Nuclide,
    current: Nuclide,
    history: Vec<DecayResult>,
}

impl DecaySession {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_engine(DecayEngine::new(), seed)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_entropy() -> Self {
        let mut session = Self::new();
        session.rng = ChaCha8Rng::from_entropy();
        session
    }

    pub fn with_engine(engine: DecayEngine, seed: u64) -> Self {
        let start = URANIUM_238;
        Self {
            engine,
            rng: ChaCha8Rng::seed_from_u64(seed),
            start,
            current: start,
            history: Vec::new(),
        }
    }

    pub fn engine(&self) -> &DecayEngine {
        &self.engine
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Replaces the engine's custom isotope overlay. The session keeps its
    /// position; the next step uses the new data.
    pub fn set_custom_isotopes(&mut self, records: Vec<IsotopeRecord>) -> Result<(), DecayError> {
        self.engine = DecayEngine::with_custom_isotopes(records)?;
        info!("loaded {} custom isotopes", self.engine.table().custom_len());
        Ok(())
    }

    pub fn load(&mut self, z: u32, a: u32) -> Result<Isotope, DecayError> {
        let nuclide = Nuclide::new(z, a)?;
        self.start = nuclide;
        self.current = nuclide;
        self.history.clear();
        Ok(self.engine.classify_nuclide(nuclide))
    }

    pub fn load_preset(&mut self, label: &str) -> Result<Isotope, DecayError> {
        let preset =
            find_preset(label).ok_or_else(|| DecayError::UnknownPreset(label.to_owned()))?;
        self.load(preset.z, preset.a)
    }

    pub fn reset(&mut self) {
        self.current = self.start;
        self.history.clear();
    }

    pub fn step(&mut self) -> Result<DecayOutcome, DecayError> {
        self.advance(None)
    }

    pub fn step_with(&mut self, mode: DecayMode) -> Result<DecayOutcome, DecayError> {
        self.advance(Some(mode))
    }

    /// Steps until the current nuclide is stable or `max_steps` decays have
    /// happened. Returns how many decays were applied. A decay that would
    /// leave the element table stops play on the current nuclide.
    pub fn auto_play(&mut self, max_steps: usize) -> usize {
        let mut taken = 0;
        while taken < max_steps {
            match self.step() {
                Ok(DecayOutcome::Decayed(_)) => taken += 1,
                Ok(DecayOutcome::AlreadyStable) => break,
                Err(err) => {
                    warn!("auto-play stopped at {}: {err}", self.current);
                    break;
                }
            }
        }
        taken
    }

    /// Fresh chain from the current nuclide; does not move the session.
    pub fn chain(&mut self, config: ChainConfig) -> DecayChain {
        self.engine.chain_from(self.current, config, &mut self.rng)
    }

    pub fn start(&self) -> Nuclide {
        self.start
    }

    pub fn current(&self) -> Nuclide {
        self.current
    }

    pub fn history(&self) -> &[DecayResult] {
        &self.history
    }

    pub fn hud(&self) -> Hud {
        let isotope = self.engine.classify_nuclide(self.current);
        let info = self.current.info();
        Hud {
            z: info.z,
            n: info.n,
            a: info.a,
            symbol: info.symbol,
            name: info.name,
            half_life: format_half_life(isotope.half_life),
            stable: isotope.stable,
        }
    }

    fn advance(&mut self, forced: Option<DecayMode>) -> Result<DecayOutcome, DecayError> {
        let outcome = self
            .engine
            .decay_nuclide(self.current, forced, &mut self.rng)?;
        if let DecayOutcome::Decayed(result) = &outcome {
            self.current = result.daughter_nuclide();
            self.history.push(result.clone());
        }
        Ok(outcome)
    }
}

impl Default for DecaySession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::isotopes::ModeBranch;

    #[test]
    fn starts_on_uranium_238() {
        let session = DecaySession::new();
        assert_eq!(session.current().label(), "U-238");
        let hud = session.hud();
        assert_eq!((hud.z, hud.n, hud.a), (92, 146, 238));
        assert_eq!(hud.half_life, "4.5 Gyr");
        assert!(!hud.stable);
    }

    #[test]
    fn stepping_moves_and_records_history() {
        let mut session = DecaySession::with_seed(3);
        session.load_preset("Po-210").unwrap();
        let outcome = session.step().unwrap();
        assert!(!outcome.is_stable());
        assert_eq!(session.current().label(), "Pb-206");
        assert_eq!(session.history().len(), 1);

        assert!(session.step().unwrap().is_stable());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.hud().half_life, "Stable");

        session.reset();
        assert_eq!(session.current().label(), "Po-210");
        assert!(session.history().is_empty());
    }

    #[test]
    fn forced_step_uses_the_requested_mode() {
        let mut session = DecaySession::new();
        session.load(83, 212).unwrap();
        let result = session
            .step_with(DecayMode::Alpha)
            .unwrap()
            .decayed()
            .unwrap();
        assert_eq!(result.mode, DecayMode::Alpha);
        assert_eq!(session.current().label(), "Tl-208");
    }

    #[test]
    fn auto_play_runs_to_a_stable_end() {
        let mut session = DecaySession::with_seed(11);
        session.load_preset("U-235").unwrap();
        let taken = session.auto_play(50);
        assert_eq!(taken, session.history().len());
        assert_eq!(session.current().label(), "Pb-207");
        assert!(session.hud().stable);
    }

    #[test]
    fn auto_play_honours_its_budget() {
        let mut session = DecaySession::new();
        assert_eq!(session.auto_play(2), 2);
        assert_eq!(session.current().label(), "Pa-234");
    }

    #[test]
    fn auto_play_stops_at_the_table_edge() {
        let mut halted = 0;
        for seed in 0..200 {
            let mut session = DecaySession::with_seed(seed);
            session.load(118, 294).unwrap();
            let taken = session.auto_play(50);
            assert_eq!(taken, session.history().len());
            if taken == 0 {
                assert_eq!(session.current().label(), "Og-294");
                assert!(!session.hud().stable);
                halted += 1;
            }
        }
        assert!(halted > 0);
    }

    #[test]
    fn same_seed_same_chain() {
        let mut first = DecaySession::with_seed(9);
        let mut second = DecaySession::with_seed(9);
        first.load_preset("Th-232").unwrap();
        second.load_preset("Th-232").unwrap();
        assert_eq!(
            first.chain(ChainConfig::default()),
            second.chain(ChainConfig::default())
        );
    }

    #[test]
    fn rejects_bad_loads() {
        let mut session = DecaySession::new();
        assert!(matches!(session.load(0, 0), Err(DecayError::InvalidNuclide { .. })));
        assert!(matches!(
            session.load_preset("Unobtainium-1"),
            Err(DecayError::UnknownPreset(_))
        ));
        assert_eq!(session.current().label(), "U-238");
    }

    #[test]
    fn custom_isotopes_take_effect_on_next_step() {
        let mut session = DecaySession::new();
        session
            .set_custom_isotopes(vec![IsotopeRecord::radioactive(
                26,
                56,
                1.0,
                vec![ModeBranch::new(DecayMode::BetaPlus, 1.0)],
            )])
            .unwrap();
        session.load(26, 56).unwrap();
        let result = session.step().unwrap().decayed().unwrap();
        assert_eq!(result.daughter.symbol, "Mn");
    }
}
