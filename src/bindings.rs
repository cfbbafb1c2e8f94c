//! JavaScript bindings for the decay engine.
//!
//! ```javascript
//! import init, { build_chain, Simulator } from 'decay-sandbox';
//!
//! await init();
//!
//! const chain = build_chain(92, 238, undefined, BigInt(Date.now()));
//! console.log(chain.map(step => `${step.symbol}-${step.a}`).join(' → '));
//!
//! const sim = new Simulator(BigInt(Date.now()));
//! sim.load_preset('Bi-212');
//! const result = sim.step(); // null once the nucleus is stable
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

use crate::physics::decay_mode::DecayMode;
use crate::physics::isotopes::IsotopeRecord;
use crate::simulation::chain::ChainConfig;
use crate::simulation::engine::{DecayEngine, DecayOutcome};
use crate::simulation::half_life;
use crate::simulation::presets::presets as preset_list;
use crate::simulation::session::DecaySession;

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn outcome_to_js(outcome: DecayOutcome) -> Result<JsValue, JsError> {
    match outcome {
        DecayOutcome::Decayed(result) => to_js(&result),
        DecayOutcome::AlreadyStable => Ok(JsValue::NULL),
    }
}

fn parse_mode(mode: Option<String>) -> Result<Option<DecayMode>, JsError> {
    Ok(mode.map(|tag| tag.parse::<DecayMode>()).transpose()?)
}

fn chain_config(max_steps: Option<u32>) -> ChainConfig {
    max_steps
        .map(|steps| ChainConfig::new(steps as usize))
        .unwrap_or_default()
}

// =============================================================================
// Stateless engine calls
// =============================================================================

/// Isotope record for `(z, a)`: table data when known, heuristic otherwise.
#[wasm_bindgen]
pub fn classify(z: u32, a: u32) -> Result<JsValue, JsError> {
    let isotope = DecayEngine::new().classify(z, a)?;
    to_js(&isotope)
}

/// One decay step. Returns `null` for stable nuclides.
///
/// # Arguments
/// * `forced_mode` - optional mode tag (`alpha`, `beta-`, `beta+`, `ec`, `gamma`, `sf`)
/// * `seed` - seed for mode selection and energy draws
#[wasm_bindgen]
pub fn decay_step(
    z: u32,
    a: u32,
    forced_mode: Option<String>,
    seed: u64,
) -> Result<JsValue, JsError> {
    let forced = parse_mode(forced_mode)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let outcome = DecayEngine::new().decay_step(z, a, forced, &mut rng)?;
    outcome_to_js(outcome)
}

/// Full decay chain as an array of steps (default budget 50).
#[wasm_bindgen]
pub fn build_chain(
    z: u32,
    a: u32,
    max_steps: Option<u32>,
    seed: u64,
) -> Result<JsValue, JsError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let chain = DecayEngine::new().build_chain(z, a, chain_config(max_steps), &mut rng)?;
    to_js(&chain)
}

#[wasm_bindgen]
pub fn format_half_life(seconds: f64) -> String {
    half_life::format_half_life(seconds)
}

#[wasm_bindgen]
pub fn presets() -> Result<JsValue, JsError> {
    to_js(&preset_list())
}

// =============================================================================
// Stateful simulator for the decay page
// =============================================================================

#[wasm_bindgen]
pub struct Simulator {
    session: DecaySession,
}

#[wasm_bindgen]
impl Simulator {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Simulator {
        Simulator {
            session: DecaySession::with_seed(seed),
        }
    }

    pub fn load(&mut self, z: u32, a: u32) -> Result<JsValue, JsError> {
        let isotope = self.session.load(z, a)?;
        to_js(&isotope)
    }

    pub fn load_preset(&mut self, label: &str) -> Result<JsValue, JsError> {
        let isotope = self.session.load_preset(label)?;
        to_js(&isotope)
    }

    /// Replaces custom isotope data; rejects the whole set if any record is invalid.
    pub fn set_custom_isotopes(&mut self, records: JsValue) -> Result<(), JsError> {
        let records: Vec<IsotopeRecord> = from_js(records)?;
        self.session.set_custom_isotopes(records)?;
        Ok(())
    }

    pub fn step(&mut self) -> Result<JsValue, JsError> {
        let outcome = self.session.step()?;
        outcome_to_js(outcome)
    }

    pub fn step_with(&mut self, mode: &str) -> Result<JsValue, JsError> {
        let mode: DecayMode = mode.parse()?;
        let outcome = self.session.step_with(mode)?;
        outcome_to_js(outcome)
    }

    pub fn auto_play(&mut self, max_steps: u32) -> u32 {
        self.session.auto_play(max_steps as usize) as u32
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn reseed(&mut self, seed: u64) {
        self.session.reseed(seed);
    }

    pub fn chain(&mut self, max_steps: Option<u32>) -> Result<JsValue, JsError> {
        let chain = self.session.chain(chain_config(max_steps));
        to_js(&chain)
    }

    pub fn hud(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.hud())
    }

    pub fn history(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.history())
    }
}
