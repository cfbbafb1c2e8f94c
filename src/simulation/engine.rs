use crate::error::DecayError;
use crate::physics::decay_mode::DecayMode;
use crate::physics::isotopes::{Isotope, IsotopeRecord, IsotopeTable, ModeBranch};
use crate::physics::nucleus::{Nuclide, NuclideInfo};
use crate::physics::particle::EmittedParticle;
use crate::simulation::chain::{ChainConfig, ChainStep, DecayChain};
use crate::simulation::energy::{release_energy, round_mev};
use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;

/// Everything a renderer needs to animate one decay.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecayResult {
    pub parent: NuclideInfo,
    pub daughter: NuclideInfo,
    pub mode: DecayMode,
    pub particle: EmittedParticle,
    #[serde(rename = "energyMeV")]
    pub energy_mev: f64,
    /// Half-life of the parent, in seconds.
    pub half_life: f64,
    pub description: String,
    pub equation: String,
    #[serde(skip)]
    parent_nuclide: Nuclide,
    #[serde(skip)]
    daughter_nuclide: Nuclide,
}

impl DecayResult {
    pub fn parent_nuclide(&self) -> Nuclide {
        self.parent_nuclide
    }

    pub fn daughter_nuclide(&self) -> Nuclide {
        self.daughter_nuclide
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DecayOutcome {
    Decayed(DecayResult),
    AlreadyStable,
}

impl DecayOutcome {
    pub fn decayed(self) -> Option<DecayResult> {
        match self {
            DecayOutcome::Decayed(result) => Some(result),
            DecayOutcome::AlreadyStable => None,
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, DecayOutcome::AlreadyStable)
    }
}

/// Stateless decay engine over an isotope table.
///
/// All randomness comes from the caller's generator, so a seeded RNG makes
/// every operation reproducible.
#[derive(Clone, Debug, Default)]
pub struct DecayEngine {
    table: IsotopeTable,
}

impl DecayEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: IsotopeTable) -> Self {
        Self { table }
    }

    pub fn with_custom_isotopes(records: Vec<IsotopeRecord>) -> Result<Self, DecayError> {
        Ok(Self::with_table(IsotopeTable::with_custom(records)?))
    }

    pub fn table(&self) -> &IsotopeTable {
        &self.table
    }

    pub fn classify(&self, z: u32, a: u32) -> Result<Isotope, DecayError> {
        Ok(self.classify_nuclide(Nuclide::new(z, a)?))
    }

    pub fn classify_nuclide(&self, nuclide: Nuclide) -> Isotope {
        self.table.classify(nuclide)
    }

    pub fn decay_step<R: Rng + ?Sized>(
        &self,
        z: u32,
        a: u32,
        forced: Option<DecayMode>,
        rng: &mut R,
    ) -> Result<DecayOutcome, DecayError> {
        self.decay_nuclide(Nuclide::new(z, a)?, forced, rng)
    }

    /// Single decay of `parent`, either through `forced` or a weighted draw
    /// over the isotope's branching ratios.
    pub fn decay_nuclide<R: Rng + ?Sized>(
        &self,
        parent: Nuclide,
        forced: Option<DecayMode>,
        rng: &mut R,
    ) -> Result<DecayOutcome, DecayError> {
        let isotope = self.classify_nuclide(parent);
        self.decay_isotope(parent, &isotope, forced, rng)
    }

    fn decay_isotope<R: Rng + ?Sized>(
        &self,
        parent: Nuclide,
        isotope: &Isotope,
        forced: Option<DecayMode>,
        rng: &mut R,
    ) -> Result<DecayOutcome, DecayError> {
        if isotope.stable {
            return Ok(DecayOutcome::AlreadyStable);
        }

        let mode = match forced {
            Some(mode) => {
                if !isotope.modes.iter().any(|branch| branch.mode == mode) {
                    warn!("forcing {mode} on {parent}, which does not list it");
                }
                mode
            }
            None => match select_mode(&isotope.modes, rng) {
                Some(mode) => mode,
                None => {
                    warn!("{parent} is unstable but has no decay modes; treating as stable");
                    return Ok(DecayOutcome::AlreadyStable);
                }
            },
        };

        let (daughter_z, daughter_a) = mode
            .daughter_of(parent.z(), parent.a())
            .ok_or(DecayError::InvalidNuclide {
                z: parent.z(),
                a: parent.a(),
                reason: "decay would leave the physical range",
            })?;
        let daughter = Nuclide::new(daughter_z, daughter_a)?;

        let particle = mode.particle();
        let energy_mev = round_mev(release_energy(mode, parent.z(), rng));
        let equation = format!(
            "{} → {} + {}",
            parent.notation(),
            daughter.notation(),
            particle.notation
        );
        let description = describe(mode, parent, daughter);

        debug!("{parent} --{mode}--> {daughter} ({energy_mev} MeV)");

        Ok(DecayOutcome::Decayed(DecayResult {
            parent: parent.info(),
            daughter: daughter.info(),
            mode,
            particle,
            energy_mev,
            half_life: isotope.half_life,
            description,
            equation,
            parent_nuclide: parent,
            daughter_nuclide: daughter,
        }))
    }

    pub fn build_chain<R: Rng + ?Sized>(
        &self,
        z: u32,
        a: u32,
        config: ChainConfig,
        rng: &mut R,
    ) -> Result<DecayChain, DecayError> {
        Ok(self.chain_from(Nuclide::new(z, a)?, config, rng))
    }

    /// Decays repeatedly with random mode selection until a stable nuclide
    /// or the step budget is reached. The result holds at most
    /// `max_steps + 1` nuclides.
    ///
    /// A drawn decay whose daughter falls outside the element table ends the
    /// chain early on the unannotated parent.
    pub fn chain_from<R: Rng + ?Sized>(
        &self,
        start: Nuclide,
        config: ChainConfig,
        rng: &mut R,
    ) -> DecayChain {
        let mut current = start;
        let mut isotope = self.classify_nuclide(current);
        let mut steps = vec![ChainStep::new(current, isotope.stable)];

        for _ in 0..config.max_steps {
            if isotope.stable {
                break;
            }
            let result = match self.decay_isotope(current, &isotope, None, rng) {
                Ok(DecayOutcome::Decayed(result)) => result,
                Ok(DecayOutcome::AlreadyStable) => break,
                Err(err) => {
                    warn!("{start} chain cut short at {current}: {err}");
                    break;
                }
            };
            if let Some(last) = steps.last_mut() {
                last.annotate(result.mode, result.energy_mev, result.half_life);
            }

            current = result.daughter_nuclide();
            isotope = self.classify_nuclide(current);
            steps.push(ChainStep::new(current, isotope.stable));
        }

        let chain = DecayChain::from_steps(steps);
        if chain.converged() {
            info!("{start} reached stable {current} in {} steps", chain.transitions());
        } else {
            info!(
                "{start} chain stopped at unstable {current} after {} steps",
                chain.transitions()
            );
        }
        chain
    }
}

/// Weighted draw over branching ratios. Falls back to the first listed mode
/// when the branches sum to less than the draw.
pub fn select_mode<R: Rng + ?Sized>(modes: &[ModeBranch], rng: &mut R) -> Option<DecayMode> {
    let first = modes.first()?;
    let draw: f64 = rng.gen_range(0.0..1.0);

    let mut cumulative = 0.0;
    for branch in modes {
        cumulative += branch.branch;
        if cumulative >= draw {
            return Some(branch.mode);
        }
    }

    warn!("branching ratios sum to {cumulative} < draw {draw}; using {}", first.mode);
    Some(first.mode)
}

fn describe(mode: DecayMode, parent: Nuclide, daughter: Nuclide) -> String {
    match mode {
        DecayMode::Alpha => format!(
            "{parent} emits an alpha particle (2 protons + 2 neutrons) and becomes {daughter}."
        ),
        DecayMode::BetaMinus => format!(
            "A neutron in {parent} turns into a proton, emitting an electron and an antineutrino. {parent} becomes {daughter}."
        ),
        DecayMode::BetaPlus => format!(
            "A proton in {parent} turns into a neutron, emitting a positron and a neutrino. {parent} becomes {daughter}."
        ),
        DecayMode::ElectronCapture => format!(
            "{parent} captures an inner-shell electron; a proton becomes a neutron and a neutrino escapes. {parent} becomes {daughter}."
        ),
        DecayMode::Gamma => format!(
            "{parent} releases excess energy as a gamma photon. Proton and mass numbers are unchanged."
        ),
        DecayMode::SpontaneousFission => format!(
            "{parent} splits into two lighter nuclei and free neutrons. Following one fragment: {daughter}."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Replays fixed unit-interval draws, for exercising the selection walk.
    struct ScriptedRng {
        draws: Vec<f64>,
        next: usize,
    }

    impl ScriptedRng {
        fn new(draws: &[f64]) -> Self {
            Self {
                draws: draws.to_vec(),
                next: 0,
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let draw = self.draws[self.next % self.draws.len()];
            self.next += 1;
            // Uniform f64 sampling keeps the top 52 mantissa bits.
            ((draw * (1u64 << 52) as f64) as u64) << 12
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn decayed(outcome: DecayOutcome) -> DecayResult {
        match outcome {
            DecayOutcome::Decayed(result) => result,
            DecayOutcome::AlreadyStable => panic!("expected a decay"),
        }
    }

    #[test]
    fn forced_modes_apply_exact_deltas() {
        let engine = DecayEngine::new();
        let mut rng = rng();
        let cases = [
            (DecayMode::Alpha, (92, 238), (90, 234)),
            (DecayMode::BetaMinus, (92, 238), (93, 238)),
            (DecayMode::BetaPlus, (92, 238), (91, 238)),
            (DecayMode::ElectronCapture, (92, 238), (91, 238)),
            (DecayMode::Gamma, (92, 238), (92, 238)),
            (DecayMode::SpontaneousFission, (92, 238), (46, 119)),
            (DecayMode::SpontaneousFission, (98, 251), (49, 126)),
        ];
        for (mode, (z, a), expected) in cases {
            let result = decayed(engine.decay_step(z, a, Some(mode), &mut rng).unwrap());
            assert_eq!(result.mode, mode);
            assert_eq!((result.daughter.z, result.daughter.a), expected, "{mode}");
            assert_eq!(result.particle.kind, mode);
        }
    }

    #[test]
    fn stable_nuclides_do_not_decay() {
        let engine = DecayEngine::new();
        let mut rng = rng();
        for (z, a) in [(82, 206), (6, 12), (26, 56), (50, 120)] {
            assert!(engine.classify(z, a).unwrap().stable);
            let outcome = engine.decay_step(z, a, None, &mut rng).unwrap();
            assert!(outcome.is_stable());
            let forced = engine.decay_step(z, a, Some(DecayMode::Alpha), &mut rng).unwrap();
            assert_eq!(forced, DecayOutcome::AlreadyStable);
        }
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let engine = DecayEngine::new();
        let mut rng = rng();
        assert!(matches!(engine.classify(0, 4), Err(DecayError::InvalidNuclide { .. })));
        assert!(matches!(
            engine.decay_step(92, 80, None, &mut rng),
            Err(DecayError::InvalidNuclide { .. })
        ));
        assert!(matches!(
            engine.build_chain(119, 300, ChainConfig::default(), &mut rng),
            Err(DecayError::InvalidNuclide { .. })
        ));
    }

    #[test]
    fn decay_past_the_table_edge_is_an_error() {
        // Beta-minus from oganesson would need Z = 119.
        let engine = DecayEngine::new();
        let mut rng = rng();
        assert!(matches!(
            engine.decay_step(118, 294, Some(DecayMode::BetaMinus), &mut rng),
            Err(DecayError::InvalidNuclide { z: 119, .. })
        ));
    }

    #[test]
    fn chains_stop_short_instead_of_leaving_the_table() {
        // Oganesson carries an estimated 5% beta-minus branch toward Z = 119.
        let engine = DecayEngine::new();
        let config = ChainConfig::default();
        let mut cut_short = 0;
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let chain = engine.build_chain(118, 294, config, &mut rng).unwrap();
            let steps = chain.steps();
            assert!(steps.iter().all(|s| Nuclide::new(s.z, s.a).is_ok()), "seed {seed}");
            assert!(steps[..steps.len() - 1].iter().all(|s| s.is_annotated()));
            assert!(!chain.terminal().unwrap().is_annotated());
            if !chain.converged() && chain.len() <= config.max_steps {
                cut_short += 1;
            }
        }
        assert!(cut_short > 0);
    }

    #[test]
    fn mass_starved_start_still_yields_a_chain() {
        // Alpha from (100, 100) would give A < Z.
        let engine = DecayEngine::new();
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let chain = engine
                .build_chain(100, 100, ChainConfig::default(), &mut rng)
                .unwrap();
            assert_eq!((chain.steps()[0].z, chain.steps()[0].a), (100, 100));
            assert!(chain.steps().iter().all(|s| s.a >= s.z && s.z <= 118));
            assert!(!chain.terminal().unwrap().is_annotated());
        }
    }

    #[test]
    fn result_carries_equation_and_parent_half_life() {
        let engine = DecayEngine::new();
        let mut rng = rng();
        let result = decayed(engine.decay_step(92, 238, None, &mut rng).unwrap());
        assert_eq!(result.mode, DecayMode::Alpha);
        assert_eq!(result.equation, "238/92 U → 234/90 Th + 4/2 He");
        assert_eq!(result.parent.name, "Uranium");
        assert_eq!(result.daughter.symbol, "Th");
        assert_eq!(
            result.half_life,
            engine.classify(92, 238).unwrap().half_life
        );
        assert!((5.5..7.5).contains(&result.energy_mev));
        assert_eq!(round_mev(result.energy_mev), result.energy_mev);
        assert!(result.description.contains("U-238"));
        assert!(result.description.contains("Th-234"));
    }

    #[test]
    fn result_serializes_with_visualizer_keys() {
        let engine = DecayEngine::new();
        let result = decayed(engine.decay_step(6, 14, None, &mut rng()).unwrap());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["parent"]["Z"], 6);
        assert_eq!(json["daughter"]["A"], 14);
        assert_eq!(json["daughter"]["N"], 7);
        assert_eq!(json["mode"], "beta-");
        assert_eq!(json["particle"]["type"], "beta-");
        assert_eq!(json["energyMeV"], result.energy_mev);
        assert!(json.get("parentNuclide").is_none());
    }

    #[test]
    fn weighted_selection_walks_cumulative_branches() {
        let modes = [
            ModeBranch::new(DecayMode::Alpha, 0.6),
            ModeBranch::new(DecayMode::BetaMinus, 0.4),
        ];
        assert_eq!(select_mode(&modes, &mut ScriptedRng::new(&[0.1])), Some(DecayMode::Alpha));
        assert_eq!(select_mode(&modes, &mut ScriptedRng::new(&[0.59])), Some(DecayMode::Alpha));
        assert_eq!(
            select_mode(&modes, &mut ScriptedRng::new(&[0.61])),
            Some(DecayMode::BetaMinus)
        );
        assert_eq!(select_mode(&[], &mut ScriptedRng::new(&[0.5])), None);
    }

    #[test]
    fn short_branch_lists_fall_back_to_first_mode() {
        let modes = [
            ModeBranch::new(DecayMode::BetaPlus, 0.3),
            ModeBranch::new(DecayMode::ElectronCapture, 0.3),
        ];
        assert_eq!(
            select_mode(&modes, &mut ScriptedRng::new(&[0.9])),
            Some(DecayMode::BetaPlus)
        );
    }

    #[test]
    fn branching_ratios_hold_in_aggregate() {
        let engine = DecayEngine::with_custom_isotopes(vec![IsotopeRecord::radioactive(
            88,
            230,
            100.0,
            vec![
                ModeBranch::new(DecayMode::Alpha, 0.6),
                ModeBranch::new(DecayMode::BetaMinus, 0.4),
            ],
        )])
        .unwrap();
        let mut rng = rng();

        let trials = 10_000;
        let alphas = (0..trials)
            .filter(|_| {
                let result = decayed(engine.decay_step(88, 230, None, &mut rng).unwrap());
                result.mode == DecayMode::Alpha
            })
            .count();
        let fraction = alphas as f64 / trials as f64;
        assert!((fraction - 0.6).abs() < 0.05, "alpha fraction {fraction}");
    }

    #[test]
    fn uranium_238_chain_starts_with_thorium_234() {
        let engine = DecayEngine::new();
        let mut rng = rng();
        let chain = engine
            .build_chain(92, 238, ChainConfig::default(), &mut rng)
            .unwrap();
        let steps = chain.steps();
        assert_eq!((steps[0].z, steps[0].a), (92, 238));
        assert_eq!(steps[0].mode, Some(DecayMode::Alpha));
        assert_eq!((steps[1].z, steps[1].a), (90, 234));
        assert_eq!(steps[1].mode, Some(DecayMode::BetaMinus));
    }

    #[test]
    fn uranium_238_reaches_lead_206() {
        let engine = DecayEngine::new();
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let chain = engine
                .build_chain(92, 238, ChainConfig::default(), &mut rng)
                .unwrap();
            let terminal = chain.terminal().unwrap();
            assert!(chain.converged(), "seed {seed}");
            assert_eq!((terminal.z, terminal.a), (82, 206), "seed {seed}");
            assert!(terminal.mode.is_none());
            assert!(chain.steps()[..chain.len() - 1].iter().all(|s| s.is_annotated()));
        }
    }

    #[test]
    fn thorium_232_branches_at_bismuth_212_but_ends_at_lead_208() {
        let engine = DecayEngine::new();
        let mut via_alpha = 0;
        for seed in 0..40 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let chain = engine
                .build_chain(90, 232, ChainConfig::default(), &mut rng)
                .unwrap();
            let terminal = chain.terminal().unwrap();
            assert_eq!((terminal.z, terminal.a), (82, 208));
            if chain.steps().iter().any(|s| (s.z, s.a) == (81, 208)) {
                via_alpha += 1;
            }
        }
        assert!(via_alpha > 0 && via_alpha < 40);
    }

    #[test]
    fn chains_respect_the_step_budget() {
        let engine = DecayEngine::new();
        let mut rng = rng();
        for (z, a) in [(92, 238), (98, 252), (10, 30), (30, 50), (110, 281), (6, 14)] {
            let config = ChainConfig::default();
            let chain = engine.build_chain(z, a, config, &mut rng).unwrap();
            assert!(chain.len() <= config.max_steps + 1);
            assert!(chain.converged() || chain.len() == config.max_steps + 1);
        }

        let truncated = engine
            .build_chain(92, 238, ChainConfig::new(3), &mut rng)
            .unwrap();
        assert_eq!(truncated.len(), 4);
        assert!(!truncated.converged());
        assert!(truncated.terminal().unwrap().mode.is_none());
        assert_eq!(truncated.transitions(), 3);
    }

    #[test]
    fn stable_start_is_a_single_element_chain() {
        let engine = DecayEngine::new();
        let chain = engine
            .build_chain(82, 208, ChainConfig::default(), &mut rng())
            .unwrap();
        assert_eq!(chain.len(), 1);
        assert!(chain.converged());
    }

    #[test]
    fn zero_budget_returns_only_the_start() {
        let engine = DecayEngine::new();
        let chain = engine
            .build_chain(92, 238, ChainConfig::new(0), &mut rng())
            .unwrap();
        assert_eq!(chain.len(), 1);
        assert!(!chain.converged());
    }
}
