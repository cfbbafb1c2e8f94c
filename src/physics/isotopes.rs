use crate::constants::{
    DAY, DRIP_MARGIN, HEAVY_NUCLEUS_MIN_Z, HOUR, LIGHT_NUCLEUS_MAX_Z, MINUTE, NZ_SLOPE_PER_PROTON,
    STABILITY_BAND, YEAR,
};
use crate::error::DecayError;
use crate::physics::decay_mode::DecayMode;
use crate::physics::nucleus::Nuclide;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One decay channel of an isotope and its branching ratio.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeBranch {
    #[serde(rename = "type")]
    pub mode: DecayMode,
    pub branch: f64,
}

impl ModeBranch {
    pub const fn new(mode: DecayMode, branch: f64) -> Self {
        Self { mode, branch }
    }
}

/// Isotope data as stored in the reference table or supplied by a caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsotopeRecord {
    #[serde(rename = "Z", alias = "z")]
    pub z: u32,
    #[serde(rename = "A", alias = "a")]
    pub a: u32,
    /// Seconds; `f64::INFINITY` for stable nuclides.
    pub half_life: f64,
    pub stable: bool,
    #[serde(default)]
    pub modes: Vec<ModeBranch>,
}

impl IsotopeRecord {
    pub fn stable(z: u32, a: u32) -> Self {
        Self {
            z,
            a,
            half_life: f64::INFINITY,
            stable: true,
            modes: Vec::new(),
        }
    }

    pub fn radioactive(z: u32, a: u32, half_life: f64, modes: Vec<ModeBranch>) -> Self {
        Self {
            z,
            a,
            half_life,
            stable: false,
            modes,
        }
    }

    fn validate(&self) -> Result<(), DecayError> {
        Nuclide::new(self.z, self.a)?;
        let invalid = |reason: String| DecayError::InvalidIsotopeData {
            z: self.z,
            a: self.a,
            reason,
        };

        if self.stable {
            if !self.modes.is_empty() {
                return Err(invalid("stable isotope lists decay modes".into()));
            }
            if self.half_life != f64::INFINITY {
                return Err(invalid("stable isotope must have an infinite half-life".into()));
            }
            return Ok(());
        }

        if self.modes.is_empty() {
            return Err(invalid("radioactive isotope has no decay modes".into()));
        }
        if !(self.half_life.is_finite() && self.half_life > 0.0) {
            return Err(invalid(format!(
                "half-life must be positive and finite, got {}",
                self.half_life
            )));
        }
        for branch in &self.modes {
            if !(branch.branch > 0.0 && branch.branch <= 1.0) {
                return Err(invalid(format!(
                    "branch for {} must lie in (0, 1], got {}",
                    branch.mode, branch.branch
                )));
            }
        }
        let total: f64 = self.modes.iter().map(|branch| branch.branch).sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(invalid(format!("branching ratios sum to {total}, expected 1")));
        }
        Ok(())
    }
}

/// Where a classification came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IsotopeOrigin {
    Reference,
    Custom,
    Estimated,
}

/// Result of classifying a nuclide.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Isotope {
    #[serde(rename = "Z")]
    pub z: u32,
    #[serde(rename = "A")]
    pub a: u32,
    pub half_life: f64,
    pub stable: bool,
    pub modes: Vec<ModeBranch>,
    pub origin: IsotopeOrigin,
}

impl Isotope {
    fn from_known(known: &KnownIsotope) -> Self {
        Self {
            z: known.z,
            a: known.a,
            half_life: known.half_life,
            stable: known.stable,
            modes: known.modes.to_vec(),
            origin: IsotopeOrigin::Reference,
        }
    }

    fn from_record(record: &IsotopeRecord) -> Self {
        Self {
            z: record.z,
            a: record.a,
            half_life: record.half_life,
            stable: record.stable,
            modes: record.modes.clone(),
            origin: IsotopeOrigin::Custom,
        }
    }
}

/// Reference data overlaid with optional caller-supplied records.
#[derive(Clone, Debug, Default)]
pub struct IsotopeTable {
    custom: HashMap<(u32, u32), IsotopeRecord>,
}

impl IsotopeTable {
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Validates every record up front; a single bad record rejects the set.
    pub fn with_custom(records: Vec<IsotopeRecord>) -> Result<Self, DecayError> {
        let mut custom = HashMap::with_capacity(records.len());
        for record in records {
            record.validate()?;
            let key = (record.z, record.a);
            if custom.insert(key, record).is_some() {
                return Err(DecayError::InvalidIsotopeData {
                    z: key.0,
                    a: key.1,
                    reason: "duplicate record".into(),
                });
            }
        }
        Ok(Self { custom })
    }

    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }

    /// Table lookup only; `None` means the nuclide would be estimated.
    pub fn lookup(&self, nuclide: Nuclide) -> Option<Isotope> {
        let key = (nuclide.z(), nuclide.a());
        if let Some(record) = self.custom.get(&key) {
            return Some(Isotope::from_record(record));
        }
        REFERENCE_ISOTOPES
            .iter()
            .find(|known| (known.z, known.a) == key)
            .map(Isotope::from_known)
    }

    /// Total over valid nuclides: table data when known, heuristics otherwise.
    pub fn classify(&self, nuclide: Nuclide) -> Isotope {
        self.lookup(nuclide).unwrap_or_else(|| estimate(nuclide))
    }
}

/// N/Z ratio a stable nucleus of this charge is expected to have.
pub fn expected_nz_ratio(z: u32) -> f64 {
    if z <= LIGHT_NUCLEUS_MAX_Z {
        1.0
    } else {
        1.0 + NZ_SLOPE_PER_PROTON * f64::from(z - LIGHT_NUCLEUS_MAX_Z)
    }
}

/// Heuristic classification for nuclides missing from the table.
pub fn estimate(nuclide: Nuclide) -> Isotope {
    let z = nuclide.z();
    let ratio = nuclide.nz_ratio();
    let expected = expected_nz_ratio(z);
    let deviation = ratio - expected;
    let instability = deviation.abs();
    let heavy = z >= HEAVY_NUCLEUS_MIN_Z;

    if instability < STABILITY_BAND && !heavy {
        return Isotope {
            z,
            a: nuclide.a(),
            half_life: f64::INFINITY,
            stable: true,
            modes: Vec::new(),
            origin: IsotopeOrigin::Estimated,
        };
    }

    let modes = if heavy {
        vec![
            ModeBranch::new(DecayMode::Alpha, 0.95),
            ModeBranch::new(DecayMode::BetaMinus, 0.05),
        ]
    } else if deviation > DRIP_MARGIN {
        vec![ModeBranch::new(DecayMode::BetaMinus, 1.0)]
    } else if deviation < -DRIP_MARGIN {
        vec![
            ModeBranch::new(DecayMode::BetaPlus, 0.7),
            ModeBranch::new(DecayMode::ElectronCapture, 0.3),
        ]
    } else {
        vec![
            ModeBranch::new(DecayMode::BetaMinus, 0.5),
            ModeBranch::new(DecayMode::BetaPlus, 0.5),
        ]
    };

    let heavy_factor = if heavy { 1e8 } else { 1.0 };
    let half_life = 10f64.powf(6.0 - instability * 20.0) * heavy_factor;

    Isotope {
        z,
        a: nuclide.a(),
        half_life,
        stable: false,
        modes,
        origin: IsotopeOrigin::Estimated,
    }
}

struct KnownIsotope {
    z: u32,
    a: u32,
    half_life: f64,
    stable: bool,
    modes: &'static [ModeBranch],
}

impl KnownIsotope {
    const fn stable(z: u32, a: u32) -> Self {
        Self {
            z,
            a,
            half_life: f64::INFINITY,
            stable: true,
            modes: &[],
        }
    }

    const fn decays(z: u32, a: u32, half_life: f64, modes: &'static [ModeBranch]) -> Self {
        Self {
            z,
            a,
            half_life,
            stable: false,
            modes,
        }
    }
}

macro_rules! modes {
    ($($mode:ident => $branch:expr),+ $(,)?) => {
        &[$(ModeBranch { mode: DecayMode::$mode, branch: $branch }),+]
    };
}

const ALPHA: &[ModeBranch] = modes![Alpha => 1.0];
const BETA_MINUS: &[ModeBranch] = modes![BetaMinus => 1.0];
const BETA_PLUS: &[ModeBranch] = modes![BetaPlus => 1.0];
const EC: &[ModeBranch] = modes![ElectronCapture => 1.0];

#[rustfmt::skip]
static REFERENCE_ISOTOPES: &[KnownIsotope] = &[
    // Light and medium nuclides
    KnownIsotope::stable(1, 1),
    KnownIsotope::stable(1, 2),
    KnownIsotope::decays(1, 3, 12.32 * YEAR, BETA_MINUS),
    KnownIsotope::stable(2, 3),
    KnownIsotope::stable(2, 4),
    KnownIsotope::stable(3, 6),
    KnownIsotope::stable(3, 7),
    KnownIsotope::decays(4, 7, 53.22 * DAY, EC),
    KnownIsotope::stable(4, 9),
    KnownIsotope::stable(5, 10),
    KnownIsotope::stable(5, 11),
    KnownIsotope::decays(6, 11, 20.36 * MINUTE, modes![BetaPlus => 0.998, ElectronCapture => 0.002]),
    KnownIsotope::stable(6, 12),
    KnownIsotope::stable(6, 13),
    KnownIsotope::decays(6, 14, 5730.0 * YEAR, BETA_MINUS),
    KnownIsotope::decays(7, 13, 9.965 * MINUTE, BETA_PLUS),
    KnownIsotope::stable(7, 14),
    KnownIsotope::stable(7, 15),
    KnownIsotope::decays(8, 15, 122.24, BETA_PLUS),
    KnownIsotope::stable(8, 16),
    KnownIsotope::stable(8, 17),
    KnownIsotope::stable(8, 18),
    KnownIsotope::decays(9, 18, 109.77 * MINUTE, modes![BetaPlus => 0.9686, ElectronCapture => 0.0314]),
    KnownIsotope::stable(9, 19),
    KnownIsotope::stable(10, 20),
    KnownIsotope::stable(10, 22),
    KnownIsotope::decays(11, 22, 2.602 * YEAR, modes![BetaPlus => 0.903, ElectronCapture => 0.097]),
    KnownIsotope::stable(11, 23),
    KnownIsotope::decays(11, 24, 14.96 * HOUR, BETA_MINUS),
    KnownIsotope::stable(12, 24),
    KnownIsotope::stable(13, 27),
    KnownIsotope::stable(14, 28),
    KnownIsotope::stable(15, 31),
    KnownIsotope::decays(15, 32, 14.27 * DAY, BETA_MINUS),
    KnownIsotope::stable(16, 32),
    KnownIsotope::decays(16, 35, 87.37 * DAY, BETA_MINUS),
    KnownIsotope::stable(17, 35),
    KnownIsotope::stable(18, 40),
    KnownIsotope::stable(19, 39),
    KnownIsotope::decays(19, 40, 1.248e9 * YEAR, modes![BetaMinus => 0.8928, ElectronCapture => 0.1072]),
    KnownIsotope::stable(20, 40),
    KnownIsotope::decays(24, 51, 27.70 * DAY, EC),
    KnownIsotope::stable(23, 51),
    KnownIsotope::stable(24, 54),
    KnownIsotope::decays(25, 54, 312.2 * DAY, EC),
    KnownIsotope::stable(25, 55),
    KnownIsotope::decays(26, 55, 2.744 * YEAR, EC),
    KnownIsotope::stable(26, 56),
    KnownIsotope::stable(26, 57),
    KnownIsotope::decays(26, 59, 44.5 * DAY, BETA_MINUS),
    KnownIsotope::decays(27, 57, 271.7 * DAY, EC),
    KnownIsotope::stable(27, 59),
    KnownIsotope::decays(27, 60, 5.2714 * YEAR, BETA_MINUS),
    KnownIsotope::stable(28, 60),
    KnownIsotope::stable(29, 63),
    KnownIsotope::stable(29, 65),
    KnownIsotope::decays(30, 65, 243.9 * DAY, modes![ElectronCapture => 0.985, BetaPlus => 0.015]),
    KnownIsotope::decays(36, 85, 10.76 * YEAR, BETA_MINUS),
    KnownIsotope::stable(37, 85),
    KnownIsotope::decays(38, 90, 28.79 * YEAR, BETA_MINUS),
    KnownIsotope::decays(39, 90, 64.0 * HOUR, BETA_MINUS),
    KnownIsotope::stable(40, 90),
    KnownIsotope::decays(43, 99, 2.111e5 * YEAR, BETA_MINUS),
    KnownIsotope::stable(44, 99),
    KnownIsotope::stable(52, 125),
    KnownIsotope::decays(53, 125, 59.4 * DAY, EC),
    KnownIsotope::stable(53, 127),
    KnownIsotope::decays(53, 129, 1.57e7 * YEAR, BETA_MINUS),
    KnownIsotope::decays(53, 131, 8.0252 * DAY, BETA_MINUS),
    KnownIsotope::stable(54, 129),
    KnownIsotope::stable(54, 131),
    KnownIsotope::decays(54, 133, 5.247 * DAY, BETA_MINUS),
    KnownIsotope::stable(55, 133),
    KnownIsotope::decays(55, 134, 2.065 * YEAR, BETA_MINUS),
    KnownIsotope::decays(55, 137, 30.17 * YEAR, BETA_MINUS),
    KnownIsotope::stable(56, 134),
    KnownIsotope::stable(56, 137),
    KnownIsotope::stable(60, 143),
    KnownIsotope::decays(61, 147, 2.62 * YEAR, BETA_MINUS),
    KnownIsotope::decays(62, 147, 1.06e11 * YEAR, ALPHA),
    KnownIsotope::stable(76, 192),
    KnownIsotope::decays(77, 192, 73.83 * DAY, modes![BetaMinus => 0.9513, ElectronCapture => 0.0487]),
    KnownIsotope::stable(78, 192),
    KnownIsotope::stable(79, 197),
    KnownIsotope::decays(79, 198, 2.695 * DAY, BETA_MINUS),
    KnownIsotope::stable(80, 198),
    KnownIsotope::stable(80, 204),
    KnownIsotope::decays(81, 204, 3.78 * YEAR, modes![BetaMinus => 0.971, ElectronCapture => 0.029]),
    KnownIsotope::stable(81, 205),

    // Lead and bismuth end points
    KnownIsotope::stable(82, 204),
    KnownIsotope::stable(82, 206),
    KnownIsotope::stable(82, 207),
    KnownIsotope::stable(82, 208),
    KnownIsotope::stable(83, 209),

    // Uranium series (4n+2)
    KnownIsotope::decays(92, 238, 4.468e9 * YEAR, ALPHA),
    KnownIsotope::decays(90, 234, 24.10 * DAY, BETA_MINUS),
    KnownIsotope::decays(91, 234, 1.159 * MINUTE, BETA_MINUS),
    KnownIsotope::decays(92, 234, 2.455e5 * YEAR, ALPHA),
    KnownIsotope::decays(90, 230, 7.538e4 * YEAR, ALPHA),
    KnownIsotope::decays(88, 226, 1600.0 * YEAR, ALPHA),
    KnownIsotope::decays(86, 222, 3.8235 * DAY, ALPHA),
    KnownIsotope::decays(84, 218, 3.098 * MINUTE, modes![Alpha => 0.9998, BetaMinus => 0.0002]),
    KnownIsotope::decays(85, 218, 1.5, modes![Alpha => 0.999, BetaMinus => 0.001]),
    KnownIsotope::decays(86, 218, 35e-3, ALPHA),
    KnownIsotope::decays(82, 214, 26.8 * MINUTE, BETA_MINUS),
    KnownIsotope::decays(83, 214, 19.9 * MINUTE, modes![BetaMinus => 0.9998, Alpha => 0.0002]),
    KnownIsotope::decays(84, 214, 164.3e-6, ALPHA),
    KnownIsotope::decays(81, 210, 1.30 * MINUTE, BETA_MINUS),
    KnownIsotope::decays(82, 210, 22.2 * YEAR, BETA_MINUS),
    KnownIsotope::decays(83, 210, 5.012 * DAY, BETA_MINUS),
    KnownIsotope::decays(84, 210, 138.376 * DAY, ALPHA),

    // Actinium series (4n+3)
    KnownIsotope::decays(94, 239, 2.411e4 * YEAR, ALPHA),
    KnownIsotope::decays(92, 235, 7.04e8 * YEAR, ALPHA),
    KnownIsotope::decays(90, 231, 25.52 * HOUR, BETA_MINUS),
    KnownIsotope::decays(91, 231, 3.276e4 * YEAR, ALPHA),
    KnownIsotope::decays(89, 227, 21.772 * YEAR, modes![BetaMinus => 0.9862, Alpha => 0.0138]),
    KnownIsotope::decays(90, 227, 18.68 * DAY, ALPHA),
    KnownIsotope::decays(87, 223, 22.00 * MINUTE, BETA_MINUS),
    KnownIsotope::decays(88, 223, 11.43 * DAY, ALPHA),
    KnownIsotope::decays(86, 219, 3.96, ALPHA),
    KnownIsotope::decays(84, 215, 1.781e-3, ALPHA),
    KnownIsotope::decays(82, 211, 36.1 * MINUTE, BETA_MINUS),
    KnownIsotope::decays(83, 211, 2.14 * MINUTE, modes![Alpha => 0.99724, BetaMinus => 0.00276]),
    KnownIsotope::decays(81, 207, 4.77 * MINUTE, BETA_MINUS),
    KnownIsotope::decays(84, 211, 0.516, ALPHA),

    // Thorium series (4n)
    KnownIsotope::decays(98, 252, 2.645 * YEAR, modes![Alpha => 0.969, SpontaneousFission => 0.031]),
    KnownIsotope::decays(96, 248, 3.48e5 * YEAR, modes![Alpha => 0.9161, SpontaneousFission => 0.0839]),
    KnownIsotope::decays(94, 244, 8.0e7 * YEAR, modes![Alpha => 0.9988, SpontaneousFission => 0.0012]),
    KnownIsotope::decays(92, 240, 14.1 * HOUR, BETA_MINUS),
    KnownIsotope::decays(93, 240, 61.9 * MINUTE, BETA_MINUS),
    KnownIsotope::decays(96, 244, 18.1 * YEAR, ALPHA),
    KnownIsotope::decays(94, 240, 6561.0 * YEAR, ALPHA),
    KnownIsotope::decays(92, 236, 2.342e7 * YEAR, ALPHA),
    KnownIsotope::decays(90, 232, 1.405e10 * YEAR, ALPHA),
    KnownIsotope::decays(88, 228, 5.75 * YEAR, BETA_MINUS),
    KnownIsotope::decays(89, 228, 6.15 * HOUR, BETA_MINUS),
    KnownIsotope::decays(90, 228, 1.9116 * YEAR, ALPHA),
    KnownIsotope::decays(88, 224, 3.6319 * DAY, ALPHA),
    KnownIsotope::decays(86, 220, 55.6, ALPHA),
    KnownIsotope::decays(84, 216, 0.145, ALPHA),
    KnownIsotope::decays(82, 212, 10.64 * HOUR, BETA_MINUS),
    KnownIsotope::decays(83, 212, 60.55 * MINUTE, modes![BetaMinus => 0.6406, Alpha => 0.3594]),
    KnownIsotope::decays(84, 212, 0.299e-6, ALPHA),
    KnownIsotope::decays(81, 208, 3.053 * MINUTE, BETA_MINUS),

    // Neptunium series (4n+1)
    KnownIsotope::decays(94, 238, 87.7 * YEAR, ALPHA),
    KnownIsotope::decays(94, 241, 14.29 * YEAR, BETA_MINUS),
    KnownIsotope::decays(95, 241, 432.2 * YEAR, ALPHA),
    KnownIsotope::decays(93, 237, 2.144e6 * YEAR, ALPHA),
    KnownIsotope::decays(91, 233, 26.975 * DAY, BETA_MINUS),
    KnownIsotope::decays(92, 233, 1.592e5 * YEAR, ALPHA),
    KnownIsotope::decays(90, 229, 7340.0 * YEAR, ALPHA),
    KnownIsotope::decays(88, 225, 14.9 * DAY, BETA_MINUS),
    KnownIsotope::decays(89, 225, 10.0 * DAY, ALPHA),
    KnownIsotope::decays(87, 221, 4.8 * MINUTE, ALPHA),
    KnownIsotope::decays(85, 217, 32.3e-3, ALPHA),
    KnownIsotope::decays(83, 213, 45.59 * MINUTE, modes![BetaMinus => 0.9791, Alpha => 0.0209]),
    KnownIsotope::decays(84, 213, 3.72e-6, ALPHA),
    KnownIsotope::decays(81, 209, 2.161 * MINUTE, BETA_MINUS),
    KnownIsotope::decays(82, 209, 3.253 * HOUR, BETA_MINUS),
];
