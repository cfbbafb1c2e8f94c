use crate::constants::{MAX_ATOMIC_NUMBER, MIN_ATOMIC_NUMBER};
use crate::error::DecayError;
use crate::physics::elements::Element;
use serde::Serialize;
use std::fmt;

/// A nuclide identified by proton count `z` and mass number `a`.
///
/// Values are immutable; decay produces a new `Nuclide`. The neutron count is
/// always derived as `a - z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Nuclide {
    #[serde(rename = "Z")]
    z: u32,
    #[serde(rename = "A")]
    a: u32,
}

impl Nuclide {
    pub fn new(z: u32, a: u32) -> Result<Self, DecayError> {
        if z < MIN_ATOMIC_NUMBER {
            return Err(DecayError::InvalidNuclide {
                z,
                a,
                reason: "atomic number must be at least 1",
            });
        }
        if z > MAX_ATOMIC_NUMBER {
            return Err(DecayError::InvalidNuclide {
                z,
                a,
                reason: "atomic number must not exceed 118",
            });
        }
        if a < z {
            return Err(DecayError::InvalidNuclide {
                z,
                a,
                reason: "mass number must be at least the atomic number",
            });
        }
        Ok(Self { z, a })
    }

    /// For compile-time constants already known to be in range.
    pub(crate) const fn new_unchecked(z: u32, a: u32) -> Self {
        Self { z, a }
    }

    pub fn z(&self) -> u32 {
        self.z
    }

    pub fn a(&self) -> u32 {
        self.a
    }

    pub fn neutron_count(&self) -> u32 {
        self.a - self.z
    }

    /// Neutron-to-proton ratio, the heuristic stability predictor.
    pub fn nz_ratio(&self) -> f64 {
        f64::from(self.neutron_count()) / f64::from(self.z)
    }

    pub fn element(&self) -> Element {
        // Construction bounds Z to the element table.
        Element::by_atomic_number(self.z).unwrap_or(Element::new(self.z, "?", "Unknown"))
    }

    pub fn symbol(&self) -> &'static str {
        self.element().symbol()
    }

    /// Human label such as `U-238`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.symbol(), self.a)
    }

    /// `A/Z Sym` as used in nuclear equations.
    pub fn notation(&self) -> String {
        format!("{}/{} {}", self.a, self.z, self.symbol())
    }

    pub fn info(&self) -> NuclideInfo {
        let element = self.element();
        NuclideInfo {
            z: self.z,
            a: self.a,
            n: self.neutron_count(),
            symbol: element.symbol(),
            name: element.name(),
        }
    }
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.symbol(), self.a)
    }
}

/// Flat descriptor handed to renderers and the HUD.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NuclideInfo {
    #[serde(rename = "Z")]
    pub z: u32,
    #[serde(rename = "A")]
    pub a: u32,
    #[serde(rename = "N")]
    pub n: u32,
    pub symbol: &'static str,
    pub name: &'static str,
}
