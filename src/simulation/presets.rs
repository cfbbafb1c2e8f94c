use crate::error::DecayError;
use crate::physics::nucleus::Nuclide;
use serde::Serialize;

/// Entry in the "load isotope" picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub label: &'static str,
    pub z: u32,
    pub a: u32,
    pub description: &'static str,
}

impl Preset {
    const fn new(label: &'static str, z: u32, a: u32, description: &'static str) -> Self {
        Self {
            label,
            z,
            a,
            description,
        }
    }

    pub fn nuclide(&self) -> Result<Nuclide, DecayError> {
        Nuclide::new(self.z, self.a)
    }
}

const PRESETS: [Preset; 16] = [
    Preset::new("U-238", 92, 238, "Uranium series: 14 steps down to lead-206"),
    Preset::new("U-235", 92, 235, "Actinium series, ends at lead-207"),
    Preset::new("Th-232", 90, 232, "Thorium series, branches at bismuth-212"),
    Preset::new("C-14", 6, 14, "Radiocarbon dating, single beta-minus step"),
    Preset::new("K-40", 19, 40, "Beta-minus or electron capture, potassium-argon dating"),
    Preset::new("Co-60", 27, 60, "Medical and industrial gamma source"),
    Preset::new("I-131", 53, 131, "Thyroid treatment, eight-day half-life"),
    Preset::new("Cs-137", 55, 137, "Fission product from reactor accidents"),
    Preset::new("Ra-226", 88, 226, "Marie Curie's radium, mid uranium series"),
    Preset::new("Rn-222", 86, 222, "Indoor radon gas"),
    Preset::new("Am-241", 95, 241, "Smoke detectors, neptunium series"),
    Preset::new("Cf-252", 98, 252, "Alpha decay with a spontaneous fission branch"),
    Preset::new("F-18", 9, 18, "PET imaging positron emitter"),
    Preset::new("H-3", 1, 3, "Tritium, the lightest radioactive nuclide"),
    Preset::new("Bi-212", 83, 212, "Branches between alpha and beta-minus"),
    Preset::new("Po-210", 84, 210, "Pure alpha emitter, one step to lead-206"),
];

pub fn presets() -> &'static [Preset] {
    &PRESETS
}

pub fn find_preset(label: &str) -> Option<&'static Preset> {
    let label = label.trim();
    PRESETS
        .iter()
        .find(|preset| preset.label.eq_ignore_ascii_case(label))
}
