// Time units (seconds)
pub const MINUTE: f64 = 60.0;
pub const HOUR: f64 = 3_600.0;
pub const DAY: f64 = 86_400.0;
pub const YEAR: f64 = 3.156e7; // Julian-ish year used for every display threshold

// Nuclide bounds
pub const MIN_ATOMIC_NUMBER: u32 = 1;
pub const MAX_ATOMIC_NUMBER: u32 = 118;

// Chain traversal
pub const DEFAULT_MAX_STEPS: usize = 50;

// Stability heuristic (N/Z ratio)
pub const LIGHT_NUCLEUS_MAX_Z: u32 = 20;
pub const HEAVY_NUCLEUS_MIN_Z: u32 = 84; // nothing above bismuth is stable
pub const NZ_SLOPE_PER_PROTON: f64 = 0.015;
pub const STABILITY_BAND: f64 = 0.15;
pub const DRIP_MARGIN: f64 = 0.1;

// Energy heuristics (MeV)
pub const ALPHA_BARRIER_Z: u32 = 82;
pub const FISSION_ENERGY_MEV: f64 = 200.0;
pub const ELECTRON_CAPTURE_FACTOR: f64 = 0.8;
