use crate::constants::{DAY, HOUR, MINUTE, YEAR};

// (upper bound in seconds, seconds per unit, unit)
const UNITS: [(f64, f64, &str); 9] = [
    (1e-3, 1e-6, "μs"),
    (1.0, 1e-3, "ms"),
    (MINUTE, 1.0, "s"),
    (HOUR, MINUTE, "min"),
    (DAY, HOUR, "h"),
    (YEAR, DAY, "d"),
    (1e2 * YEAR, YEAR, "yr"),
    (1e5 * YEAR, 1e3 * YEAR, "kyr"),
    (1e8 * YEAR, 1e6 * YEAR, "Myr"),
];

/// Display string for a half-life in seconds, e.g. `"5730.0 yr"`.
///
/// Infinity reads as `"Stable"`. Anything past the last bound is shown in
/// giga-years.
pub fn format_half_life(seconds: f64) -> String {
    if seconds == f64::INFINITY {
        return "Stable".to_owned();
    }
    if !(seconds.is_finite() && seconds >= 0.0) {
        return "Unknown".to_owned();
    }

    let (per_unit, unit) = UNITS
        .iter()
        .find(|(limit, _, _)| seconds < *limit)
        .map(|&(_, per_unit, unit)| (per_unit, unit))
        .unwrap_or((1e9 * YEAR, "Gyr"));

    format!("{:.1} {}", seconds / per_unit, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinity_is_stable() {
        assert_eq!(format_half_life(f64::INFINITY), "Stable");
    }

    #[test]
    fn picks_unit_from_thresholds() {
        assert_eq!(format_half_life(0.0005), "500.0 μs");
        assert_eq!(format_half_life(0.145), "145.0 ms");
        assert_eq!(format_half_life(30.0), "30.0 s");
        assert_eq!(format_half_life(120.0), "2.0 min");
        assert_eq!(format_half_life(9_000.0), "2.5 h");
        assert_eq!(format_half_life(8.0252 * 86_400.0), "8.0 d");
        assert_eq!(format_half_life(5730.0 * YEAR), "5.7 kyr");
        assert_eq!(format_half_life(4.468e9 * YEAR), "4.5 Gyr");
    }

    #[test]
    fn boundary_values_move_to_next_unit() {
        assert!(format_half_life(3.156e9).ends_with("kyr"));
        assert!(format_half_life(3.156e7).ends_with(" yr"));
        assert!(format_half_life(86_400.0).ends_with(" d"));
        assert!(format_half_life(3.156e15).ends_with("Gyr"));
        assert!(format_half_life(3.156e12).ends_with("Myr"));
    }

    #[test]
    fn garbage_reads_unknown() {
        assert_eq!(format_half_life(f64::NAN), "Unknown");
        assert_eq!(format_half_life(-1.0), "Unknown");
    }
}
