//! Hill-style distance decay shared by every stage.

/// `1 / (1 + (d / tau)^steepness)`.
///
/// Equals 1 at `d = 0`, 0.5 at `d = tau`, strictly decreasing for `d > 0`
/// and approaching 0 as `d` grows. `tau` and `steepness` are validated
/// positive at configuration time.
pub fn hill_curve(distance: f64, tau: f64, steepness: f64) -> f64 {
    if distance <= 0.0 {
        return 1.0;
    }
    1.0 / (1.0 + (distance / tau).powf(steepness))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_at_zero_half_at_tau() {
        assert_eq!(hill_curve(0.0, 3.0, 2.0), 1.0);
        assert!((hill_curve(3.0, 3.0, 2.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn strictly_decreasing() {
        let mut prev = hill_curve(0.0, 4.0, 1.5);
        for d in 1..200 {
            let cur = hill_curve(d as f64, 4.0, 1.5);
            assert!(cur < prev, "not decreasing at d={d}");
            assert!(cur > 0.0);
            prev = cur;
        }
    }

    #[test]
    fn approaches_zero_far_away() {
        assert!(hill_curve(1_000.0, 3.0, 2.0) < 1e-4);
    }
}
