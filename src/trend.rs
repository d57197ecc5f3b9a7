//! Trend Series Generator
//!
//! Synthesizes the short historical series behind a KPI sparkline from the
//! current value and its period-over-period change. The series is a straight
//! line from the implied start value to the current value with a fixed,
//! bounded oscillation on top, so the same inputs always yield the same
//! series.

/// Relative amplitude of the oscillation (each trig term contributes up to 2.5%).
const VARIANCE_FACTOR: f64 = 0.025;

/// Generate `num_points` non-negative values ending near `current_value`.
///
/// `start = current / (1 + change/100)`; point `i` is the linear
/// interpolation between start and current plus
/// `(sin(i*0.5) + cos(i*0.3)) * 0.025 * base`, floored at zero. A single
/// point is treated as progress 0 (the start value); zero points yield an
/// empty series. A change of exactly -100% has no finite start value, so the
/// series is flat at `current_value` instead.
pub fn generate(current_value: f64, change_percent: f64, num_points: usize) -> Vec<f64> {
    let divisor = 1.0 + change_percent / 100.0;
    let start_value = if divisor == 0.0 {
        current_value
    } else {
        current_value / divisor
    };

    let last_index = num_points.saturating_sub(1);

    (0..num_points)
        .map(|i| {
            let progress = if last_index == 0 {
                0.0
            } else {
                i as f64 / last_index as f64
            };
            let base = start_value + (current_value - start_value) * progress;
            let x = i as f64;
            let variance = ((x * 0.5).sin() + (x * 0.3).cos()) * VARIANCE_FACTOR * base;
            (base + variance).max(0.0)
        })
        .collect()
}

/// Largest relative deviation the oscillation can add to a base value.
pub fn max_relative_variance() -> f64 {
    2.0 * VARIANCE_FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_non_negative() {
        let series = generate(100.0, 10.0, 30);
        assert_eq!(series.len(), 30);
        assert!(series.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_endpoints_are_near_start_and_current() {
        let series = generate(100.0, 10.0, 30);
        let start = 100.0 / 1.10;

        // i = 0: sin(0) + cos(0) = 1, so the first point is start * 1.025
        assert!((series[0] - start * 1.025).abs() < 1e-9);
        assert!((series[0] - 90.9).abs() < 90.9 * max_relative_variance());

        let last = *series.last().unwrap();
        assert!((last - 100.0).abs() <= 100.0 * max_relative_variance());
    }

    #[test]
    fn test_negative_base_is_clamped_to_zero() {
        let series = generate(-10.0, 0.0, 5);
        assert!(series.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_degenerate_point_counts() {
        assert!(generate(50.0, 5.0, 0).is_empty());

        let single = generate(50.0, 0.0, 1);
        assert_eq!(single.len(), 1);
        assert!((single[0] - 50.0 * 1.025).abs() < 1e-9);
    }

    #[test]
    fn test_minus_hundred_percent_change_stays_finite() {
        let series = generate(40.0, -100.0, 10);
        assert!(series.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(generate(73.4, -2.1, 30), generate(73.4, -2.1, 30));
    }
}
