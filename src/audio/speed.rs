//! Speed-chaining math for pitch-preserving time compression.
//!
//! ffmpeg's `atempo` filter accepts only a bounded tempo per application
//! (0.5–2.0). Compressing past that ceiling requires chaining filter
//! stages whose product equals the intended overall speed. The split is
//! pure arithmetic, kept separate from any audio I/O so it can be tested
//! exactly.

/// Lowest tempo `atempo` accepts in a single application.
pub const STAGE_FLOOR: f64 = 0.5;

/// Highest tempo `atempo` accepts in a single application.
pub const STAGE_CEILING: f64 = 2.0;

/// Split `target` into ordered per-stage ratios, each within
/// `(1.0, ceiling]`, whose product equals `target` exactly.
///
/// `target <= ceiling` yields a single stage. Beyond that, ceiling-sized
/// stages are emitted and the final stage absorbs the remainder:
/// `split_ratio(3.0, 2.0)` → `[2.0, 1.5]`.
///
/// Targets at or below 1.0 yield no stages — clips are never slowed down.
pub fn split_ratio(target: f64, ceiling: f64) -> Vec<f64> {
    if target <= 1.0 || !target.is_finite() {
        return Vec::new();
    }
    if target <= ceiling {
        return vec![target];
    }

    let mut stages = Vec::new();
    let mut remaining = target;
    while remaining > ceiling {
        stages.push(ceiling);
        remaining /= ceiling;
    }
    if remaining > 1.0 {
        stages.push(remaining);
    }
    stages
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stages: &[f64]) -> f64 {
        stages.iter().product()
    }

    #[test]
    fn within_ceiling_is_a_single_stage() {
        assert_eq!(split_ratio(1.5, STAGE_CEILING), vec![1.5]);
        assert_eq!(split_ratio(2.0, STAGE_CEILING), vec![2.0]);
    }

    #[test]
    fn beyond_ceiling_chains_two_stages() {
        let stages = split_ratio(3.0, STAGE_CEILING);
        assert_eq!(stages, vec![2.0, 1.5]);
    }

    #[test]
    fn compound_effect_equals_the_target_exactly() {
        for target in [1.15, 1.725, 2.3, 3.9, 7.5] {
            let stages = split_ratio(target, STAGE_CEILING);
            assert!(
                (product(&stages) - target).abs() < 1e-12,
                "product mismatch for {target}"
            );
        }
    }

    #[test]
    fn every_stage_stays_within_the_primitive_range() {
        for target in [1.01, 1.9, 2.0, 2.01, 3.999, 8.0] {
            for stage in split_ratio(target, STAGE_CEILING) {
                assert!(stage > 1.0 && stage <= STAGE_CEILING, "stage {stage} out of range");
            }
        }
    }

    #[test]
    fn no_speedup_means_no_stages() {
        assert!(split_ratio(1.0, STAGE_CEILING).is_empty());
        assert!(split_ratio(0.8, STAGE_CEILING).is_empty());
    }

    #[test]
    fn exact_ceiling_multiple_has_no_unit_tail() {
        // 4.0 = 2.0 × 2.0 — the trailing 1.0 must not become a stage.
        assert_eq!(split_ratio(4.0, STAGE_CEILING), vec![2.0, 2.0]);
    }
}
