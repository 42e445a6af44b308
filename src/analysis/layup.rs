//! Angle-distribution statistics of a stacking sequence

use crate::error::{LaminateError, LaminateResult};
use crate::results::{AngleCount, LayupDistribution};

/// Two angles closer than this (degrees) fall in the same bucket
const ANGLE_MATCH_TOLERANCE: f64 = 1e-9;

fn same_angle(a: f64, b: f64) -> bool {
    (a - b).abs() <= ANGLE_MATCH_TOLERANCE
}

/// Count plies per angle and report the 0, +/-45 and 90 degree fractions.
///
/// +45 and -45 share one bucket; 0 and 90 are separate. Any other angle is
/// still listed in `counts` and counted toward `total_plies`, it just does
/// not contribute to a named percentage.
pub fn analyze_layup(angles: &[f64]) -> LaminateResult<LayupDistribution> {
    if angles.is_empty() {
        return Err(LaminateError::InvalidLayup(
            "cannot summarize an empty stacking sequence".to_string(),
        ));
    }
    Ok(summarize(angles))
}

/// Distribution of a non-empty angle list
pub(crate) fn summarize(angles: &[f64]) -> LayupDistribution {
    let mut counts: Vec<AngleCount> = Vec::new();
    for &angle in angles {
        match counts.iter_mut().find(|c| same_angle(c.angle, angle)) {
            Some(c) => c.count += 1,
            None => counts.push(AngleCount { angle, count: 1 }),
        }
    }

    let count_of = |target: f64| {
        counts
            .iter()
            .filter(|c| same_angle(c.angle, target))
            .map(|c| c.count)
            .sum::<usize>()
    };

    let zero_count = count_of(0.0);
    let plus_minus_45_count = count_of(45.0) + count_of(-45.0);
    let ninety_count = count_of(90.0);

    let total_plies = angles.len();
    let percent = |n: usize| (n as f64 / total_plies as f64) * 100.0;

    LayupDistribution {
        zero_percent: percent(zero_count),
        plus_minus_45_percent: percent(plus_minus_45_count),
        ninety_percent: percent(ninety_count),
        counts,
        zero_count,
        plus_minus_45_count,
        ninety_count,
        total_plies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quasi_isotropic_distribution() {
        let d = analyze_layup(&[0.0, 45.0, -45.0, 90.0, 90.0, -45.0, 45.0, 0.0]).unwrap();

        assert_eq!(d.total_plies, 8);
        assert_eq!(d.zero_count, 2);
        assert_eq!(d.plus_minus_45_count, 4);
        assert_eq!(d.ninety_count, 2);
        assert_relative_eq!(d.zero_percent, 25.0);
        assert_relative_eq!(d.plus_minus_45_percent, 50.0);
        assert_relative_eq!(d.ninety_percent, 25.0);

        let angles: Vec<f64> = d.counts.iter().map(|c| c.angle).collect();
        assert_eq!(angles, vec![0.0, 45.0, -45.0, 90.0]);
    }

    #[test]
    fn test_unrecognized_angles_count_toward_total_only() {
        let d = analyze_layup(&[0.0, 30.0, -30.0, 60.0]).unwrap();

        assert_eq!(d.total_plies, 4);
        assert_eq!(d.counts.len(), 4);
        assert_relative_eq!(d.zero_percent, 25.0);
        assert_eq!(d.plus_minus_45_percent, 0.0);
        assert_eq!(d.ninety_percent, 0.0);
    }

    #[test]
    fn test_minus_ninety_is_not_ninety() {
        let d = analyze_layup(&[90.0, -90.0]).unwrap();
        assert_eq!(d.ninety_count, 1);
        assert_eq!(d.counts.len(), 2);
    }

    #[test]
    fn test_single_ply_distribution() {
        let d = analyze_layup(&[90.0]).unwrap();
        assert_eq!(d.total_plies, 1);
        assert_relative_eq!(d.ninety_percent, 100.0);
        assert_eq!(d.zero_percent, 0.0);
        assert_eq!(d.plus_minus_45_percent, 0.0);
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert!(matches!(analyze_layup(&[]), Err(LaminateError::InvalidLayup(_))));
    }
}
