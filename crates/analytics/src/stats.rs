//! Descriptive statistics used by the lag scanner.

/// Sample Pearson correlation of two equally long sequences.
///
/// Uses the `n - 1` convention for covariance and both variances, so a
/// perfectly linear pair yields exactly `±1.0`. Returns `None` when fewer than
/// two pairs are supplied, the lengths differ, either operand is flat, or the
/// result is not finite.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if is_flat(xs, sxx) || is_flat(ys, syy) {
        return None;
    }

    let covariance = sxy / (n - 1.0);
    let var_x = sxx / (n - 1.0);
    let var_y = syy / (n - 1.0);

    let r = covariance / (var_x * var_y).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// True when `values` carry no variation beyond floating-point noise.
///
/// A constant like `0.1` leaves rounding residue in its mean, so the sum of
/// squared deviations `ss` comes out tiny but non-zero. Anything below the
/// error bound of the two-pass sum relative to the raw magnitudes is treated
/// as zero.
fn is_flat(values: &[f64], ss: f64) -> bool {
    if ss <= 0.0 || values.iter().all(|&v| v == values[0]) {
        return true;
    }
    let n = values.len() as f64;
    let magnitude: f64 = values.iter().map(|v| v * v).sum();
    let tolerance = n * f64::EPSILON;
    ss <= tolerance * tolerance * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfectly_linear_pairs_are_exactly_one() {
        let xs: Vec<f64> = (0..40).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x + 7.0).collect();
        assert_eq!(pearson(&xs, &ys), Some(1.0));

        let inverse: Vec<f64> = xs.iter().map(|x| 100.0 - x).collect();
        assert_eq!(pearson(&xs, &inverse), Some(-1.0));
    }

    #[test]
    fn matches_a_hand_computed_value() {
        // mean 3 / 4, deviations (-2,-1,0,1,2) and (-2,0,-1,1,2): sxy = 9, sxx = syy = 10
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 4.0, 3.0, 5.0, 6.0];
        assert_relative_eq!(pearson(&xs, &ys).unwrap(), 0.9, epsilon = 1e-12);
    }

    #[test]
    fn zero_variance_is_undefined() {
        let xs = [1.0, 2.0, 3.0];
        let flat = [5.0, 5.0, 5.0];
        assert_eq!(pearson(&xs, &flat), None);
        assert_eq!(pearson(&flat, &xs), None);
    }

    #[test]
    fn inexact_constants_are_undefined() {
        let xs: Vec<f64> = (0..50).map(f64::from).collect();
        for level in [0.1, 1.1, 19.99, 31.37] {
            let flat = vec![level; 50];
            assert_eq!(pearson(&xs, &flat), None, "flat at {level}");
            assert_eq!(pearson(&flat, &xs), None, "flat at {level}");
        }
    }

    #[test]
    fn small_but_real_variation_is_kept() {
        let xs: Vec<f64> = (0..20).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 100.0 + x * 1e-6).collect();
        assert_relative_eq!(pearson(&xs, &ys).unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn fewer_than_two_pairs_is_undefined() {
        assert_eq!(pearson(&[], &[]), None);
        assert_eq!(pearson(&[1.0], &[2.0]), None);
    }

    #[test]
    fn mismatched_lengths_are_undefined() {
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0]), None);
    }
}
