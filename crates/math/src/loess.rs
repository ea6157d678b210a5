//! Locally-weighted scatterplot smoothing.

use crate::MathError;

/// Fit a LOESS trend through `(x, y)` pairs already sorted by `x`.
///
/// For each point, a local linear regression is fit over the
/// `ceil(frac * n)` nearest neighbors by x-distance, weighted with the
/// tricube kernel. Windows with zero x-spread fall back to the weighted
/// mean, so ties and constant stretches do not blow up.
///
/// Returns the smoothed value at each input `x`, in input order.
///
/// # Arguments
/// * `x` - Sorted predictor values
/// * `y` - Response values, same length as `x`
/// * `frac` - Bandwidth as a fraction of the sample, in `(0, 1]`
///
/// # Errors
/// Returns `MathError` on an empty input, mismatched lengths, or a
/// bandwidth outside `(0, 1]`.
pub fn loess(x: &[f64], y: &[f64], frac: f64) -> Result<Vec<f64>, MathError> {
    if x.is_empty() {
        return Err(MathError::EmptyData);
    }
    if x.len() != y.len() {
        return Err(MathError::DimensionMismatch { expected: x.len(), actual: y.len() });
    }
    if !(frac > 0.0 && frac <= 1.0) {
        return Err(MathError::InvalidParameter(format!("bandwidth fraction {frac} not in (0, 1]")));
    }

    let n = x.len();
    let k = ((frac * n as f64).ceil() as usize).clamp(2.min(n), n);

    let mut fitted = Vec::with_capacity(n);
    for i in 0..n {
        let (lo, hi) = window_around(x, i, k);
        let d_max = (x[i] - x[lo]).abs().max((x[hi - 1] - x[i]).abs());
        fitted.push(local_fit(&x[lo..hi], &y[lo..hi], x[i], d_max));
    }

    Ok(fitted)
}

/// Find the half-open index window of the `k` nearest neighbors of `x[i]`
/// in a sorted slice.
fn window_around(x: &[f64], i: usize, k: usize) -> (usize, usize) {
    let n = x.len();
    let mut lo = i;
    let mut hi = i + 1;

    while hi - lo < k {
        let extend_left = if lo == 0 {
            false
        } else if hi == n {
            true
        } else {
            (x[i] - x[lo - 1]).abs() <= (x[hi] - x[i]).abs()
        };

        if extend_left {
            lo -= 1;
        } else {
            hi += 1;
        }
    }

    (lo, hi)
}

/// Weighted linear fit evaluated at `x0` with tricube weights.
fn local_fit(xs: &[f64], ys: &[f64], x0: f64, d_max: f64) -> f64 {
    let mut sw = 0.0;
    let mut swx = 0.0;
    let mut swy = 0.0;
    let mut swxx = 0.0;
    let mut swxy = 0.0;

    for (&xj, &yj) in xs.iter().zip(ys) {
        let w = tricube((xj - x0).abs(), d_max);
        sw += w;
        swx += w * xj;
        swy += w * yj;
        swxx += w * xj * xj;
        swxy += w * xj * yj;
    }

    if sw <= 0.0 {
        // All weights vanished; unweighted mean is the only sane answer.
        return ys.iter().sum::<f64>() / ys.len() as f64;
    }

    let denom = sw * swxx - swx * swx;
    if denom.abs() < 1e-12 {
        return swy / sw;
    }

    let slope = (sw * swxy - swx * swy) / denom;
    let intercept = (swy - slope * swx) / sw;
    intercept + slope * x0
}

fn tricube(distance: f64, d_max: f64) -> f64 {
    if d_max <= 0.0 {
        return 1.0;
    }
    let u = distance / d_max;
    if u >= 1.0 { 0.0 } else { (1.0 - u.powi(3)).powi(3) }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn loess_recovers_a_line() {
        let x: Vec<f64> = (0..50).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        let fitted = loess(&x, &y, 0.3).unwrap();
        for (f, expected) in fitted.iter().zip(&y) {
            assert_relative_eq!(f, expected, epsilon = 1e-8);
        }
    }

    #[test]
    fn loess_smooths_toward_local_level() {
        // Step function: the fit should stay near 0 on the left and near
        // 10 on the right with a narrow bandwidth.
        let x: Vec<f64> = (0..100).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| if *v < 50.0 { 0.0 } else { 10.0 }).collect();
        let fitted = loess(&x, &y, 0.1).unwrap();
        assert!(fitted[5].abs() < 1.0);
        assert!((fitted[95] - 10.0).abs() < 1.0);
    }

    #[test]
    fn loess_handles_tied_x_values() {
        let x = [1.0, 1.0, 1.0, 1.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let fitted = loess(&x, &y, 1.0).unwrap();
        for f in fitted {
            assert_relative_eq!(f, 5.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn loess_is_deterministic() {
        let x: Vec<f64> = (0..200).map(|i| i as f64 * 0.1).collect();
        let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
        let a = loess(&x, &y, 0.1).unwrap();
        let b = loess(&x, &y, 0.1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn loess_rejects_bad_inputs() {
        assert!(matches!(loess(&[], &[], 0.1), Err(MathError::EmptyData)));
        assert!(matches!(loess(&[1.0], &[], 0.1), Err(MathError::DimensionMismatch { .. })));
        assert!(matches!(loess(&[1.0], &[1.0], 0.0), Err(MathError::InvalidParameter(_))));
        assert!(matches!(loess(&[1.0], &[1.0], 1.5), Err(MathError::InvalidParameter(_))));
    }

    #[test]
    fn loess_single_point_returns_that_point() {
        let fitted = loess(&[3.0], &[7.0], 0.5).unwrap();
        assert_eq!(fitted, vec![7.0]);
    }
}
