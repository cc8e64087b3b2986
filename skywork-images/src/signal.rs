//! 1-D signal stacking.
//!
//! A Gaussian pulse buried in unit-variance noise is recovered by averaging
//! many noisy copies. The residual noise of the mean falls as `1/√N`, which
//! [`rms_error`] measures against the clean signal.

use crate::errors::{Result, StackError};
use rand::Rng;
use rand_distr::StandardNormal;
use std::f64::consts::{PI, SQRT_2};

/// Lower and upper tail probabilities bounding [`gaussian_signal`].
pub const SIGNAL_TAIL: f64 = 0.001;

/// Standard normal probability density.
pub fn normal_pdf(x: f64) -> f64 {
    libm::exp(-0.5 * x * x) / (2.0 * PI).sqrt()
}

pub fn normal_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x / SQRT_2)
}

/// Inverse of [`normal_cdf`] (the percent-point function).
///
/// Acklam's rational approximation refined by one Halley step, good to about
/// 1e-15 relative. Returns NaN outside `[0, 1]` and ±∞ at the ends.
pub fn normal_ppf(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    if !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    let x = if p < P_LOW {
        tail((-2.0 * libm::log(p)).sqrt())
    } else if p > 1.0 - P_LOW {
        -tail((-2.0 * libm::log(1.0 - p)).sqrt())
    } else {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    };

    let e = normal_cdf(x) - p;
    let u = e * (2.0 * PI).sqrt() * libm::exp(0.5 * x * x);
    x - u / (1.0 + 0.5 * x * u)
}

/// `n` evenly spaced points from `x_min` to `x_max` inclusive.
pub fn linspace(x_min: f64, x_max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![x_min],
        _ => {
            let step = (x_max - x_min) / (n - 1) as f64;
            (0..n).map(|i| x_min + step * i as f64).collect()
        }
    }
}

/// Clean pulse: `n` points spanning the central 99.8% of the standard normal
/// and its density at each.
pub fn gaussian_signal(n: usize) -> (Vec<f64>, Vec<f64>) {
    let x = linspace(normal_ppf(SIGNAL_TAIL), normal_ppf(1.0 - SIGNAL_TAIL), n);
    let y = x.iter().map(|&x| normal_pdf(x)).collect();
    (x, y)
}

/// `count` copies of `signal`, each with independent N(0, 1) noise.
pub fn noisy_copies<R: Rng>(signal: &[f64], count: usize, rng: &mut R) -> Vec<Vec<f64>> {
    (0..count)
        .map(|_| {
            signal
                .iter()
                .map(|&s| s + rng.sample::<f64, _>(StandardNormal))
                .collect()
        })
        .collect()
}

/// Element-wise mean of equal-length signals.
pub fn mean_stack_1d(signals: &[Vec<f64>]) -> Result<Vec<f64>> {
    let first = signals.first().ok_or(StackError::Empty)?;
    let expected = first.len();

    let mut sum = vec![0.0; expected];
    for (index, signal) in signals.iter().enumerate() {
        if signal.len() != expected {
            return Err(StackError::LengthMismatch {
                index,
                expected,
                actual: signal.len(),
            });
        }
        for (acc, &v) in sum.iter_mut().zip(signal) {
            *acc += v;
        }
    }

    let scale = 1.0 / signals.len() as f64;
    Ok(sum.into_iter().map(|v| v * scale).collect())
}

/// Root-mean-square difference between two equal-length signals.
pub fn rms_error(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(StackError::LengthMismatch {
            index: 1,
            expected: a.len(),
            actual: b.len(),
        });
    }
    if a.is_empty() {
        return Err(StackError::Empty);
    }
    let sum_sq: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
    Ok((sum_sq / a.len() as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pdf_and_cdf_reference_values() {
        assert!((normal_pdf(0.0) - 0.3989422804014327).abs() < 1e-15);
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-15);
        assert!((normal_cdf(1.96) - 0.9750021048517795).abs() < 1e-12);
    }

    #[test]
    fn test_ppf_reference_values() {
        assert_eq!(normal_ppf(0.5), 0.0);
        assert!((normal_ppf(0.999) - 3.090232306167813).abs() < 1e-9);
        assert!((normal_ppf(0.001) + 3.090232306167813).abs() < 1e-9);
        assert!((normal_ppf(0.975) - 1.959963984540054).abs() < 1e-9);
        assert!(normal_ppf(1.5).is_nan());
        assert_eq!(normal_ppf(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_ppf_inverts_cdf() {
        for p in [1e-6, 0.01, 0.02425, 0.3, 0.7, 0.98, 0.999999] {
            assert!((normal_cdf(normal_ppf(p)) - p).abs() < 1e-12, "p = {}", p);
        }
    }

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(-1.0, 1.0, 5);
        assert_eq!(xs, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn test_gaussian_signal_shape() {
        let (x, y) = gaussian_signal(500);
        assert_eq!(x.len(), 500);
        assert_eq!(y.len(), 500);
        assert!((x[0] + 3.090232306167813).abs() < 1e-9);
        assert!((x[499] - 3.090232306167813).abs() < 1e-9);

        let peak = y.iter().cloned().fold(f64::MIN, f64::max);
        assert!((peak - normal_pdf(0.0)).abs() < 1e-4);
        // Symmetric about zero.
        assert!((y[0] - y[499]).abs() < 1e-12);
    }

    #[test]
    fn test_stacking_reduces_noise() {
        let (_, clean) = gaussian_signal(500);
        let mut rng = StdRng::seed_from_u64(42);
        let copies = noisy_copies(&clean, 100, &mut rng);
        assert_eq!(copies.len(), 100);

        let single = rms_error(&copies[0], &clean).unwrap();
        let stacked = rms_error(&mean_stack_1d(&copies).unwrap(), &clean).unwrap();

        assert!(single > 0.8 && single < 1.2, "single copy rms {}", single);
        assert!(stacked < 0.2, "stacked rms {}", stacked);
        assert!(stacked < single);
    }

    #[test]
    fn test_noisy_copies_are_seeded() {
        let signal = vec![0.0; 10];
        let a = noisy_copies(&signal, 3, &mut StdRng::seed_from_u64(7));
        let b = noisy_copies(&signal, 3, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_ne!(a[0], a[1]);
    }

    #[test]
    fn test_mean_stack_1d_errors() {
        assert!(matches!(mean_stack_1d(&[]), Err(StackError::Empty)));
        let err = mean_stack_1d(&[vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert!(matches!(
            err,
            StackError::LengthMismatch {
                index: 1,
                expected: 2,
                actual: 1
            }
        ));
        assert_eq!(mean_stack_1d(&[vec![1.0, 2.0], vec![3.0, 6.0]]).unwrap(), vec![2.0, 4.0]);
    }

    #[test]
    fn test_rms_error_values() {
        assert_eq!(rms_error(&[1.0, 1.0], &[1.0, 1.0]).unwrap(), 0.0);
        assert_eq!(rms_error(&[3.0, -3.0], &[0.0, 0.0]).unwrap(), 3.0);
        assert!(rms_error(&[1.0], &[]).is_err());
    }
}
