use super::Regressor;
use crate::data::Features;
use crate::error::{check_lengths, Error, Result};
use log::debug;
use nalgebra::{DMatrix, DVector};

const SVD_EPS: f64 = 1e-12;

/// Ordinary least squares with an intercept, solved by SVD.
#[derive(Debug, Clone, Default)]
pub struct LinearRegressor {
    coefficients: Option<[f64; 5]>,
}

impl LinearRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intercept followed by one weight per feature.
    pub fn coefficients(&self) -> Option<&[f64; 5]> {
        self.coefficients.as_ref()
    }
}

impl Regressor for LinearRegressor {
    fn name(&self) -> &str {
        "linear"
    }

    fn fit(&mut self, features: &[Features], targets: &[f64]) -> Result<()> {
        check_lengths(features.len(), targets.len())?;
        if features.is_empty() {
            return Err(Error::Empty);
        }

        let n = features.len();
        let a = DMatrix::from_fn(n, 5, |i, j| if j == 0 { 1.0 } else { features[i][j - 1] });
        let b = DVector::from_column_slice(targets);

        let svd = a.svd(true, true);
        let solution = svd
            .solve(&b, SVD_EPS)
            .map_err(|e| Error::Fit(format!("SVD solve failed: {}", e)))?;

        let mut coefficients = [0.0; 5];
        coefficients.copy_from_slice(solution.as_slice());
        debug!("OLS coefficients {:?}", coefficients);
        self.coefficients = Some(coefficients);
        Ok(())
    }

    fn predict(&self, features: &[Features]) -> Result<Vec<f64>> {
        let c = self.coefficients.ok_or(Error::NotFitted)?;
        Ok(features
            .iter()
            .map(|x| c[0] + c[1] * x[0] + c[2] * x[1] + c[3] * x[2] + c[4] * x[3])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_exact_linear_relation() {
        let features: Vec<Features> = (0..20)
            .map(|i| {
                let t = i as f64;
                [t, (t * 0.7).sin(), t * t / 10.0, (t * 1.3).cos()]
            })
            .collect();
        let truth = [0.2, 0.05, -0.3, 0.01, 1.5];
        let targets: Vec<f64> = features
            .iter()
            .map(|x| truth[0] + truth[1] * x[0] + truth[2] * x[1] + truth[3] * x[2] + truth[4] * x[3])
            .collect();

        let mut model = LinearRegressor::new();
        model.fit(&features, &targets).unwrap();

        let coefficients = model.coefficients().unwrap();
        for (got, want) in coefficients.iter().zip(truth) {
            assert!((got - want).abs() < 1e-9, "{} vs {}", got, want);
        }

        let predictions = model.predict(&features).unwrap();
        for (p, t) in predictions.iter().zip(&targets) {
            assert!((p - t).abs() < 1e-9);
        }
    }

    #[test]
    fn test_constant_target_fits_intercept() {
        let features = vec![[1.0, 2.0, 3.0, 4.0]; 3];
        let mut model = LinearRegressor::new();
        model.fit(&features, &[0.4, 0.4, 0.4]).unwrap();
        let p = model.predict(&[[1.0, 2.0, 3.0, 4.0]]).unwrap();
        assert!((p[0] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let mut model = LinearRegressor::new();
        assert!(matches!(model.fit(&[], &[]), Err(Error::Empty)));
        assert!(matches!(
            model.fit(&[[0.0; 4]], &[1.0, 2.0]),
            Err(Error::LengthMismatch { .. })
        ));
    }
}
