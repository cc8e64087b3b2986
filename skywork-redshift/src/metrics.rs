use crate::error::{Error, Result};

fn paired<'a>(actual: &'a [f64], predicted: &'a [f64]) -> Result<impl Iterator<Item = f64> + 'a> {
    if actual.len() != predicted.len() {
        return Err(Error::LengthMismatch {
            features: predicted.len(),
            targets: actual.len(),
        });
    }
    if actual.is_empty() {
        return Err(Error::Empty);
    }
    Ok(actual.iter().zip(predicted).map(|(a, p)| a - p))
}

/// Mean of squared differences, averaged over the compared rows.
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    let n = actual.len() as f64;
    Ok(paired(actual, predicted)?.map(|d| d * d).sum::<f64>() / n)
}

/// Median absolute difference.
pub fn median_diff(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    let mut diffs: Vec<f64> = paired(actual, predicted)?.map(f64::abs).collect();
    diffs.sort_by(f64::total_cmp);
    let mid = diffs.len() / 2;
    Ok(if diffs.len() % 2 == 0 {
        (diffs[mid - 1] + diffs[mid]) / 2.0
    } else {
        diffs[mid]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse_over_compared_rows() {
        let mse = mean_squared_error(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 6.0]).unwrap();
        assert_eq!(mse, 1.0);
        assert_eq!(mean_squared_error(&[0.5], &[0.5]).unwrap(), 0.0);
    }

    #[test]
    fn test_median_diff_odd_and_even() {
        assert_eq!(median_diff(&[0.0, 0.0, 0.0], &[1.0, -5.0, 2.0]).unwrap(), 2.0);
        assert_eq!(median_diff(&[0.0; 4], &[1.0, -3.0, 2.0, 10.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_metric_errors() {
        assert!(matches!(mean_squared_error(&[], &[]), Err(Error::Empty)));
        assert!(matches!(
            median_diff(&[1.0], &[1.0, 2.0]),
            Err(Error::LengthMismatch { .. })
        ));
    }
}
