use crate::data::Features;
use crate::error::{check_lengths, Error, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitParams {
    /// Share of rows held out for testing, in `(0, 1)`.
    pub test_fraction: f64,
    /// Shuffle seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            test_fraction: 0.25,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    pub features_train: Vec<Features>,
    pub features_test: Vec<Features>,
    pub targets_train: Vec<f64>,
    pub targets_test: Vec<f64>,
}

/// Shuffles rows and holds out `ceil(n × test_fraction)` of them.
///
/// Rows keep their feature/target pairing. The same seed always produces the
/// same split.
pub fn train_test_split(
    features: &[Features],
    targets: &[f64],
    params: &SplitParams,
) -> Result<TrainTestSplit> {
    check_lengths(features.len(), targets.len())?;
    let n = features.len();
    if n < 2 {
        return Err(Error::InsufficientData { needed: 2, found: n });
    }
    if !(params.test_fraction > 0.0 && params.test_fraction < 1.0) {
        return Err(Error::InvalidParameter {
            name: "test_fraction",
            message: format!("must lie in (0, 1), got {}", params.test_fraction),
        });
    }

    let n_test = (n as f64 * params.test_fraction).ceil() as usize;
    if n_test >= n {
        return Err(Error::InvalidParameter {
            name: "test_fraction",
            message: format!("{} of {} rows leaves no training data", n_test, n),
        });
    }

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);

    let (test_idx, train_idx) = order.split_at(n_test);
    debug!("Split {} rows into {} train / {} test", n, train_idx.len(), test_idx.len());

    Ok(TrainTestSplit {
        features_train: train_idx.iter().map(|&i| features[i]).collect(),
        features_test: test_idx.iter().map(|&i| features[i]).collect(),
        targets_train: train_idx.iter().map(|&i| targets[i]).collect(),
        targets_test: test_idx.iter().map(|&i| targets[i]).collect(),
    })
}
