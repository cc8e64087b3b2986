//! Photometric redshift estimation.
//!
//! Galaxy colours (differences of SDSS `u g r i z` magnitudes) are regressed
//! against spectroscopic redshift. The pipeline is
//! [`load_colors`] → [`get_features_targets`] → [`train_test_split`] →
//! [`Regressor::fit`] → [`Regressor::predict`] → [`mean_squared_error`].
//!
//! ```ignore
//! use skywork_redshift::*;
//!
//! let records = load_colors("sdss_galaxy_colors.csv")?;
//! let (features, targets) = get_features_targets(&records);
//! let split = train_test_split(&features, &targets, &SplitParams::default())?;
//!
//! let mut tree = DecisionTreeRegressor::new();
//! tree.fit(&split.features_train, &split.targets_train)?;
//! let predictions = tree.predict(&split.features_test)?;
//! println!("MSE {}", mean_squared_error(&split.targets_test, &predictions)?);
//! ```

pub mod data;
pub mod error;
pub mod metrics;
pub mod model;
pub mod split;

pub use data::{get_features_targets, load_colors, parse_colors, ColorRecord, Features, FEATURE_NAMES};
pub use error::{Error, Result};
pub use metrics::{mean_squared_error, median_diff};
pub use model::{create_model, DecisionTreeRegressor, LinearRegressor, Regressor};
pub use split::{train_test_split, SplitParams, TrainTestSplit};
