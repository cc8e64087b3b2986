pub mod linear;
pub mod tree;

use crate::data::Features;
use crate::error::{Error, Result};

pub use linear::LinearRegressor;
pub use tree::DecisionTreeRegressor;

/// A model mapping colour features to redshift.
pub trait Regressor: Send + Sync {
    fn name(&self) -> &str;

    fn fit(&mut self, features: &[Features], targets: &[f64]) -> Result<()>;

    /// Errors with [`Error::NotFitted`] before [`fit`](Self::fit).
    fn predict(&self, features: &[Features]) -> Result<Vec<f64>>;
}

pub fn create_model(name: &str) -> Result<Box<dyn Regressor>> {
    match name.to_lowercase().as_str() {
        "tree" | "decision-tree" => Ok(Box::new(DecisionTreeRegressor::default())),
        "linear" | "ols" => Ok(Box::new(LinearRegressor::default())),
        _ => Err(Error::UnknownModel(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_known_models() {
        assert_eq!(create_model("tree").unwrap().name(), "decision-tree");
        assert_eq!(create_model("OLS").unwrap().name(), "linear");
        assert!(matches!(create_model("svr"), Err(Error::UnknownModel(_))));
    }

    #[test]
    fn test_unfitted_models_refuse_to_predict() {
        for name in ["tree", "linear"] {
            let model = create_model(name).unwrap();
            assert!(matches!(
                model.predict(&[[0.0; 4]]),
                Err(Error::NotFitted)
            ));
        }
    }
}
