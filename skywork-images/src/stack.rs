//! Per-pixel stacking of aligned images.
//!
//! All images must share one shape. The mean stack averages noise down by
//! `1/√N`; the median stack also rejects outliers such as cosmic-ray hits.

use crate::errors::{Result, StackError};
use crate::fits::read_primary_image;
use log::{debug, info};
use ndarray::Array2;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackMethod {
    #[default]
    Mean,
    Median,
}

impl FromStr for StackMethod {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mean" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            other => Err(StackError::InvalidParameter {
                name: "method",
                message: format!("unknown stacking method '{}'", other),
            }),
        }
    }
}

impl fmt::Display for StackMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mean => "mean",
            Self::Median => "median",
        })
    }
}

/// A numbered image set: `{directory}/{i:04}.fits` for `i` in `0..count`.
#[derive(Debug, Clone, PartialEq)]
pub struct StackParams {
    pub directory: PathBuf,
    pub count: usize,
    pub method: StackMethod,
}

impl StackParams {
    pub fn new(directory: impl Into<PathBuf>, count: usize) -> Self {
        Self {
            directory: directory.into(),
            count,
            method: StackMethod::default(),
        }
    }

    pub fn with_method(mut self, method: StackMethod) -> Self {
        self.method = method;
        self
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        numbered_paths(&self.directory, self.count)
    }

    pub fn run(&self) -> Result<Array2<f64>> {
        stack_files(&self.paths(), self.method)
    }
}

pub fn numbered_paths(directory: &Path, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| directory.join(format!("{:04}.fits", i)))
        .collect()
}

fn common_shape(images: &[Array2<f64>]) -> Result<(usize, usize)> {
    let first = images.first().ok_or(StackError::Empty)?;
    let expected = first.dim();
    for (index, image) in images.iter().enumerate().skip(1) {
        if image.dim() != expected {
            return Err(StackError::ShapeMismatch {
                index,
                expected,
                actual: image.dim(),
            });
        }
    }
    Ok(expected)
}

/// Per-pixel mean across `images`.
pub fn mean_stack(images: &[Array2<f64>]) -> Result<Array2<f64>> {
    let shape = common_shape(images)?;
    let n = images.len() as f64;

    let mut mean = Array2::zeros(shape);
    for image in images {
        mean += image;
    }
    mean.mapv_inplace(|v| v / n);
    Ok(mean)
}

/// Per-pixel median across `images`; an even count averages the middle two.
///
/// NaN samples are skipped. A pixel that is NaN in every image stays NaN.
pub fn median_stack(images: &[Array2<f64>]) -> Result<Array2<f64>> {
    let shape = common_shape(images)?;
    let mut samples = Vec::with_capacity(images.len());

    Ok(Array2::from_shape_fn(shape, |(row, col)| {
        samples.clear();
        samples.extend(
            images
                .iter()
                .map(|image| image[[row, col]])
                .filter(|v| !v.is_nan()),
        );
        median_of(&mut samples)
    }))
}

fn median_of(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

pub fn stack(images: &[Array2<f64>], method: StackMethod) -> Result<Array2<f64>> {
    match method {
        StackMethod::Mean => mean_stack(images),
        StackMethod::Median => median_stack(images),
    }
}

/// Loads every file's primary image and stacks them.
pub fn stack_files<P: AsRef<Path>>(paths: &[P], method: StackMethod) -> Result<Array2<f64>> {
    let images = paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            read_primary_image(path)
                .map(|image| image.data)
                .map_err(|source| StackError::Load {
                    path: path.to_path_buf(),
                    source,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(first) = images.first() {
        let (rows, cols) = first.dim();
        info!("The shape of list of images: ({}, {}, {})", images.len(), rows, cols);
    }

    let stacked = stack(&images, method)?;
    info!("The shape of final stacked image: {:?}", stacked.dim());
    debug!("Stacked {} images with the {} method", images.len(), method);
    Ok(stacked)
}

/// `(row, col, value)` of the largest finite pixel; `None` when there is none.
pub fn brightest_pixel(image: &Array2<f64>) -> Option<(usize, usize, f64)> {
    image
        .indexed_iter()
        .filter(|(_, v)| v.is_finite())
        .fold(None, |best: Option<(usize, usize, f64)>, ((row, col), &value)| match best {
            Some((_, _, best_value)) if value <= best_value => best,
            _ => Some((row, col, value)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fits::write_primary_image;
    use ndarray::array;

    #[test]
    fn test_mean_of_identical_images_is_the_image() {
        let image = array![[1.0, 2.0], [3.0, 4.0]];
        let stacked = mean_stack(&[image.clone(), image.clone(), image.clone()]).unwrap();
        assert_eq!(stacked, image);
    }

    #[test]
    fn test_mean_stack_averages() {
        let a = array![[0.0, 2.0], [4.0, 6.0]];
        let b = array![[2.0, 2.0], [0.0, -6.0]];
        assert_eq!(mean_stack(&[a, b]).unwrap(), array![[1.0, 2.0], [2.0, 0.0]]);
    }

    #[test]
    fn test_stack_rejects_empty_and_mismatched() {
        assert!(matches!(mean_stack(&[]), Err(StackError::Empty)));
        assert!(matches!(median_stack(&[]), Err(StackError::Empty)));

        let err = mean_stack(&[Array2::zeros((2, 2)), Array2::zeros((2, 2)), Array2::zeros((2, 3))])
            .unwrap_err();
        match err {
            StackError::ShapeMismatch {
                index,
                expected,
                actual,
            } => {
                assert_eq!(index, 2);
                assert_eq!(expected, (2, 2));
                assert_eq!(actual, (2, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_median_rejects_outlier() {
        let images = vec![
            array![[1.0, 5.0]],
            array![[2.0, 5.0]],
            array![[1000.0, 5.0]],
        ];
        assert_eq!(median_stack(&images).unwrap(), array![[2.0, 5.0]]);
        assert_eq!(mean_stack(&images).unwrap()[[0, 0]], 1003.0 / 3.0);
    }

    #[test]
    fn test_median_even_count_and_nan() {
        let images = vec![
            array![[1.0, f64::NAN]],
            array![[4.0, f64::NAN]],
            array![[2.0, f64::NAN]],
            array![[3.0, 7.0]],
        ];
        let stacked = median_stack(&images).unwrap();
        assert_eq!(stacked[[0, 0]], 2.5);
        assert_eq!(stacked[[0, 1]], 7.0);
    }

    #[test]
    fn test_brightest_pixel_skips_nan() {
        let image = array![[1.0, f64::NAN], [9.0, 3.0]];
        assert_eq!(brightest_pixel(&image), Some((1, 0, 9.0)));
        assert_eq!(brightest_pixel(&array![[f64::NAN]]), None);
        assert_eq!(brightest_pixel(&Array2::zeros((0, 0))), None);
    }

    #[test]
    fn test_brightest_pixel_skips_infinities() {
        let image = array![[1.0, f64::INFINITY], [f64::NEG_INFINITY, 7.0]];
        assert_eq!(brightest_pixel(&image), Some((1, 1, 7.0)));

        let all_inf = Array2::from_elem((2, 2), f64::INFINITY);
        assert_eq!(brightest_pixel(&all_inf), None);
        let mixed = array![[f64::NAN, f64::INFINITY], [f64::NEG_INFINITY, f64::NAN]];
        assert_eq!(brightest_pixel(&mixed), None);
    }

    #[test]
    fn test_brightest_pixel_first_wins_ties() {
        let image = array![[0.0, 4.0], [4.0, 1.0]];
        assert_eq!(brightest_pixel(&image), Some((0, 1, 4.0)));
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("mean".parse::<StackMethod>().unwrap(), StackMethod::Mean);
        assert_eq!("Median".parse::<StackMethod>().unwrap(), StackMethod::Median);
        assert!("mode".parse::<StackMethod>().is_err());
    }

    #[test]
    fn test_numbered_paths_format() {
        let params = StackParams::new("big_dataset_for_stacking", 3);
        let paths = params.paths();
        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with("0000.fits"));
        assert!(paths[2].ends_with("0002.fits"));
    }

    #[test]
    fn test_stack_directory_of_files() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..4 {
            let mut image = Array2::from_elem((5, 6), i as f64);
            image[[2, 3]] += 100.0;
            write_primary_image(dir.path().join(format!("{:04}.fits", i)), &image).unwrap();
        }

        let params = StackParams::new(dir.path(), 4).with_method(StackMethod::Mean);
        let stacked = params.run().unwrap();
        assert_eq!(stacked.dim(), (5, 6));
        assert_eq!(stacked[[0, 0]], 1.5);
        assert_eq!(brightest_pixel(&stacked), Some((2, 3, 101.5)));
    }

    #[test]
    fn test_stack_files_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = stack_files(&[dir.path().join("0000.fits")], StackMethod::Mean).unwrap_err();
        assert!(matches!(err, StackError::Load { .. }));
    }
}
