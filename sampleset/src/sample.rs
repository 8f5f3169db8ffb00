use crate::error::{Error, Result};
use crate::stats::Stats;
use std::fmt;

/// Label given to samples when none is supplied.
pub const DEFAULT_LABEL: &str = "v1.0.0";

/// A labelled vector of non-negative, finite values.
///
/// Statistics are computed once, when the sample is built; a `Sample` is
/// never empty, so `max` is always defined.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    label: String,
    values: Vec<f64>,
    mean: f64,
    stddev: f64,
    max: f64,
}

impl Sample {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Result<Sample> {
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(Error::NonFiniteValue { index, value });
            }
            if value < 0.0 {
                return Err(Error::NegativeValue { index, value });
            }
        }

        let max = values.iter().copied().reduce(f64::max).ok_or(Error::EmptySample)?;

        // Division by a power of two is exact, so this changes no digits; it
        // only keeps the sums of squares finite for very large values.
        let scale = power_of_two_below(max);
        let stats: Stats = values.iter().map(|x| x / scale).collect();

        Ok(Sample {
            label: label.into(),
            mean: stats.mean() * scale,
            stddev: stats.population_stddev() * scale,
            max,
            values,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation.
    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// True when the largest value is strictly more than three times the mean.
    pub fn exceeds_triple_mean(&self) -> bool {
        self.max > 3.0 * self.mean
    }
}

fn power_of_two_below(max: f64) -> f64 {
    if max > 0.0 {
        2f64.powi((max.log2().floor() as i32).clamp(-1022, 1023))
    } else {
        1.0
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.label)
    }
}

#[test]
fn statistics() {
    let sample = Sample::new("v1.5.0", vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();

    assert_eq!(sample.label(), "v1.5.0");
    assert_eq!(sample.len(), 8);
    assert_eq!(sample.mean(), 5.0);
    assert_eq!(sample.stddev(), 2.0);
    assert_eq!(sample.max(), 9.0);
    assert!(!sample.exceeds_triple_mean());
    assert_eq!(sample.to_string(), "v1.5.0");
}

#[test]
fn huge_values_keep_finite_statistics() {
    let spread = Sample::new(DEFAULT_LABEL, vec![1e200, 0.0]).unwrap();
    assert!((spread.mean() / 5e199 - 1.0).abs() < 1e-12, "mean {}", spread.mean());
    assert!((spread.stddev() / 5e199 - 1.0).abs() < 1e-12, "stddev {}", spread.stddev());

    let near_max = Sample::new(DEFAULT_LABEL, vec![1.7e308, 1.7e308]).unwrap();
    assert_eq!(near_max.mean(), 1.7e308);
    assert_eq!(near_max.stddev(), 0.0);
    assert_eq!(near_max.max(), 1.7e308);
}

#[test]
fn tiny_values_keep_their_statistics() {
    let sample = Sample::new(DEFAULT_LABEL, vec![2e-300, 4e-300]).unwrap();
    assert!((sample.mean() / 3e-300 - 1.0).abs() < 1e-12);
    assert!((sample.stddev() / 1e-300 - 1.0).abs() < 1e-12);
}

#[test]
fn rejects_negative_values() {
    match Sample::new(DEFAULT_LABEL, vec![1.0, -2.5, -3.0]) {
        Err(Error::NegativeValue { index, value }) => {
            assert_eq!(index, 1);
            assert_eq!(value, -2.5);
        }
        other => panic!("expected NegativeValue, got {:?}", other),
    }
}

#[test]
fn accepts_negative_zero() {
    let sample = Sample::new(DEFAULT_LABEL, vec![-0.0, 1.0]).unwrap();
    assert_eq!(sample.mean(), 0.5);
}

#[test]
fn rejects_non_finite_values() {
    assert!(matches!(
        Sample::new(DEFAULT_LABEL, vec![1.0, f64::NAN]),
        Err(Error::NonFiniteValue { index: 1, .. })
    ));
    assert!(matches!(
        Sample::new(DEFAULT_LABEL, vec![f64::INFINITY]),
        Err(Error::NonFiniteValue { index: 0, .. })
    ));
}

#[test]
fn rejects_empty() {
    assert!(matches!(Sample::new(DEFAULT_LABEL, vec![]), Err(Error::EmptySample)));
}

#[test]
fn triple_mean_is_strict() {
    // mean 1, max 3: not strictly greater
    let boundary = Sample::new(DEFAULT_LABEL, vec![0.0, 0.0, 3.0]).unwrap();
    assert_eq!(boundary.mean(), 1.0);
    assert!(!boundary.exceeds_triple_mean());

    let outlier = Sample::new(DEFAULT_LABEL, vec![0.0, 0.0, 0.0, 10.0]).unwrap();
    assert!(outlier.exceeds_triple_mean());
}

#[test]
fn all_zero_is_not_an_outlier() {
    let zeros = Sample::new(DEFAULT_LABEL, vec![0.0, 0.0]).unwrap();
    assert!(!zeros.exceeds_triple_mean());
}
