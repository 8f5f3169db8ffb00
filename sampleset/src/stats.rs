/// Running sums from which mean, population standard deviation and maximum
/// are derived.
///
/// The sum of squares overflows once values pass roughly `1e154`; the
/// statistics then come out NaN or infinite. [`Sample`](crate::Sample)
/// rescales its values before pushing them.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    x0s: usize,
    x1s: f64,
    x2s: f64,
    max: f64,
}

impl Default for Stats {
    fn default() -> Stats {
        Stats {
            x0s: 0,
            x1s: 0.0,
            x2s: 0.0,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Stats {
    pub fn new() -> Stats {
        Default::default()
    }

    pub fn push(&mut self, x: f64) {
        self.x0s += 1;
        self.x1s += x;
        self.x2s += x * x;
        if x > self.max {
            self.max = x;
        }
    }

    pub fn count(&self) -> usize {
        self.x0s
    }

    /// NaN when nothing has been pushed.
    pub fn mean(&self) -> f64 {
        self.x1s / self.x0s as f64
    }

    pub fn population_stddev(&self) -> f64 {
        let d = self.x0s as f64 * self.x2s - self.x1s * self.x1s;
        // Rounding can leave `d` a hair below zero for constant data. NaN from
        // overflowed sums passes through.
        let d = if d < 0.0 { 0.0 } else { d };
        d.sqrt() / self.x0s as f64
    }

    pub fn max(&self) -> Option<f64> {
        if self.x0s == 0 {
            None
        } else {
            Some(self.max)
        }
    }
}

impl Extend<f64> for Stats {
    fn extend<T: IntoIterator<Item=f64>>(&mut self, iter: T) {
        iter.into_iter().for_each(|x| self.push(x));
    }
}

impl FromIterator<f64> for Stats {
    fn from_iter<T: IntoIterator<Item=f64>>(iter: T) -> Stats {
        let mut stats = Stats::new();
        stats.extend(iter);
        stats
    }
}

#[test]
fn pop_stddev() {
    let mut stats = Stats::new();

    stats.extend([2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].iter().copied());
    assert_eq!(stats.count(), 8);
    assert_eq!(stats.mean(), 5.0);
    assert_eq!(stats.population_stddev(), 2.0);
    assert_eq!(stats.max(), Some(9.0));
}

#[test]
fn constant_data_has_zero_stddev() {
    let stats: Stats = std::iter::repeat(0.1_f64).take(10).collect();

    assert!((stats.mean() - 0.1).abs() < 1e-12);
    let stddev = stats.population_stddev();
    assert!(!stddev.is_nan());
    assert!(stddev < 1e-7, "stddev {}", stddev);
}

#[test]
fn empty() {
    let stats = Stats::new();

    assert_eq!(stats.count(), 0);
    assert!(stats.mean().is_nan());
    assert_eq!(stats.max(), None);
}

#[test]
fn max_tracks_zero_only_data() {
    let stats: Stats = [0.0_f64, 0.0].iter().copied().collect();

    assert_eq!(stats.max(), Some(0.0));
    assert_eq!(stats.population_stddev(), 0.0);
}

#[test]
fn overflowed_sums_give_nan_not_zero() {
    let stats: Stats = [1e200_f64, 0.0].iter().copied().collect();

    assert!(stats.population_stddev().is_nan());
}
