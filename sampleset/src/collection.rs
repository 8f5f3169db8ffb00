use crate::error::{Error, Result};
use crate::loader::{self, LoadOptions};
use crate::report::Report;
use crate::sample::Sample;
use std::path::Path;

/// An append-only set of samples.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    samples: Vec<Sample>,
}

impl Collection {
    pub fn new() -> Collection {
        Default::default()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Append every sample in the file at `path`, labelled with `label`.
    /// Returns the number of samples added. On error, the collection is left
    /// unchanged.
    pub fn load(&mut self, path: impl AsRef<Path>, label: &str, options: &LoadOptions) -> Result<usize> {
        let loaded = loader::load_file(path, label, options)?;
        let count = loaded.len();
        self.samples.extend(loaded);
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of samples whose maximum is more than three times their mean.
    pub fn count_triple_mean(&self) -> usize {
        self.samples.iter().filter(|s| s.exceeds_triple_mean()).count()
    }

    /// The sample with the highest mean. The earliest one wins a tie.
    pub fn best_sample(&self) -> Result<&Sample> {
        let mut iter = self.samples.iter();
        let first = iter.next().ok_or(Error::NoSamples)?;
        Ok(iter.fold(first, |best, s| if s.mean() > best.mean() { s } else { best }))
    }

    pub fn report(&self) -> Report {
        Report::from(self)
    }
}

impl Extend<Sample> for Collection {
    fn extend<T: IntoIterator<Item=Sample>>(&mut self, iter: T) {
        self.samples.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
fn sample(label: &str, values: &[f64]) -> Sample {
    Sample::new(label, values.to_vec()).unwrap()
}

#[test]
fn empty_collection() {
    let collection = Collection::new();

    assert!(collection.is_empty());
    assert_eq!(collection.count_triple_mean(), 0);
    assert!(matches!(collection.best_sample(), Err(Error::NoSamples)));
}

#[test]
fn counts_triple_mean_samples() {
    let mut collection = Collection::new();
    collection.push(sample("a", &[1.0, 1.0, 1.0, 1.0, 20.0]));
    collection.push(sample("b", &[5.0, 5.0, 5.0]));
    collection.push(sample("c", &[0.0, 0.0, 0.0, 9.0]));

    assert_eq!(collection.len(), 3);
    assert_eq!(collection.count_triple_mean(), 2);
}

#[test]
fn best_sample_prefers_earliest_tie() {
    let mut collection = Collection::new();
    collection.extend(vec![
        sample("low", &[1.0, 2.0]),
        sample("first", &[4.0, 6.0]),
        sample("second", &[5.0, 5.0]),
    ]);

    let best = collection.best_sample().unwrap();
    assert_eq!(best.label(), "first");
    assert_eq!(best.mean(), 5.0);
}

#[test]
fn failed_load_leaves_collection_unchanged() {
    let mut collection = Collection::new();
    collection.push(sample("kept", &[1.0]));

    assert!(collection.load("no/such/file.txt", "v", &LoadOptions::default()).is_err());
    assert_eq!(collection.len(), 1);

    collection.clear();
    assert!(collection.is_empty());
}
