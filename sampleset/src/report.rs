use crate::collection::Collection;
use serde::Serialize;
use std::fmt;

/// Summary of a [`Collection`]: how many samples it holds, how many exceed
/// triple their mean, and which has the highest mean.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub sample_count: usize,
    pub triple_mean_count: usize,
    pub best: Option<BestSample>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BestSample {
    pub label: String,
    pub max: f64,
    pub mean: f64,
    pub stddev: f64,
}

impl From<&Collection> for Report {
    fn from(collection: &Collection) -> Report {
        let best = collection.best_sample().ok().map(|s| BestSample {
            label: s.label().to_owned(),
            max: s.max(),
            mean: s.mean(),
            stddev: s.stddev(),
        });

        Report {
            sample_count: collection.len(),
            triple_mean_count: collection.count_triple_mean(),
            best,
        }
    }
}

/// Plain decimal for ordinary magnitudes, exponent notation past them.
struct Value(f64);

impl fmt::Display for Value {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let v = self.0.abs();
        if v != 0.0 && (v >= 1e16 || v < 1e-5) {
            write!(fmt, "{:e}", self.0)
        } else {
            write!(fmt, "{}", self.0)
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        writeln!(fmt, "Count of TripleMeanSamples: {}", self.triple_mean_count)?;
        if let Some(best) = &self.best {
            writeln!(fmt, "Details of sample with the max mean:")?;
            writeln!(fmt, "Data version: {} | Maximum value: {} | Mean value: {}",
                     best.label, Value(best.max), Value(best.mean))?;
        }
        Ok(())
    }
}

#[cfg(test)]
use pretty_assertions::assert_eq;

#[test]
fn text_report() {
    use crate::sample::Sample;

    let mut collection = Collection::new();
    collection.push(Sample::new("v1.5.0", vec![1.0, 2.0, 3.0]).unwrap());
    collection.push(Sample::new("v1.5.0", vec![0.0, 0.0, 0.0, 12.0]).unwrap());
    collection.push(Sample::new("v2.0.0", vec![10.0, 20.0]).unwrap());

    let report = collection.report();
    assert_eq!(report.sample_count, 3);
    assert_eq!(report.triple_mean_count, 1);
    assert_eq!(
        report.to_string(),
        "Count of TripleMeanSamples: 1\n\
         Details of sample with the max mean:\n\
         Data version: v2.0.0 | Maximum value: 20 | Mean value: 15\n"
    );
}

#[test]
fn empty_report_has_no_details() {
    let report = Report::from(&Collection::new());

    assert_eq!(report.best, None);
    assert_eq!(report.to_string(), "Count of TripleMeanSamples: 0\n");
}

#[test]
fn extreme_values_use_exponents() {
    assert_eq!(Value(1e200).to_string(), "1e200");
    assert_eq!(Value(2.5e-7).to_string(), "2.5e-7");
    assert_eq!(Value(15.0).to_string(), "15");
    assert_eq!(Value(10.5).to_string(), "10.5");
    assert_eq!(Value(0.0).to_string(), "0");
}

#[test]
fn json_report() {
    use crate::sample::Sample;
    use serde_json::json;

    let mut collection = Collection::new();
    collection.push(Sample::new("v1.5.0", vec![0.0, 0.0, 0.0, 8.0]).unwrap());
    collection.push(Sample::new("v2.0.0", vec![4.0, 6.0]).unwrap());

    let value = serde_json::to_value(collection.report()).unwrap();
    assert_eq!(
        value,
        json!({
            "sample_count": 2,
            "triple_mean_count": 1,
            "best": { "label": "v2.0.0", "max": 6.0, "mean": 5.0, "stddev": 1.0 }
        })
    );

    let empty = serde_json::to_value(Report::from(&Collection::new())).unwrap();
    assert_eq!(empty["best"], serde_json::Value::Null);
}
