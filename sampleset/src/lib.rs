//! Per-sample statistics over whitespace-delimited numeric data.
//!
//! A [`Sample`] is one labelled line of non-negative numbers, with its mean,
//! population standard deviation and maximum. A [`Collection`] holds many
//! samples and answers two questions: how many samples have a maximum above
//! three times their mean, and which sample has the highest mean.

mod collection;
mod error;
pub mod loader;
mod report;
mod sample;
mod stats;

pub use collection::Collection;
pub use error::{Error, Result};
pub use loader::LoadOptions;
pub use report::{BestSample, Report};
pub use sample::{Sample, DEFAULT_LABEL};
pub use stats::Stats;
