use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot open file: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("negative value {value} at position {index} is not allowed in a data sample")]
    NegativeValue { index: usize, value: f64 },

    #[error("non-finite value {value} at position {index} is not allowed in a data sample")]
    NonFiniteValue { index: usize, value: f64 },

    #[error("data sample has no values")]
    EmptySample,

    #[error("line {line}: cannot parse {token:?} as a number")]
    Parse { line: usize, token: String },

    #[error("line {line}: not valid UTF-8")]
    Encoding { line: usize },

    #[error("line {line}: {reason}")]
    InvalidLine { line: usize, reason: Box<Error> },

    #[error("no samples available")]
    NoSamples,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
